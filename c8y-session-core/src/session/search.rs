//! Client-side multi-term search
//!
//! The vault CLI only accepts a single `--search` term, so every term is
//! checked again here against the mapped session.

use crate::types::SessionRecord;

/// Check whether `record` satisfies every search term
///
/// A term matches when it is a case-sensitive substring of at least one
/// searchable field. An empty term list matches everything.
pub fn matches<S: AsRef<str>>(record: &SessionRecord, terms: &[S]) -> bool {
    if terms.is_empty() {
        return true;
    }

    let description = record.description();
    let haystacks = [
        record.username.as_str(),
        record.host.as_str(),
        record.name.as_str(),
        description.as_str(),
        record.session_uri.as_str(),
        record.tenant.as_str(),
        record.mode_str(),
    ];

    terms
        .iter()
        .all(|term| haystacks.iter().any(|field| field.contains(term.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mode;

    fn record() -> SessionRecord {
        SessionRecord {
            session_uri: "vault://abc-123".to_string(),
            name: "Acme Production".to_string(),
            host: "https://acme.cumulocity.com".to_string(),
            username: "bob".to_string(),
            tenant: "t100".to_string(),
            mode: Some(Mode::Qual),
            folder_name: "customers".to_string(),
            password: "hunter2".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_terms_always_match() {
        let terms: [&str; 0] = [];
        assert!(matches(&record(), &terms));
        assert!(matches(&SessionRecord::default(), &terms));
    }

    #[test]
    fn test_every_term_must_match_some_field() {
        assert!(matches(&record(), &["acme", "bob"]));
        assert!(matches(&record(), &["t100", "qual", "abc-123"]));
        assert!(!matches(&record(), &["acme", "alice"]));
    }

    #[test]
    fn test_terms_are_case_sensitive() {
        assert!(matches(&record(), &["Acme"]));
        assert!(!matches(&record(), &["ACME"]));
    }

    #[test]
    fn test_folder_name_is_searchable_through_description() {
        assert!(matches(&record(), &["Folder=customers"]));
    }

    #[test]
    fn test_password_is_not_searchable() {
        assert!(!matches(&record(), &["hunter2"]));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let terms = vec!["bob".to_string()];
        assert!(matches(&record(), &terms));
    }
}
