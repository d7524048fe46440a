//! Vault item to session mapping
//!
//! Later steps may override values set by earlier ones, so the order in
//! [`SessionMapper::map`] matters.

use crate::types::{Mode, SessionRecord};
use crate::vault::VaultItem;
use std::collections::HashMap;
use tracing::warn;

/// Converts raw vault items into [`SessionRecord`]s
#[derive(Debug, Clone)]
pub struct SessionMapper {
    uri_scheme: String,
}

impl Default for SessionMapper {
    fn default() -> Self {
        Self::new("vault")
    }
}

impl SessionMapper {
    pub fn new(uri_scheme: impl Into<String>) -> Self {
        Self {
            uri_scheme: uri_scheme.into(),
        }
    }

    /// Session URI for a vault item id
    pub fn session_uri(&self, item_id: &str) -> String {
        format!("{}://{}", self.uri_scheme, item_id)
    }

    /// Map one item, or `None` when the item has no login URI
    pub fn map(
        &self,
        item: &VaultItem,
        folders: &HashMap<String, String>,
    ) -> Option<SessionRecord> {
        let host = item.first_uri()?;

        let mut session = SessionRecord {
            session_uri: self.session_uri(&item.id),
            name: item.name.clone(),
            username: item.username().to_string(),
            password: item.password().to_string(),
            folder_id: item.folder_id().to_string(),
            totp_secret: item.totp_secret().to_string(),
            ..Default::default()
        };

        // Include folder name (for humans)
        if let Some(folder_name) = folders.get(item.folder_id()) {
            session.folder_name = folder_name.clone();
        }

        session.host = host.to_string();

        self.apply_fields(item, &mut session);

        if let Some((prefix, suffix)) = item.username().split_once('/') {
            // A prefix only replaces a tenant that was already set by a field.
            if !session.tenant.is_empty() {
                session.tenant = prefix.to_string();
            }
            session.username = suffix.to_string();
        }

        Some(session)
    }

    fn apply_fields(&self, item: &VaultItem, session: &mut SessionRecord) {
        let mut tenant_seen = false;

        for field in item.fields() {
            let name = field.name().to_ascii_lowercase();

            if name.starts_with("tenant") {
                if !tenant_seen {
                    session.tenant = field.value().to_string();
                    tenant_seen = true;
                }
            } else if name == "mode" {
                let parsed = Mode::normalize(field.value());
                if let Some(warning) = parsed.warning {
                    warn!(item = %item.id, "{}", warning);
                }
                session.mode = Some(parsed.mode);
            } else if name == "logintype" {
                session.login_type = field.value().to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use crate::vault::{VaultField, VaultLogin, VaultUri};

    fn field(name: &str, value: &str) -> VaultField {
        VaultField {
            name: Some(name.to_string()),
            value: Some(value.to_string()),
            field_type: 0,
        }
    }

    fn item(username: &str, fields: Vec<VaultField>) -> VaultItem {
        VaultItem {
            id: "item-1".to_string(),
            name: "Item 1".to_string(),
            login: Some(VaultLogin {
                username: Some(username.to_string()),
                password: Some("pw".to_string()),
                totp: Some("JBSWY3DPEHPK3PXP".to_string()),
                uris: Some(vec![
                    VaultUri {
                        uri: Some("https://first.example.com".to_string()),
                    },
                    VaultUri {
                        uri: Some("https://second.example.com".to_string()),
                    },
                ]),
            }),
            fields: Some(fields),
            folder_id: Some("f1".to_string()),
        }
    }

    #[test]
    fn test_base_fields() {
        let mut folders = HashMap::new();
        folders.insert("f1".to_string(), "c8y".to_string());

        let session = SessionMapper::new("bitwarden")
            .map(&item("bob", vec![]), &folders)
            .unwrap();

        assert_eq!(session.session_uri, "bitwarden://item-1");
        assert_eq!(session.name, "Item 1");
        assert_eq!(session.host, "https://first.example.com");
        assert_eq!(session.username, "bob");
        assert_eq!(session.password, "pw");
        assert_eq!(session.totp_secret, "JBSWY3DPEHPK3PXP");
        assert_eq!(session.folder_id, "f1");
        assert_eq!(session.folder_name, "c8y");
        assert!(session.totp.is_empty());
        assert!(session.mode.is_none());
    }

    #[test]
    fn test_item_without_uri_is_not_mapped() {
        let mut no_uri = item("bob", vec![]);
        if let Some(login) = no_uri.login.as_mut() {
            login.uris = Some(vec![]);
        }
        assert!(SessionMapper::default().map(&no_uri, &HashMap::new()).is_none());

        let no_login = VaultItem {
            id: "n".to_string(),
            ..Default::default()
        };
        assert!(SessionMapper::default().map(&no_login, &HashMap::new()).is_none());
    }

    #[test]
    fn test_tenant_field_is_case_insensitive_prefix() {
        let session = SessionMapper::default()
            .map(
                &item("bob", vec![field("Tenant ID", "t100"), field("tenant", "t200")]),
                &HashMap::new(),
            )
            .unwrap();
        assert_eq!(session.tenant, "t100");
    }

    #[test]
    fn test_username_prefix_overrides_existing_tenant() {
        let session = SessionMapper::default()
            .map(&item("t123/bob", vec![field("tenant", "acme")]), &HashMap::new())
            .unwrap();
        assert_eq!(session.tenant, "t123");
        assert_eq!(session.username, "bob");
    }

    #[test]
    fn test_username_prefix_dropped_without_tenant_field() {
        let session = SessionMapper::default()
            .map(&item("t123/bob", vec![]), &HashMap::new())
            .unwrap();
        assert_eq!(session.tenant, "");
        assert_eq!(session.username, "bob");
    }

    #[test]
    fn test_username_split_on_first_slash_only() {
        let session = SessionMapper::default()
            .map(&item("t1/bob/extra", vec![field("tenant", "x")]), &HashMap::new())
            .unwrap();
        assert_eq!(session.tenant, "t1");
        assert_eq!(session.username, "bob/extra");
    }

    #[test]
    fn test_mode_and_login_type_fields() {
        let session = SessionMapper::default()
            .map(
                &item("bob", vec![field("MODE", "qual"), field("loginType", "OAUTH2_INTERNAL")]),
                &HashMap::new(),
            )
            .unwrap();
        assert_eq!(session.mode, Some(Mode::Qual));
        assert_eq!(session.login_type, "OAUTH2_INTERNAL");
    }

    #[test]
    fn test_unknown_mode_falls_back_to_prod() {
        let (session, logs) = capture_logs(|| {
            SessionMapper::default()
                .map(&item("bob", vec![field("mode", "staging")]), &HashMap::new())
                .unwrap()
        });
        assert_eq!(session.mode, Some(Mode::Prod));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("staging"));
        assert!(logs.contains("item-1"));
    }

    #[test]
    fn test_known_mode_logs_nothing() {
        let (_, logs) = capture_logs(|| {
            SessionMapper::default().map(&item("bob", vec![field("mode", "qual")]), &HashMap::new())
        });
        assert!(!logs.contains("WARN"));
    }
}
