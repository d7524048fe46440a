//! Session listing on top of the vault CLI
//!
//! Resolves the folder scope, fetches items and turns them into sessions.

use crate::config::Settings;
use crate::error::VaultError;
use crate::session::{self, SessionMapper};
use crate::types::SessionRecord;
use crate::vault::folder::{FolderScope, FolderSelector};
use crate::vault::{VaultCli, VaultFolder, VaultItem};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Lists Cumulocity sessions stored in the vault
#[derive(Debug, Clone)]
pub struct VaultClient {
    cli: VaultCli,
    mapper: SessionMapper,
}

impl VaultClient {
    pub fn new(cli: VaultCli, mapper: SessionMapper) -> Self {
        Self { cli, mapper }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            VaultCli::from_settings(settings),
            SessionMapper::new(settings.uri_scheme.clone()),
        )
    }

    /// List folders as an id -> name map, optionally filtered server-side
    pub async fn list_folders(
        &self,
        search: Option<&str>,
    ) -> Result<HashMap<String, String>, VaultError> {
        let mut args = vec!["list".to_string(), "folders".to_string()];
        if let Some(search) = search {
            args.push("--search".to_string());
            args.push(search.to_string());
        }

        let folders: Vec<VaultFolder> = self.cli.execute(&args).await?;

        Ok(folders
            .into_iter()
            .filter_map(|f| f.id.map(|id| (id, f.name)))
            .collect())
    }

    /// Resolve a user supplied folder identifier
    pub async fn resolve_folder(&self, identifier: &str) -> Result<FolderScope, VaultError> {
        match FolderSelector::parse(identifier) {
            FolderSelector::All => Ok(FolderScope::All),
            FolderSelector::Id(id) => Ok(FolderScope::Id(id)),
            FolderSelector::Name(name) => {
                debug!("Looking up folder by name: {}", name);
                let folders = self.list_folders(Some(&name)).await?;
                debug!("Matching folders: {}", folders.len());
                if folders.is_empty() {
                    warn!("No folder matches '{}', items will not be filtered by folder", name);
                }
                Ok(FolderScope::Named(folders))
            }
        }
    }

    /// Fetch raw items, narrowed server-side by folder id and one search term
    pub async fn list_items(
        &self,
        scope: &FolderScope,
        search: Option<&str>,
    ) -> Result<Vec<VaultItem>, VaultError> {
        let mut args = vec!["list".to_string(), "items".to_string()];
        if let Some(folder_id) = scope.folder_id() {
            args.push("--folderid".to_string());
            args.push(folder_id.to_string());
        }
        if let Some(search) = search {
            args.push("--search".to_string());
            args.push(search.to_string());
        }

        self.cli.execute(&args).await
    }

    /// List sessions in `folder` matching all `terms`
    pub async fn list<S: AsRef<str>>(
        &self,
        folder: &str,
        terms: &[S],
    ) -> Result<Vec<SessionRecord>, VaultError> {
        let scope = self.resolve_folder(folder).await?;
        let first_term = terms.first().map(|t| t.as_ref());

        let items = self.list_items(&scope, first_term).await?;
        let raw_count = items.len();

        let sessions = build_sessions(&items, &scope, terms, &self.mapper);
        info!("Found {} sessions ({} vault items)", sessions.len(), raw_count);

        Ok(sessions)
    }
}

/// Map, scope and search-filter raw items
pub fn build_sessions<S: AsRef<str>>(
    items: &[VaultItem],
    scope: &FolderScope,
    terms: &[S],
    mapper: &SessionMapper,
) -> Vec<SessionRecord> {
    let no_names = HashMap::new();
    let names = scope.names().unwrap_or(&no_names);

    items
        .iter()
        .filter(|item| !item.skip())
        .filter(|item| scope.contains(item.folder_id()))
        .filter_map(|item| mapper.map(item, names))
        .filter(|session| session::matches(session, terms))
        .collect()
}
