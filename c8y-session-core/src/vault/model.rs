//! Raw vault records as emitted by `bw list items` / `bw list folders`
//!
//! The CLI emits `null` for most absent values, so nearly everything is
//! optional and read through accessors.

use serde::Deserialize;

/// Vault item containing the login information
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub login: Option<VaultLogin>,
    #[serde(default)]
    pub fields: Option<Vec<VaultField>>,
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// Login credentials of an item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaultLogin {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub totp: Option<String>,
    #[serde(default)]
    pub uris: Option<Vec<VaultUri>>,
}

/// URI associated with the login credentials
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaultUri {
    #[serde(default)]
    pub uri: Option<String>,
}

/// Free-form custom field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaultField {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: i32,
}

/// Vault folder
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaultFolder {
    /// The implicit "No Folder" entry has a null id
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl VaultItem {
    pub fn username(&self) -> &str {
        self.login
            .as_ref()
            .and_then(|l| l.username.as_deref())
            .unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.login
            .as_ref()
            .and_then(|l| l.password.as_deref())
            .unwrap_or_default()
    }

    pub fn totp_secret(&self) -> &str {
        self.login
            .as_ref()
            .and_then(|l| l.totp.as_deref())
            .unwrap_or_default()
    }

    pub fn folder_id(&self) -> &str {
        self.folder_id.as_deref().unwrap_or_default()
    }

    pub fn uris(&self) -> &[VaultUri] {
        self.login
            .as_ref()
            .and_then(|l| l.uris.as_deref())
            .unwrap_or_default()
    }

    pub fn fields(&self) -> &[VaultField] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// First login URI, if the item has any
    pub fn first_uri(&self) -> Option<&str> {
        self.uris()
            .first()
            .map(|u| u.uri.as_deref().unwrap_or_default())
    }

    /// Items without a URI are not login credentials for a tenant
    pub fn skip(&self) -> bool {
        self.uris().is_empty()
    }
}

impl VaultField {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}
