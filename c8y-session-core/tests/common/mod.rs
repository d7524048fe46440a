//! Fake `bw` executable for integration tests
//!
//! Writes a small shell script that answers `list folders` and `list items`
//! from JSON files and records every invocation in `calls.log`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct FakeVault {
    dir: TempDir,
    pub program: PathBuf,
}

impl FakeVault {
    pub fn new(folders_json: &str, items_json: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let base = dir.path().display().to_string();

        fs::write(dir.path().join("folders.json"), folders_json).unwrap();
        fs::write(dir.path().join("items.json"), items_json).unwrap();

        let script = format!(
            "#!/bin/sh\n\
             echo \"$@\" >> '{base}/calls.log'\n\
             case \"$2\" in\n\
             \x20 folders) cat '{base}/folders.json' ;;\n\
             \x20 items) cat '{base}/items.json' ;;\n\
             \x20 *) exit 1 ;;\n\
             esac\n"
        );

        let program = dir.path().join("bw");
        fs::write(&program, script).unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir, program }
    }

    /// Every recorded invocation, one line per call
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub const FOLDERS_JSON: &str = r#"[
  {"object": "folder", "id": "f-c8y", "name": "c8y"},
  {"object": "folder", "id": null, "name": "No Folder"}
]"#;

pub const ITEMS_JSON: &str = r#"[
  {
    "object": "item",
    "id": "item-nouri",
    "folderId": "f-c8y",
    "type": 1,
    "name": "Not a login",
    "fields": null,
    "login": {"uris": null, "username": "nobody", "password": "secret", "totp": null}
  },
  {
    "object": "item",
    "id": "item-acme",
    "folderId": "f-c8y",
    "type": 1,
    "name": "Acme production",
    "fields": [{"name": "tenant", "value": "acme", "type": 0, "linkedId": null}],
    "login": {
      "uris": [{"match": null, "uri": "https://acme.example.com"}],
      "username": "t123/bob",
      "password": "bob-pw",
      "totp": null
    }
  },
  {
    "object": "item",
    "id": "item-staging",
    "folderId": "f-c8y",
    "type": 1,
    "name": "Staging",
    "fields": [{"name": "mode", "value": "staging", "type": 0, "linkedId": null}],
    "login": {
      "uris": [{"match": null, "uri": "https://staging.example.com"}],
      "username": "alice",
      "password": "alice-pw",
      "totp": "JBSWY3DPEHPK3PXP"
    }
  }
]"#;
