use std::collections::BTreeMap;
use std::fs;

use crate::errors::Result;
use crate::home::Home;

use super::ProcessRecord;

/// Durable mapping from record id to [`ProcessRecord`], kept as a single
/// pretty-printed JSON file under the home directory.
///
/// Every CLI invocation does a full read-modify-write of this file. There is
/// no cross-process locking, so concurrent invocations race last-writer-wins;
/// the atomic rename on save only protects against torn writes.
#[derive(Clone, Debug)]
pub struct Store {
    home: Home,
}

impl Store {
    pub fn new(home: Home) -> Self {
        Store { home }
    }

    pub fn home(&self) -> &Home {
        &self.home
    }

    /// Load the registry. A missing or unreadable file yields an empty map;
    /// read problems never propagate.
    pub fn load(&self) -> BTreeMap<String, ProcessRecord> {
        let path = self.home.processes_file();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("could not read registry {}: {err}", path.display());
                }
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                log::warn!("corrupt registry {}: {err}", path.display());
                BTreeMap::new()
            }
        }
    }

    /// Persist the full registry, overwriting the previous contents.
    ///
    /// Writes to a temporary sibling first and renames it into place so an
    /// interrupted write never leaves a half-written registry behind. Unlike
    /// `load`, failures here propagate: a persist must not silently no-op.
    pub fn save(&self, records: &BTreeMap<String, ProcessRecord>) -> Result<()> {
        self.home.ensure()?;

        let path = self.home.processes_file();
        let tmp = path.with_extension("json.tmp");
        let encoded = serde_json::to_string_pretty(records)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;

        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
