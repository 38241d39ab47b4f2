use anyhow::{Context, Result};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::model::user::User;

/// Durable home of the single signed-in identity.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<User>>;
    fn save(&self, user: &User) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// One JSON file holding the serialized identity.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<User>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        let user = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(user))
    }

    fn save(&self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string(user)?;
        fs::write(&self.path, raw).with_context(|| format!("writing {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}

/// Keeps the serialized identity in memory; used when no session file is configured.
#[derive(Default)]
pub struct MemorySessionStorage {
    entry: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    fn entry(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.entry
            .lock()
            .map_err(|_| anyhow::anyhow!("session entry poisoned"))
    }

    pub fn raw(&self) -> Option<String> {
        self.entry().ok().and_then(|e| e.clone())
    }

    pub fn set_raw(&self, raw: impl Into<String>) -> Result<()> {
        *self.entry()? = Some(raw.into());
        Ok(())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<User>> {
        match self.entry()?.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, user: &User) -> Result<()> {
        *self.entry()? = Some(serde_json::to_string(user)?);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.entry()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::User;

    #[test]
    fn file_storage_writes_reads_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("state").join("session.json"));
        let admin = User::admin("admin@dayflow.com");

        assert_eq!(storage.load().unwrap(), None);

        storage.save(&admin).unwrap();
        assert!(storage.path().exists());
        assert_eq!(storage.load().unwrap(), Some(admin));

        storage.clear().unwrap();
        assert!(!storage.path().exists());
        // clearing twice is fine
        storage.clear().unwrap();
    }

    #[test]
    fn file_storage_reports_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        assert!(FileSessionStorage::new(path).load().is_err());
    }

    #[test]
    fn persisted_shape_is_the_identity_object() {
        let storage = MemorySessionStorage::default();
        storage.save(&User::admin("admin@dayflow.com")).unwrap();

        let value: serde_json::Value = serde_json::from_str(&storage.raw().unwrap()).unwrap();
        assert_eq!(value["id"], "admin-1");
        assert_eq!(value["role"], "admin");
        assert_eq!(value["employee_code"], "ADM001");
    }
}
