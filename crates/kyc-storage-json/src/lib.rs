//! File-backed key-value store for wizard drafts.
//!
//! All keys live in one JSON object on disk. Every write rewrites the whole
//! file through a temp file and a rename, so a crash mid-write leaves the
//! previous snapshot intact. Concurrent processes are last-write-wins.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::Utc;
use kyc_core::{CoreError, KeyValueStore};

pub const STORE_FILE_NAME: &str = "draft-store.json";

const TMP_SUFFIX: &str = "tmp";
const QUARANTINE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

type Entries = BTreeMap<String, String>;

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store at `<data_dir>/draft-store.json`. Creates the directory.
    pub fn in_dir(data_dir: &Path) -> Result<Self, CoreError> {
        fs::create_dir_all(data_dir)?;
        Ok(Self::at_path(data_dir.join(STORE_FILE_NAME)))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw snapshot of every key, mainly for diagnostics and tests.
    pub fn entries(&self) -> Result<BTreeMap<String, String>, CoreError> {
        let _guard = self.guard()?;
        read_entries(&self.path)
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, CoreError> {
        self.lock
            .lock()
            .map_err(|_| CoreError::Storage("draft store lock poisoned".into()))
    }

    /// Reads entries for a write. A corrupt file is moved aside so the
    /// applicant can keep saving.
    fn entries_for_write(&self) -> Result<Entries, CoreError> {
        match read_entries(&self.path) {
            Ok(entries) => Ok(entries),
            Err(CoreError::Serde(reason)) => {
                let aside = quarantine_path(&self.path);
                tracing::warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    %reason,
                    "Draft store is corrupt, starting a new one"
                );
                fs::rename(&self.path, &aside)?;
                Ok(Entries::new())
            }
            Err(err) => Err(err),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(entries)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let _guard = self.guard()?;
        Ok(read_entries(&self.path)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let _guard = self.guard()?;
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), CoreError> {
        let _guard = self.guard()?;
        let mut entries = self.entries_for_write()?;
        for (key, value) in pairs {
            entries.insert(key.to_string(), value.to_string());
        }
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let _guard = self.guard()?;
        let mut entries = self.entries_for_write()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            };
        }
        self.write_entries(&entries)
    }
}

fn read_entries(path: &Path) -> Result<Entries, CoreError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
        Err(err) => return Err(err.into()),
    };
    if data.trim().is_empty() {
        return Ok(Entries::new());
    }
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn quarantine_path(path: &Path) -> PathBuf {
    let stamp = Utc::now().format(QUARANTINE_TIMESTAMP_FORMAT);
    let mut aside = path.to_path_buf();
    aside.set_extension(format!("corrupt-{stamp}.json"));
    aside
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
