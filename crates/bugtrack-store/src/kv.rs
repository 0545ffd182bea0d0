//! Key-value persistence backends.
//!
//! The bug collection lives under a single key as one JSON document.
//! `MemoryKv` keeps entries in a map; `FileKv` keeps one file per key in a
//! directory and replaces files atomically.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A string-to-string persistent map.
pub trait KeyValueStore {
    /// Read the value under `key`; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        (**self).set(key, value)
    }
}

/// In-process backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: BTreeMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory backend: key `k` is stored at `<root>/<k>.json`.
#[derive(Debug, Clone)]
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    /// Open (without creating) a directory-backed store.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing `key`.
    pub fn entry_path(&self, key: &str) -> Result<PathBuf, KvError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.entry_path(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(KvError::io(&path, err)),
        };
        validate_payload_bytes(&path, &bytes)?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| KvError::Corrupt(format!("{}: invalid UTF-8", path.display())))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        let path = self.entry_path(key)?;
        write_atomically(&path, value.as_bytes())
    }
}

fn validate_key(key: &str) -> Result<(), KvError> {
    let well_formed = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if well_formed {
        Ok(())
    } else {
        Err(KvError::InvalidKey(key.to_string()))
    }
}

fn write_atomically(path: &Path, payload: &[u8]) -> Result<(), KvError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| KvError::io(parent, e))?;
    }

    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), KvError> {
        let file = File::create(&tmp_path).map_err(|e| KvError::io(&tmp_path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(payload)
            .map_err(|e| KvError::io(&tmp_path, e))?;
        writer.flush().map_err(|e| KvError::io(&tmp_path, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| KvError::io(&tmp_path, e.into_error()))?;
        file.sync_all().map_err(|e| KvError::io(&tmp_path, e))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        KvError::Io {
            path: format!("{} -> {}", tmp_path.display(), path.display()),
            message: e.to_string(),
        }
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        let dir = File::open(parent).map_err(|e| KvError::io(parent, e))?;
        dir.sync_all().map_err(|e| KvError::io(parent, e))?;
    }

    Ok(())
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

fn validate_payload_bytes(path: &Path, bytes: &[u8]) -> Result<(), KvError> {
    if bytes.contains(&0) {
        return Err(KvError::Corrupt(format!(
            "{}: contains NUL byte(s)",
            path.display()
        )));
    }
    Ok(())
}

/// Errors from key-value backends.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("{path}: I/O error: {message}")]
    Io { path: String, message: String },

    #[error("corrupted entry: {0}")]
    Corrupt(String),

    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

impl KvError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(prefix: &str) -> Self {
            let unique = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock should be after unix epoch")
                .as_nanos();
            Self(std::env::temp_dir().join(format!(
                "bugtrack-kv-{prefix}-{}-{unique}",
                std::process::id()
            )))
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn missing_key_reads_as_none() {
        let dir = TempDir::new("missing");
        let kv = FileKv::new(&dir.0);
        assert!(kv.get("bugTracker_bugs").expect("read ok").is_none());
    }

    #[test]
    fn set_replaces_previous_value_and_survives_reopen() {
        let dir = TempDir::new("replace");
        let mut kv = FileKv::new(&dir.0);
        kv.set("bugTracker_bugs", "[1]").expect("first write");
        kv.set("bugTracker_bugs", "[2]").expect("second write");

        let reopened = FileKv::new(&dir.0);
        assert_eq!(
            reopened.get("bugTracker_bugs").expect("read ok").as_deref(),
            Some("[2]")
        );

        let leftovers: Vec<_> = fs::read_dir(&dir.0)
            .expect("dir exists")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind");
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let dir = TempDir::new("keys");
        let mut kv = FileKv::new(&dir.0);
        for key in ["", "../escape", "a/b", ".hidden"] {
            let err = kv.set(key, "x").expect_err("key must be rejected");
            assert!(matches!(err, KvError::InvalidKey(k) if k == key));
        }
    }

    #[test]
    fn nul_payload_is_reported_corrupt() {
        let dir = TempDir::new("nul");
        let kv = FileKv::new(&dir.0);
        fs::create_dir_all(&dir.0).expect("dir should be created");
        let path = kv.entry_path("bugTracker_bugs").expect("valid key");
        fs::write(&path, b"[]\0garbage").expect("fixture should write");

        match kv.get("bugTracker_bugs") {
            Err(KvError::Corrupt(message)) => assert!(message.contains("NUL")),
            other => panic!("expected corrupt entry error, got {other:?}"),
        }
    }

    #[test]
    fn non_utf8_payload_is_reported_corrupt() {
        let dir = TempDir::new("utf8");
        let kv = FileKv::new(&dir.0);
        fs::create_dir_all(&dir.0).expect("dir should be created");
        let path = kv.entry_path("bugTracker_bugs").expect("valid key");
        fs::write(&path, [0xff, 0xfe, 0xfd]).expect("fixture should write");

        assert!(matches!(
            kv.get("bugTracker_bugs"),
            Err(KvError::Corrupt(message)) if message.contains("UTF-8")
        ));
    }

    #[test]
    fn memory_kv_round_trips_values() {
        let mut kv = MemoryKv::new();
        assert!(kv.is_empty());
        kv.set("k", "v").expect("memory write");
        assert_eq!(kv.get("k").expect("memory read").as_deref(), Some("v"));
    }
}
