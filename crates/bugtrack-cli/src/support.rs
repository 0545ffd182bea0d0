use bugtrack_store::{BUGS_KEY, BugRecord, BugStore, DEFAULT_MAX_SCREENSHOT_BYTES, FileKv};
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Display;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_STORE_DIR: &str = ".bugtrack";
pub const DEFAULT_TEAM: &[&str] = &[
    "John Doe",
    "Jane Smith",
    "Mike Johnson",
    "Sarah Wilson",
    "Alex Chen",
];

/// Value that clears an assignment when passed to `assign`.
pub const UNASSIGNED: &str = "unassigned";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    storage: StorageSection,
    team: TeamSection,
    screenshot: ScreenshotSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StorageSection {
    dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TeamSection {
    members: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ScreenshotSection {
    max_bytes: Option<u64>,
}

/// Effective settings after merging flags, environment, config, and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub team: Vec<String>,
    pub max_screenshot_bytes: u64,
}

impl Settings {
    /// Merge a config file (if present) with an optional store-dir override.
    pub fn load(config_path: &Path, store_dir_override: Option<&str>) -> Result<Self, ConfigError> {
        let file = read_config_file(config_path)?;
        let store_dir = store_dir_override
            .map(str::to_string)
            .or(file.storage.dir)
            .unwrap_or_else(|| DEFAULT_STORE_DIR.to_string());
        let team = file
            .team
            .members
            .unwrap_or_else(|| DEFAULT_TEAM.iter().map(|m| m.to_string()).collect());
        Ok(Self {
            store_dir: PathBuf::from(store_dir),
            team,
            max_screenshot_bytes: file
                .screenshot
                .max_bytes
                .unwrap_or(DEFAULT_MAX_SCREENSHOT_BYTES),
        })
    }

    /// File backing the bug collection.
    pub fn store_path(&self) -> PathBuf {
        self.store_dir.join(format!("{BUGS_KEY}.json"))
    }

    pub fn is_team_member(&self, name: &str) -> bool {
        self.team.is_empty() || self.team.iter().any(|member| member == name)
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(ConfigFile::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_settings_or_exit(config: &str, store_dir: Option<&str>) -> Settings {
    Settings::load(Path::new(config), store_dir).unwrap_or_else(|e| exit_with(e))
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

pub fn open_store(settings: &Settings) -> BugStore<FileKv> {
    BugStore::new(FileKv::new(&settings.store_dir))
}

pub fn exit_with(err: impl Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}

pub fn print_json(payload: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).unwrap_or_else(|e| exit_with(e))
    );
}

pub fn bug_json(bug: &BugRecord) -> Value {
    serde_json::to_value(bug).unwrap_or_else(|e| exit_with(e))
}

/// One-line summary used by list-style output.
pub fn bug_line(bug: &BugRecord) -> String {
    let assignee = bug.assigned_to.as_deref().unwrap_or("unassigned");
    format!(
        "{} [{} {}] {} (reporter: {}, assignee: {})",
        bug.id, bug.status, bug.priority, bug.title, bug.reporter, assignee
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_config(contents: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "bugtrack-config-{}-{unique}.toml",
            std::process::id()
        ));
        fs::write(&path, contents).expect("config fixture should write");
        path
    }

    #[test]
    fn missing_config_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/bugtrack.toml"), None)
            .expect("missing config is not an error");
        assert_eq!(settings.store_dir, PathBuf::from(DEFAULT_STORE_DIR));
        assert_eq!(settings.team.len(), DEFAULT_TEAM.len());
        assert_eq!(settings.max_screenshot_bytes, DEFAULT_MAX_SCREENSHOT_BYTES);
    }

    #[test]
    fn override_beats_config_file() {
        let path = temp_config(
            r#"
[storage]
dir = "from-config"

[team]
members = ["Ana"]

[screenshot]
max_bytes = 1024
"#,
        );

        let from_file = Settings::load(&path, None).expect("config should parse");
        assert_eq!(from_file.store_dir, PathBuf::from("from-config"));
        assert_eq!(from_file.team, vec!["Ana".to_string()]);
        assert_eq!(from_file.max_screenshot_bytes, 1024);
        assert!(from_file.is_team_member("Ana"));
        assert!(!from_file.is_team_member("Bo"));

        let overridden = Settings::load(&path, Some("from-flag")).expect("config should parse");
        assert_eq!(overridden.store_dir, PathBuf::from("from-flag"));
        assert_eq!(
            overridden.store_path(),
            PathBuf::from("from-flag").join("bugTracker_bugs.json")
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let path = temp_config("[storage]\ndirectory = \"typo\"\n");
        let err = Settings::load(&path, None).expect_err("typo key must fail");
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_roster_allows_anyone() {
        let path = temp_config("[team]\nmembers = []\n");
        let settings = Settings::load(&path, None).expect("config should parse");
        assert!(settings.is_team_member("Anyone"));
        let _ = fs::remove_file(path);
    }
}
