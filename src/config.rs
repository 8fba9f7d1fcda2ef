// Configuration loading and parsing (config/settings.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides the configured backend base URL.
pub const API_URL_ENV: &str = "NEXAUR_API_URL";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// settings.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire settings.toml file.
#[derive(Debug, Clone, Deserialize)]
struct SettingsFile {
    api: ApiSection,
    #[serde(default)]
    chat: ChatSection,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiSection {
    base_url: String,
    #[serde(default = "default_timeout_secs")]
    request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatSection {
    #[serde(default = "default_max_length")]
    max_length: u32,
}

impl Default for ChatSection {
    fn default() -> Self {
        ChatSection {
            max_length: default_max_length(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_length() -> u32 {
    512
}

// ---------------------------------------------------------------------------
// Assembled settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Base URL of the backend, without a trailing slash. Endpoint
    /// paths are joined onto it.
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Generation token cap sent with every `/chat` request.
    pub max_length: u32,
}

/// The public settings assembled from settings.toml, with the
/// `NEXAUR_API_URL` override already applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub chat: ChatSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api: ApiSettings {
                base_url: "http://localhost:8000".to_string(),
                request_timeout_secs: default_timeout_secs(),
            },
            chat: ChatSettings {
                max_length: default_max_length(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate settings from `config/settings.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults and does not consult the environment. Prefer
/// `load_settings()` which handles both.
pub(crate) fn load_settings_from(base_dir: &Path) -> Result<Settings, ConfigError> {
    let settings_path = base_dir.join("config").join("settings.toml");
    let settings_text = read_file(&settings_path)?;
    let file: SettingsFile =
        toml::from_str(&settings_text).map_err(|e| ConfigError::ParseError {
            path: settings_path.clone(),
            source: e,
        })?;

    let settings = Settings {
        api: ApiSettings {
            base_url: normalize_base_url(&file.api.base_url),
            request_timeout_secs: file.api.request_timeout_secs,
        },
        chat: ChatSettings {
            max_length: file.chat.max_length,
        },
    };

    validate(&settings)?;

    Ok(settings)
}

/// Ensure `config/settings.toml` exists by copying it from `defaults/`
/// when missing. Returns the list of files that were copied. Skips
/// `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        // Skip .example template files
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// The file tier of the resolution chain: copy defaults into place when
/// a `defaults/` directory is present, then read `config/settings.toml`.
/// A missing file falls back to the built-in defaults; a file that is
/// present but invalid stays a hard error.
pub(crate) fn load_or_default(base_dir: &Path) -> Result<Settings, ConfigError> {
    if base_dir.join("defaults").exists() {
        ensure_config_files(base_dir)?;
    }

    let settings_path = base_dir.join("config").join("settings.toml");
    if settings_path.exists() {
        load_settings_from(base_dir)
    } else {
        Ok(Settings::default())
    }
}

/// Load settings relative to `base_dir` with the full resolution chain:
/// `NEXAUR_API_URL` > `config/settings.toml` > built-in defaults. The
/// environment override wins unconditionally over whatever the file
/// tier produced, including when no config file exists at all.
pub(crate) fn load_settings_in(base_dir: &Path) -> Result<Settings, ConfigError> {
    let mut settings = load_or_default(base_dir)?;

    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            settings.api.base_url = normalize_base_url(&url);
        }
    }

    Ok(settings)
}

/// Convenience wrapper: loads settings relative to the current working
/// directory.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_settings_in(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let url = &settings.api.base_url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must start with http:// or https://, got `{url}`"),
        });
    }

    if settings.api.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.request_timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if settings.chat.max_length == 0 {
        return Err(ConfigError::ValidationError {
            field: "chat.max_length".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID_SETTINGS: &str = r#"
[api]
base_url = "http://localhost:8000"
request_timeout_secs = 30

[chat]
max_length = 512
"#;

    fn write_settings(tmp: &Path, content: &str) {
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("settings.toml"), content).unwrap();
    }

    #[test]
    fn load_valid_settings() {
        let tmp = std::env::temp_dir().join("settings_test_valid");
        write_settings(&tmp, VALID_SETTINGS);

        let settings = load_settings_from(&tmp).expect("should load valid settings");
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings.api.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.chat.max_length, 512);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let tmp = std::env::temp_dir().join("settings_test_minimal");
        write_settings(&tmp, "[api]\nbase_url = \"http://backend:9000\"\n");

        let settings = load_settings_from(&tmp).expect("should load minimal settings");
        assert_eq!(settings.api.base_url, "http://backend:9000");
        assert_eq!(settings.api.request_timeout_secs, 30);
        assert_eq!(settings.chat.max_length, 512);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let tmp = std::env::temp_dir().join("settings_test_slash");
        write_settings(&tmp, "[api]\nbase_url = \"http://localhost:8000/\"\n");

        let settings = load_settings_from(&tmp).unwrap();
        assert_eq!(settings.api.base_url, "http://localhost:8000");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let tmp = std::env::temp_dir().join("settings_test_no_scheme");
        write_settings(&tmp, "[api]\nbase_url = \"localhost:8000\"\n");

        let err = load_settings_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "api.base_url");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let tmp = std::env::temp_dir().join("settings_test_zero_timeout");
        write_settings(
            &tmp,
            "[api]\nbase_url = \"http://localhost:8000\"\nrequest_timeout_secs = 0\n",
        );

        let err = load_settings_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "api.request_timeout_secs");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_max_length() {
        let tmp = std::env::temp_dir().join("settings_test_zero_max_length");
        write_settings(
            &tmp,
            "[api]\nbase_url = \"http://localhost:8000\"\n\n[chat]\nmax_length = 0\n",
        );

        let err = load_settings_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "chat.max_length");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_settings_toml() {
        let tmp = std::env::temp_dir().join("settings_test_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_settings_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("settings.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = std::env::temp_dir().join("settings_test_invalid");
        write_settings(&tmp, "this is not valid [[[ toml");

        let err = load_settings_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("settings.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("settings_test_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join("settings.toml"), VALID_SETTINGS).unwrap();
        fs::write(
            defaults_dir.join("settings.toml.example"),
            "# template only\n",
        )
        .unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/settings.toml").exists());
        assert!(!tmp.join("config/settings.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("settings_test_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults/settings.toml"), VALID_SETTINGS).unwrap();
        fs::write(tmp.join("config/settings.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let content = fs::read_to_string(tmp.join("config/settings.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("settings_test_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_settings_file_falls_back_to_built_in_defaults() {
        let tmp = std::env::temp_dir().join("settings_test_fallback");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let settings = load_or_default(&tmp).expect("should fall back to defaults");
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings.chat.max_length, 512);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn invalid_settings_file_is_still_an_error() {
        let tmp = std::env::temp_dir().join("settings_test_invalid_hard_error");
        write_settings(&tmp, "this is not valid [[[ toml");

        let err = load_or_default(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("settings.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    // Both env cases live in one test: the variable is process-global
    // and the test runner is parallel.
    #[test]
    fn env_override_wins_over_file_and_missing_file() {
        let with_file = std::env::temp_dir().join("settings_test_env_file");
        write_settings(&with_file, "[api]\nbase_url = \"http://backend:9000\"\n");
        let without_file = std::env::temp_dir().join("settings_test_env_bare");
        let _ = fs::remove_dir_all(&without_file);
        fs::create_dir_all(&without_file).unwrap();

        std::env::set_var(API_URL_ENV, "http://override:7777/");

        let settings = load_settings_in(&with_file).expect("override over file");
        assert_eq!(settings.api.base_url, "http://override:7777");

        let settings = load_settings_in(&without_file).expect("override without file");
        assert_eq!(settings.api.base_url, "http://override:7777");
        assert_eq!(settings.chat.max_length, 512);

        std::env::remove_var(API_URL_ENV);
        let _ = fs::remove_dir_all(&with_file);
        let _ = fs::remove_dir_all(&without_file);
    }

    #[test]
    fn default_settings_match_shipped_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings.chat.max_length, 512);
    }
}
