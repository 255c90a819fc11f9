use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::jvm::applet::DEFAULT_WRAPPER_CLASS;

const APP_DIR_NAME: &str = "onesix-launcher";
const SETTINGS_FILE: &str = "settings.json";

pub const SETTINGS_ENV: &str = "ONESIX_SETTINGS";
pub const JAVA_ENV: &str = "ONESIX_JAVA";

pub const DEFAULT_LOG_FILTER: &str = "info,onesix_launcher=debug";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    pub java_path: Option<PathBuf>,
    pub jvm_args: Vec<String>,
    pub applet_wrapper_class: String,
    pub log_filter: Option<String>,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            java_path: None,
            jvm_args: Vec::new(),
            applet_wrapper_class: DEFAULT_WRAPPER_CLASS.to_string(),
            log_filter: None,
        }
    }
}

impl LauncherSettings {
    /// Load settings from the first source that exists: the explicit path,
    /// `ONESIX_SETTINGS`, then the per-user config file. `ONESIX_JAVA`
    /// overrides the configured java binary.
    pub fn load(explicit: Option<&Path>) -> LauncherResult<Self> {
        let env_path = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
        let mut settings = match settings_path(explicit, env_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(java) = std::env::var_os(JAVA_ENV) {
            if !java.is_empty() {
                settings.java_path = Some(PathBuf::from(java));
            }
        }

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> LauncherResult<Self> {
        debug!("Reading settings from {}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|e| LauncherError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: LauncherSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> LauncherResult<()> {
        if self.applet_wrapper_class.trim().is_empty() {
            return Err(LauncherError::Settings(
                "applet_wrapper_class must not be empty".into(),
            ));
        }
        if self.jvm_args.iter().any(|arg| arg.is_empty()) {
            return Err(LauncherError::Settings("jvm_args contains an empty argument".into()));
        }
        Ok(())
    }

    /// Java binary to spawn: the configured path, then `$JAVA_HOME`, then
    /// whatever `java` the search path finds.
    pub fn java_binary(&self) -> PathBuf {
        let java_home = std::env::var_os("JAVA_HOME").map(PathBuf::from);
        java_binary_from(self.java_path.as_deref(), java_home.as_deref())
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

fn settings_path(explicit: Option<&Path>, env_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_path.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }
    default_settings_file().filter(|path| path.is_file())
}

fn default_settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE))
}

fn java_exe() -> &'static str {
    if cfg!(windows) {
        "java.exe"
    } else {
        "java"
    }
}

fn java_binary_from(configured: Option<&Path>, java_home: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        return path.to_path_buf();
    }
    match java_home.filter(|home| !home.as_os_str().is_empty()) {
        Some(home) => home.join("bin").join(java_exe()),
        None => PathBuf::from(java_exe()),
    }
}
