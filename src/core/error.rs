use std::path::PathBuf;
use thiserror::Error;

/// Exit code for failures while reading the launch script.
pub const PROTOCOL_FAILURE: i32 = 1;
/// Exit code for failures once a launch attempt has started.
pub const LAUNCH_FAILURE: i32 = -1;

/// Central error type for the launch helper.
/// Every module returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── Protocol ────────────────────────────────────────
    #[error("Error while parsing: {0}")]
    ProtocolParse(String),

    #[error("Invalid launcher type: {0}")]
    UnknownLauncherType(String),

    #[error("No valid launcher implementation specified")]
    NoLauncherSelected,

    // ── Parameters ──────────────────────────────────────
    #[error("Missing launch parameter: {0}")]
    MissingParameter(String),

    // ── Launch ──────────────────────────────────────────
    #[error("Classpath assembly failed: {0}")]
    ClasspathAssemblyFailed(String),

    #[error("Failed to extract native library {archive:?}: {reason}")]
    NativeExtractionFailed { archive: PathBuf, reason: String },

    #[error("Cannot resolve entry point {class}: {reason}")]
    EntryPointResolutionFailed { class: String, reason: String },

    #[error("Cannot start the runtime for {class}: {reason}")]
    SpawnFailed { class: String, reason: String },

    /// The entry point ran and then failed.
    #[error("Invocation of {class} failed: {reason}")]
    InvocationFailed { class: String, reason: String },

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Archive ─────────────────────────────────────────
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ── Settings ────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Settings(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl LauncherError {
    /// Process exit code for this failure.
    ///
    /// Anything raised before a coordinator takes over is a protocol-stage
    /// failure; everything else belongs to the launch attempt.
    pub fn exit_code(&self) -> i32 {
        match self {
            LauncherError::ProtocolParse(_)
            | LauncherError::UnknownLauncherType(_)
            | LauncherError::NoLauncherSelected
            | LauncherError::Io { .. }
            | LauncherError::Json(_)
            | LauncherError::Settings(_) => PROTOCOL_FAILURE,
            _ => LAUNCH_FAILURE,
        }
    }
}

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_errors_map_to_protocol_exit_code() {
        assert_eq!(
            LauncherError::ProtocolParse("foo".into()).exit_code(),
            PROTOCOL_FAILURE
        );
        assert_eq!(LauncherError::NoLauncherSelected.exit_code(), PROTOCOL_FAILURE);
        assert_eq!(
            LauncherError::UnknownLauncherType("legacy".into()).exit_code(),
            PROTOCOL_FAILURE
        );
    }

    #[test]
    fn launch_errors_map_to_launch_exit_code() {
        assert_eq!(
            LauncherError::MissingParameter("cp".into()).exit_code(),
            LAUNCH_FAILURE
        );
        assert_eq!(
            LauncherError::InvocationFailed {
                class: "a.B".into(),
                reason: "exit 1".into()
            }
            .exit_code(),
            LAUNCH_FAILURE
        );
        assert_eq!(
            LauncherError::SpawnFailed {
                class: "a.B".into(),
                reason: "No such file or directory".into()
            }
            .exit_code(),
            LAUNCH_FAILURE
        );
    }
}
