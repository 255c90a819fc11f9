pub mod environment;
pub mod onesix;
pub mod params;
pub mod strategy;

use std::path::Path;

pub use environment::LaunchEnvironment;
pub use onesix::OneSixLauncher;
pub use params::{LaunchParameters, WindowGeometry};
pub use strategy::LaunchStrategy;

use crate::core::params::ParamBucket;

/// A launch coordinator selected with `launcher <name>`.
pub trait Launcher {
    /// Launch with the accumulated parameters and return the exit code.
    fn launch(&mut self, params: &ParamBucket) -> i32;
}

/// Convert path to string, stripping the `\\?\` prefix canonicalization adds
/// on Windows.
pub fn safe_path_str(path: &Path) -> String {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let text = resolved.to_string_lossy().to_string();

    #[cfg(target_os = "windows")]
    {
        // Java fails to load natives from extended-length paths.
        if let Some(stripped) = text.strip_prefix(r"\\?\") {
            return stripped.to_string();
        }
    }

    text
}
