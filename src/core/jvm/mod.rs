// ─── Late-bound invocation ───
// The game's entry point is only known by name. `JavaRuntime` is the seam
// between the launch logic and whatever actually loads and runs Java code;
// `JvmRuntime` does it by spawning a `java` process.

pub mod applet;
pub mod classfile;
pub mod probe;
pub mod runtime;

use std::path::PathBuf;

pub use applet::JvmAppletHost;
pub use runtime::JvmRuntime;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::{LaunchEnvironment, WindowGeometry};

/// A class found on the runtime's classpath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClass {
    pub name: String,
    /// Jar or directory the class was loaded from.
    pub origin: PathBuf,
    pub has_main: bool,
    pub base_dir_field: Option<String>,
}

impl ResolvedClass {
    /// The class' static `main(String[])`.
    pub fn entry_point(&self) -> LauncherResult<EntryPoint> {
        if !self.has_main {
            return Err(LauncherError::EntryPointResolutionFailed {
                class: self.name.clone(),
                reason: "no public static main(String[]) method".into(),
            });
        }
        Ok(EntryPoint {
            class_name: self.name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub class_name: String,
}

pub trait JavaRuntime {
    /// Architecture string as the runtime reports it (`os.arch`).
    fn reported_arch(&self) -> String;

    /// Append entries to the classpath used for resolution and invocation.
    fn add_to_class_path(&mut self, paths: &[String]) -> LauncherResult<()>;

    fn resolve_class(&self, class_name: &str) -> LauncherResult<ResolvedClass>;

    /// Run `entry` with `args` and block until it returns.
    fn invoke(
        &self,
        entry: &EntryPoint,
        args: &[String],
        env: &LaunchEnvironment,
    ) -> LauncherResult<()>;

    fn resolve_entry_point(&self, class_name: &str) -> LauncherResult<EntryPoint> {
        self.resolve_class(class_name)?.entry_point()
    }
}

/// What the legacy strategy hands to the windowing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppletLaunch {
    pub applet_class: String,
    pub window_title: String,
    pub user_name: String,
    pub session_id: String,
}

/// Hosts an applet-style client inside a window.
///
/// `InvocationFailed` means the applet started and the game later failed.
/// Any other error means nothing was started.
pub trait AppletHost {
    fn host_applet(
        &self,
        runtime: &dyn JavaRuntime,
        applet: &AppletLaunch,
        geometry: &WindowGeometry,
        env: &LaunchEnvironment,
    ) -> LauncherResult<()>;
}
