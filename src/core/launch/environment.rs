use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::safe_path_str;

pub const CORE_MODS_PROPERTY: &str = "fml.coreMods.load";
pub const APPLET_TARGET_DIR_PROPERTY: &str = "minecraft.applet.TargetDirectory";

/// Native search path properties, one per binding layer that reads its own.
pub const NATIVE_PATH_PROPERTIES: [&str; 3] = [
    "java.library.path",
    "org.lwjgl.librarypath",
    "net.java.games.input.librarypath",
];

/// The environment the game's entry point runs in.
///
/// Built up while the launch is prepared and handed to the runtime as a
/// value; nothing here touches this process' own environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchEnvironment {
    pub working_dir: PathBuf,
    /// Passed to the runtime as `-Dkey=value`.
    pub system_properties: IndexMap<String, String>,
    pub vars: IndexMap<String, String>,
}

impl LaunchEnvironment {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            ..Self::default()
        }
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.system_properties.insert(key.into(), value.into());
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.system_properties.get(key).map(String::as_str)
    }

    /// Advertise scanned core plugins, comma-joined.
    pub fn set_core_plugins(&mut self, plugins: &[String]) {
        self.set_property(CORE_MODS_PROPERTY, plugins.join(","));
    }

    /// Point every native lookup mechanism at `natives_dir`.
    pub fn set_native_path(&mut self, natives_dir: &Path) {
        let native_path = safe_path_str(natives_dir);
        for property in NATIVE_PATH_PROPERTIES {
            self.set_property(property, native_path.clone());
        }

        if let Some(var_name) = native_search_var() {
            let inherited = std::env::var(var_name).ok();
            let merged = prepend_search_path(&native_path, inherited.as_deref());
            self.set_var(var_name, merged);
        }
    }
}

fn native_search_var() -> Option<&'static str> {
    if cfg!(target_os = "windows") {
        Some("PATH")
    } else if cfg!(target_os = "linux") {
        Some("LD_LIBRARY_PATH")
    } else if cfg!(target_os = "macos") {
        Some("DYLD_LIBRARY_PATH")
    } else {
        None
    }
}

/// Natives first, then whatever search path the helper inherited.
fn prepend_search_path(natives: &str, inherited: Option<&str>) -> String {
    let separator = if cfg!(target_os = "windows") {
        ";"
    } else {
        ":"
    };
    match inherited {
        Some(existing) if !existing.trim().is_empty() => {
            format!("{}{}{}", natives, separator, existing)
        }
        _ => natives.to_string(),
    }
}
