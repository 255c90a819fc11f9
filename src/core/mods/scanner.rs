// ─── Mod Metadata Scanner ───
// Reads manifests of class-path mods and picks up cascading tweakers and
// FML core plugins.

use std::path::Path;

use tracing::debug;

use super::manifest::read_manifest;

pub const TWEAK_CLASS_ATTRIBUTE: &str = "TweakClass";
pub const CORE_PLUGIN_ATTRIBUTE: &str = "FMLCorePlugin";

/// What a single mod archive contributes to the launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModDescriptor {
    Tweaker(String),
    CorePlugin(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModScan {
    pub tweakers: Vec<String>,
    pub core_plugins: Vec<String>,
}

impl ModScan {
    /// `--tweakClass <name>` per tweaker, in discovery order.
    pub fn tweak_args(&self) -> Vec<String> {
        self.tweakers
            .iter()
            .flat_map(|tweaker| ["--tweakClass".to_string(), tweaker.clone()])
            .collect()
    }
}

/// Classify one archive. Unreadable archives and archives without a
/// manifest yield `None`.
pub fn describe_mod(archive: &Path) -> Option<ModDescriptor> {
    let manifest = match read_manifest(archive) {
        Ok(Some(manifest)) => manifest,
        Ok(None) => return None,
        Err(e) => {
            debug!("Not scanning {:?}: {}", archive, e);
            return None;
        }
    };

    // A tweaker takes over loading, so its core plugin attribute is moot.
    if let Some(tweaker) = manifest.get(TWEAK_CLASS_ATTRIBUTE) {
        return Some(ModDescriptor::Tweaker(tweaker.to_string()));
    }

    manifest
        .get(CORE_PLUGIN_ATTRIBUTE)
        .map(|plugin| ModDescriptor::CorePlugin(plugin.to_string()))
}

pub fn scan_mods(mods: &[String]) -> ModScan {
    let mut scan = ModScan::default();

    for modfile in mods {
        match describe_mod(Path::new(modfile)) {
            Some(ModDescriptor::Tweaker(tweaker)) => scan.tweakers.push(tweaker),
            Some(ModDescriptor::CorePlugin(plugin)) => scan.core_plugins.push(plugin),
            None => {}
        }
    }

    scan
}
