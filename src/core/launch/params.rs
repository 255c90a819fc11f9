use std::fmt;
use std::path::PathBuf;

use crate::core::error::LauncherResult;
use crate::core::params::ParamBucket;

pub const DEFAULT_MAIN_CLASS: &str = "net.minecraft.client.Minecraft";
pub const DEFAULT_APPLET_CLASS: &str = "net.minecraft.client.MinecraftApplet";
pub const DEFAULT_WINDOW_TITLE: &str = "Minecraft";
pub const DEFAULT_WINDOW_PARAMS: &str = "854x480";

/// Traits that route a launch through the applet wrapper.
pub const LEGACY_TRAITS: [&str; 2] = ["legacyLaunch", "alphaLaunch"];

/// Window size requested by the parent process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub maximize: bool,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self::sized(854, 480)
    }
}

impl WindowGeometry {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            maximize: false,
        }
    }

    pub fn maximized() -> Self {
        Self {
            maximize: true,
            ..Self::default()
        }
    }

    /// `max` (any case) or `<width>x<height>`. Anything else, including
    /// zero sizes, silently becomes 854x480.
    pub fn parse(spec: &str) -> Self {
        if spec.eq_ignore_ascii_case("max") {
            return Self::maximized();
        }

        let parts: Vec<&str> = spec.split('x').collect();
        if let [width, height] = parts.as_slice() {
            if let (Ok(width), Ok(height)) = (width.parse::<u32>(), height.parse::<u32>()) {
                if width > 0 && height > 0 {
                    return Self::sized(width, height);
                }
            }
        }

        Self::default()
    }
}

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.maximize {
            write!(f, "max (if available)")
        } else {
            write!(f, "{} x {}", self.width, self.height)
        }
    }
}

/// Everything the OneSix launcher reads out of the launch script.
#[derive(Debug, Clone)]
pub struct LaunchParameters {
    pub libraries: Vec<String>,
    pub native_archives: Vec<String>,
    pub mc_params: Vec<String>,
    pub mods: Vec<String>,
    pub litemods: Vec<String>,
    pub traits: Vec<String>,
    pub main_class: String,
    pub applet_class: String,
    pub natives_dir: PathBuf,
    pub user_name: String,
    pub session_id: String,
    pub window_title: String,
    pub geometry: WindowGeometry,
    pub working_dir: PathBuf,
}

impl LaunchParameters {
    pub fn from_bucket(params: &ParamBucket, working_dir: PathBuf) -> LauncherResult<Self> {
        let window_params = params.first_or("windowParams", DEFAULT_WINDOW_PARAMS);

        Ok(Self {
            libraries: params.all("cp")?.to_vec(),
            native_archives: params.all_or("ext", Vec::new()),
            mc_params: params.all_or("param", Vec::new()),
            mods: params.all_or("mods", Vec::new()),
            litemods: params.all_or("litemods", Vec::new()),
            traits: params.all_or("traits", Vec::new()),
            main_class: params.first_or("mainClass", DEFAULT_MAIN_CLASS),
            applet_class: params.first_or("appletClass", DEFAULT_APPLET_CLASS),
            natives_dir: PathBuf::from(params.first("natives")?),
            user_name: params.first("userName")?.to_string(),
            session_id: params.first("sessionId")?.to_string(),
            window_title: params.first_or("windowTitle", DEFAULT_WINDOW_TITLE),
            geometry: WindowGeometry::parse(&window_params),
            working_dir,
        })
    }

    /// Order handed to the classpath: mods, libraries, litemods.
    pub fn class_path_entries(&self) -> Vec<String> {
        let mut all =
            Vec::with_capacity(self.mods.len() + self.libraries.len() + self.litemods.len());
        all.extend(self.mods.iter().cloned());
        all.extend(self.libraries.iter().cloned());
        all.extend(self.litemods.iter().cloned());
        all
    }
}
