// ─── OneSix Launcher ───
// Turns the accumulated launch script into a running game: classpath, mod
// scan, natives, then the launch strategy the traits ask for.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::core::error::{LauncherResult, LAUNCH_FAILURE};
use crate::core::jvm::{AppletHost, JavaRuntime, JvmAppletHost, JvmRuntime};
use crate::core::mods::{scan_mods, ModScan};
use crate::core::natives::{stage_natives, ArchClass};
use crate::core::params::ParamBucket;
use crate::core::settings::LauncherSettings;

use super::environment::LaunchEnvironment;
use super::params::LaunchParameters;
use super::strategy::LaunchStrategy;
use super::Launcher;

pub const LAUNCHER_NAME: &str = "onesix";

pub struct OneSixLauncher {
    runtime: Box<dyn JavaRuntime>,
    applet_host: Box<dyn AppletHost>,
}

/// A launch that made it through preparation and only needs running.
struct PreparedLaunch {
    launch: LaunchParameters,
    strategy: LaunchStrategy,
    args: Vec<String>,
    env: LaunchEnvironment,
}

impl OneSixLauncher {
    pub fn new(runtime: Box<dyn JavaRuntime>, applet_host: Box<dyn AppletHost>) -> Self {
        Self {
            runtime,
            applet_host,
        }
    }

    pub fn from_settings(settings: &LauncherSettings) -> Self {
        Self::new(
            Box::new(JvmRuntime::from_settings(settings)),
            Box::new(JvmAppletHost::new(settings.applet_wrapper_class.clone())),
        )
    }

    fn prepare(&mut self, params: &ParamBucket) -> LauncherResult<PreparedLaunch> {
        let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        // get and process the launch script params
        let launch = LaunchParameters::from_bucket(params, working_dir).map_err(|e| {
            error!("Not enough arguments.");
            e
        })?;

        self.runtime
            .add_to_class_path(&launch.class_path_entries())
            .map_err(|e| {
                error!("Halting launch due to previous errors.");
                e
            })?;

        let scan = scan_mods(&launch.mods);
        let mut args = launch.mc_params.clone();
        args.extend(scan.tweak_args());

        let mut env = LaunchEnvironment::new(launch.working_dir.clone());
        env.set_core_plugins(&scan.core_plugins);

        print_stats(&launch, &scan, &args);

        info!("Preparing native libraries...");
        let arch = ArchClass::from_reported(&self.runtime.reported_arch());
        stage_natives(&launch.native_archives, &launch.natives_dir, arch)?;
        env.set_native_path(&launch.natives_dir);

        let strategy = LaunchStrategy::select(&launch.traits);
        Ok(PreparedLaunch {
            launch,
            strategy,
            args,
            env,
        })
    }
}

impl Launcher for OneSixLauncher {
    fn launch(&mut self, params: &ParamBucket) -> i32 {
        let prepared = match self.prepare(params) {
            Ok(prepared) => prepared,
            Err(e) => {
                error!("{}", e);
                return LAUNCH_FAILURE;
            }
        };

        info!("Launching with the {:?} strategy", prepared.strategy);
        prepared.strategy.run(
            self.runtime.as_ref(),
            self.applet_host.as_ref(),
            &prepared.launch,
            prepared.args,
            prepared.env,
        )
    }
}

fn print_stats(launch: &LaunchParameters, scan: &ModScan, args: &[String]) {
    info!("Main Class:");
    info!("  {}", launch.main_class);

    info!("Native path:");
    info!("  {}", launch.natives_dir.display());

    info!("Traits:");
    info!("  {:?}", launch.traits);

    info!("Libraries:");
    for lib in &launch.libraries {
        if Path::new(lib).exists() {
            info!("  {}", lib);
        } else {
            warn!("  {} (missing)", lib);
        }
    }

    print_list("Class Path Mods:", &launch.mods);
    print_list("LiteLoader Mods:", &launch.litemods);
    print_list("Scanned Tweakers:", &scan.tweakers);
    print_list("Scanned CoreMods:", &scan.core_plugins);

    info!("Params:");
    info!("  {:?}", args);
    info!("Window size: {}", launch.geometry);
}

fn print_list(title: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    info!("{}", title);
    for entry in entries {
        info!("  {}", entry);
    }
}
