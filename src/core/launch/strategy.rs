// ─── Launch Strategies ───
// Legacy clients run inside the applet wrapper (falling back to their static
// main); everything else gets its main method called directly.

use tracing::{error, info, warn};

use crate::core::error::{LauncherError, LauncherResult, LAUNCH_FAILURE};
use crate::core::jvm::{AppletHost, AppletLaunch, JavaRuntime};

use super::environment::{LaunchEnvironment, APPLET_TARGET_DIR_PROPERTY};
use super::params::{LaunchParameters, WindowGeometry, LEGACY_TRAITS};
use super::safe_path_str;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStrategy {
    Legacy,
    Modern,
}

impl LaunchStrategy {
    pub fn select(traits: &[String]) -> Self {
        if traits.iter().any(|t| LEGACY_TRAITS.contains(&t.as_str())) {
            LaunchStrategy::Legacy
        } else {
            LaunchStrategy::Modern
        }
    }

    /// Run the strategy. 0 on success, -1 on any failure.
    pub fn run(
        self,
        runtime: &dyn JavaRuntime,
        host: &dyn AppletHost,
        launch: &LaunchParameters,
        args: Vec<String>,
        mut env: LaunchEnvironment,
    ) -> i32 {
        let result = match self {
            LaunchStrategy::Legacy => legacy_launch(runtime, host, launch, &mut env),
            LaunchStrategy::Modern => modern_launch(runtime, launch, args, &env),
        };

        match result {
            Ok(()) => 0,
            Err(e) => {
                error!("{}", e);
                LAUNCH_FAILURE
            }
        }
    }
}

pub fn legacy_launch(
    runtime: &dyn JavaRuntime,
    host: &dyn AppletHost,
    launch: &LaunchParameters,
    env: &mut LaunchEnvironment,
) -> LauncherResult<()> {
    // Get the Minecraft class and point its base folder at the working directory
    let main_class = runtime.resolve_class(&launch.main_class).map_err(|e| {
        error!("Could not set base folder. Failed to find/access Minecraft main class:");
        e
    })?;

    let cwd = safe_path_str(&launch.working_dir);
    match main_class.base_dir_field.as_deref() {
        Some(field) => info!("Base folder field {}.{} -> {}", main_class.name, field, cwd),
        None => warn!("Could not find Minecraft path field."),
    }
    env.working_dir = launch.working_dir.clone();
    env.set_property(APPLET_TARGET_DIR_PROPERTY, cwd);

    let applet = AppletLaunch {
        applet_class: launch.applet_class.clone(),
        window_title: launch.window_title.clone(),
        user_name: launch.user_name.clone(),
        session_id: launch.session_id.clone(),
    };

    info!("Launching with applet wrapper...");
    let wrapper_error = match host.host_applet(runtime, &applet, &launch.geometry, env) {
        Ok(()) => return Ok(()),
        // The game ran inside the wrapper; starting it again is not a fallback.
        Err(e @ LauncherError::InvocationFailed { .. }) => return Err(e),
        Err(e) => e,
    };

    error!("Applet wrapper failed: {}", wrapper_error);
    info!("Falling back to compatibility mode.");

    let mc_args = vec![launch.user_name.clone(), launch.session_id.clone()];
    main_class
        .entry_point()
        .and_then(|entry| runtime.invoke(&entry, &mc_args, env))
        .map_err(|e| {
            error!("Failed to invoke the Minecraft main class:");
            match e {
                LauncherError::InvocationFailed { .. } => e,
                other => LauncherError::InvocationFailed {
                    class: launch.main_class.clone(),
                    reason: other.to_string(),
                },
            }
        })
}

/// Window arguments for clients that take them on the command line.
pub fn geometry_args(geometry: &WindowGeometry) -> Vec<String> {
    // There is no reliable way to ask these clients for a maximized window;
    // `--fullscreen` breaks some multi-monitor setups.
    if geometry.maximize {
        return Vec::new();
    }
    vec![
        "--width".into(),
        geometry.width.to_string(),
        "--height".into(),
        geometry.height.to_string(),
    ]
}

pub fn modern_launch(
    runtime: &dyn JavaRuntime,
    launch: &LaunchParameters,
    mut args: Vec<String>,
    env: &LaunchEnvironment,
) -> LauncherResult<()> {
    args.extend(geometry_args(&launch.geometry));

    let entry = runtime.resolve_entry_point(&launch.main_class).map_err(|e| {
        error!("Failed to find Minecraft main class:");
        e
    })?;

    runtime.invoke(&entry, &args, env).map_err(|e| {
        error!("Failed to start Minecraft:");
        e
    })
}
