use tracing::info;

use crate::core::error::LauncherResult;
use crate::core::launch::{LaunchEnvironment, WindowGeometry};

use super::{AppletHost, AppletLaunch, JavaRuntime};

pub const DEFAULT_WRAPPER_CLASS: &str = "org.multimc.LegacyFrame";

/// Hosts legacy applets through a wrapper class living on the game's
/// classpath.
///
/// The wrapper's `main` receives:
/// `<appletClass> <title> <userName> <sessionId> <width> <height> <maximize>`
pub struct JvmAppletHost {
    wrapper_class: String,
}

impl JvmAppletHost {
    pub fn new(wrapper_class: impl Into<String>) -> Self {
        Self {
            wrapper_class: wrapper_class.into(),
        }
    }

    pub fn wrapper_class(&self) -> &str {
        &self.wrapper_class
    }
}

impl Default for JvmAppletHost {
    fn default() -> Self {
        Self::new(DEFAULT_WRAPPER_CLASS)
    }
}

impl AppletHost for JvmAppletHost {
    fn host_applet(
        &self,
        runtime: &dyn JavaRuntime,
        applet: &AppletLaunch,
        geometry: &WindowGeometry,
        env: &LaunchEnvironment,
    ) -> LauncherResult<()> {
        // Both must be loadable before a window is worth opening.
        runtime.resolve_class(&applet.applet_class)?;
        let wrapper = runtime.resolve_entry_point(&self.wrapper_class)?;

        info!(
            "Hosting applet {} in {} ({})",
            applet.applet_class, self.wrapper_class, geometry
        );
        runtime.invoke(&wrapper, &wrapper_args(applet, geometry), env)
    }
}

fn wrapper_args(applet: &AppletLaunch, geometry: &WindowGeometry) -> Vec<String> {
    vec![
        applet.applet_class.clone(),
        applet.window_title.clone(),
        applet.user_name.clone(),
        applet.session_id.clone(),
        geometry.width.to_string(),
        geometry.height.to_string(),
        geometry.maximize.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_args_follow_documented_order() {
        let applet = AppletLaunch {
            applet_class: "net.minecraft.client.MinecraftApplet".into(),
            window_title: "Minecraft Alpha".into(),
            user_name: "bob".into(),
            session_id: "s1".into(),
        };
        let geometry = WindowGeometry::sized(1024, 768);

        assert_eq!(
            wrapper_args(&applet, &geometry),
            vec![
                "net.minecraft.client.MinecraftApplet",
                "Minecraft Alpha",
                "bob",
                "s1",
                "1024",
                "768",
                "false"
            ]
        );
    }

    #[test]
    fn hosting_invokes_wrapper_with_applet_arguments() {
        use std::cell::RefCell;
        use std::path::PathBuf;
        use std::rc::Rc;

        use crate::core::launch::testing::{FakeRuntime, SharedRecorder};

        let recorder: SharedRecorder = Rc::new(RefCell::new(Default::default()));
        let applet = AppletLaunch {
            applet_class: "net.minecraft.client.MinecraftApplet".into(),
            window_title: "Minecraft".into(),
            user_name: "bob".into(),
            session_id: "s1".into(),
        };
        let env = LaunchEnvironment::new(PathBuf::from("/game"));
        let host = JvmAppletHost::default();

        // Without the wrapper on the classpath nothing is invoked.
        let runtime = FakeRuntime::new(recorder.clone()).with_class(&applet.applet_class, false, None);
        assert!(host
            .host_applet(&runtime, &applet, &WindowGeometry::maximized(), &env)
            .is_err());
        assert!(recorder.borrow().invocations.is_empty());

        let runtime = runtime.with_class(DEFAULT_WRAPPER_CLASS, true, None);
        host.host_applet(&runtime, &applet, &WindowGeometry::maximized(), &env)
            .unwrap();

        let recorder = recorder.borrow();
        assert_eq!(recorder.invocations.len(), 1);
        assert_eq!(recorder.invocations[0].class_name, DEFAULT_WRAPPER_CLASS);
        assert_eq!(recorder.invocations[0].args[0], applet.applet_class);
        assert_eq!(recorder.invocations[0].args[6], "true");
    }

    #[test]
    fn default_wrapper_class() {
        assert_eq!(JvmAppletHost::default().wrapper_class(), DEFAULT_WRAPPER_CLASS);
    }
}
