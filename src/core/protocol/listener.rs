// ─── Control Protocol Listener ───
// Reads the launch script line by line until `launch`, `abort` or end of
// input. Values accumulate in a ParamBucket; `launcher <name>` picks the
// coordinator that gets to run it.

use std::io::BufRead;

use tracing::{debug, error, info};

use crate::core::error::{LauncherError, LauncherResult, PROTOCOL_FAILURE};
use crate::core::launch::onesix::LAUNCHER_NAME;
use crate::core::launch::{Launcher, OneSixLauncher};
use crate::core::params::ParamBucket;
use crate::core::settings::LauncherSettings;

/// Creates coordinators by the name given in `launcher <name>`.
pub trait LauncherRegistry {
    fn create(&self, name: &str) -> LauncherResult<Box<dyn Launcher>>;
}

impl<F> LauncherRegistry for F
where
    F: Fn(&str) -> LauncherResult<Box<dyn Launcher>>,
{
    fn create(&self, name: &str) -> LauncherResult<Box<dyn Launcher>> {
        self(name)
    }
}

/// Knows only the OneSix coordinator.
pub struct DefaultRegistry {
    settings: LauncherSettings,
}

impl DefaultRegistry {
    pub fn new(settings: LauncherSettings) -> Self {
        Self { settings }
    }
}

impl LauncherRegistry for DefaultRegistry {
    fn create(&self, name: &str) -> LauncherResult<Box<dyn Launcher>> {
        if name == LAUNCHER_NAME {
            Ok(Box::new(OneSixLauncher::from_settings(&self.settings)))
        } else {
            Err(LauncherError::UnknownLauncherType(name.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Proceed,
    Launch,
    Abort,
}

pub struct Listener<R: LauncherRegistry> {
    registry: R,
    params: ParamBucket,
    launcher: Option<Box<dyn Launcher>>,
}

impl<R: LauncherRegistry> Listener<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            params: ParamBucket::new(),
            launcher: None,
        }
    }

    pub fn params(&self) -> &ParamBucket {
        &self.params
    }

    /// Handle one line of the launch script.
    pub fn parse_line(&mut self, line: &str) -> LauncherResult<Action> {
        let Some((command, rest)) = line.split_once(' ') else {
            return match line {
                "launch" => Ok(Action::Launch),
                "abort" => Ok(Action::Abort),
                _ => Err(LauncherError::ProtocolParse(format!("{:?}", line))),
            };
        };

        if command == "launcher" {
            let launcher = self.registry.create(rest)?;
            debug!("Selected launcher {}", rest);
            self.launcher = Some(launcher);
        } else {
            self.params.put(command, rest);
        }
        Ok(Action::Proceed)
    }

    /// Consume the script and return the process exit code.
    pub fn listen<B: BufRead>(&mut self, reader: B) -> i32 {
        let mut action = Action::Abort;

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to read the launch script: {}", e);
                    return PROTOCOL_FAILURE;
                }
            };
            let line = line.strip_suffix('\r').unwrap_or(&line);

            match self.parse_line(line) {
                Ok(Action::Proceed) => continue,
                Ok(next) => {
                    action = next;
                    break;
                }
                Err(e) => {
                    error!("{}", e);
                    return e.exit_code();
                }
            }
        }

        if action == Action::Abort {
            info!("Launch aborted by the launcher.");
            return PROTOCOL_FAILURE;
        }

        let Some(launcher) = self.launcher.as_mut() else {
            let e = LauncherError::NoLauncherSelected;
            error!("{}", e);
            return e.exit_code();
        };

        debug!(
            "Launching with keys: {:?}",
            self.params.keys().collect::<Vec<_>>()
        );
        launcher.launch(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    use super::*;
    use crate::core::launch::params::DEFAULT_MAIN_CLASS;
    use crate::core::launch::testing::{FakeAppletHost, FakeRuntime, SharedRecorder};

    /// Counts launches and hands back a fixed exit code.
    struct StubLauncher {
        launches: Rc<RefCell<Vec<ParamBucket>>>,
        code: i32,
    }

    impl Launcher for StubLauncher {
        fn launch(&mut self, params: &ParamBucket) -> i32 {
            self.launches.borrow_mut().push(params.clone());
            self.code
        }
    }

    fn stub_registry(
        launches: Rc<RefCell<Vec<ParamBucket>>>,
        code: i32,
    ) -> impl Fn(&str) -> LauncherResult<Box<dyn Launcher>> {
        move |name: &str| {
            if name == "onesix" {
                Ok(Box::new(StubLauncher {
                    launches: launches.clone(),
                    code,
                }) as Box<dyn Launcher>)
            } else {
                Err(LauncherError::UnknownLauncherType(name.to_string()))
            }
        }
    }

    fn listen(script: &str, code: i32) -> (i32, Vec<ParamBucket>) {
        let launches = Rc::new(RefCell::new(Vec::new()));
        let mut listener = Listener::new(stub_registry(launches.clone(), code));
        let exit = listener.listen(Cursor::new(script.to_string()));
        let launches = launches.borrow().clone();
        (exit, launches)
    }

    #[test]
    fn values_accumulate_until_launch() {
        let (exit, launches) = listen(
            "launcher onesix\ncp a.jar\ncp b.jar\nparam --demo\nwindowTitle My Game\nlaunch\ncp late.jar\n",
            0,
        );
        assert_eq!(exit, 0);
        assert_eq!(launches.len(), 1);

        let params = &launches[0];
        assert_eq!(params.all("cp").unwrap(), ["a.jar", "b.jar"]);
        assert_eq!(params.first("windowTitle").unwrap(), "My Game");
        assert!(params.all("launcher").is_err());
    }

    #[test]
    fn coordinator_exit_code_is_returned() {
        let (exit, _) = listen("launcher onesix\nlaunch\n", -1);
        assert_eq!(exit, -1);
    }

    #[test]
    fn launch_without_launcher_fails() {
        let (exit, launches) = listen("cp a.jar\nlaunch\n", 0);
        assert_eq!(exit, 1);
        assert!(launches.is_empty());
    }

    #[test]
    fn abort_and_end_of_input_never_launch() {
        for script in ["launcher onesix\ncp a.jar\nabort\nlaunch\n", "launcher onesix\ncp a.jar\n", ""] {
            let (exit, launches) = listen(script, 0);
            assert_eq!(exit, 1, "script {:?}", script);
            assert!(launches.is_empty());
        }
    }

    #[test]
    fn malformed_lines_stop_listening() {
        for script in ["launcher onesix\nbogus\nlaunch\n", "launcher onesix\n\nlaunch\n"] {
            let (exit, launches) = listen(script, 0);
            assert_eq!(exit, 1, "script {:?}", script);
            assert!(launches.is_empty());
        }
    }

    #[test]
    fn unknown_launcher_type_fails() {
        let (exit, launches) = listen("launcher bogus\nlaunch\n", 0);
        assert_eq!(exit, 1);
        assert!(launches.is_empty());
    }

    #[test]
    fn parse_line_splits_on_first_space() {
        let launches = Rc::new(RefCell::new(Vec::new()));
        let mut listener = Listener::new(stub_registry(launches, 0));

        assert_eq!(listener.parse_line("param --a b").unwrap(), Action::Proceed);
        assert_eq!(listener.parse_line("ext ").unwrap(), Action::Proceed);
        assert_eq!(listener.parse_line("launch").unwrap(), Action::Launch);
        assert_eq!(listener.parse_line("abort").unwrap(), Action::Abort);
        assert!(matches!(
            listener.parse_line("Launch"),
            Err(LauncherError::ProtocolParse(_))
        ));

        assert_eq!(listener.params().first("param").unwrap(), "--a b");
        assert_eq!(listener.params().all("ext").unwrap(), [""]);
    }

    #[test]
    fn crlf_scripts_are_accepted() {
        let (exit, launches) = listen("launcher onesix\r\ncp a.jar\r\nlaunch\r\n", 0);
        assert_eq!(exit, 0);
        assert_eq!(launches[0].all("cp").unwrap(), ["a.jar"]);
    }

    #[test]
    fn selecting_a_launcher_twice_replaces_it() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let calls = Rc::new(RefCell::new(0));
        let registry = {
            let (first, second, calls) = (first.clone(), second.clone(), calls.clone());
            move |_: &str| -> LauncherResult<Box<dyn Launcher>> {
                *calls.borrow_mut() += 1;
                let launches = if *calls.borrow() == 1 {
                    first.clone()
                } else {
                    second.clone()
                };
                Ok(Box::new(StubLauncher { launches, code: 0 }))
            }
        };

        let mut listener = Listener::new(registry);
        let exit = listener.listen(Cursor::new("launcher onesix\nlauncher onesix\nlaunch\n"));
        assert_eq!(exit, 0);
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn onesix_script_runs_end_to_end() {
        let dir = std::env::temp_dir().join(format!("onesix-listener-{}", std::process::id()));
        let natives = dir.join("natives");
        let recorder: SharedRecorder = Rc::new(RefCell::new(Default::default()));

        let registry = {
            let recorder = recorder.clone();
            move |name: &str| {
                if name != "onesix" {
                    return Err(LauncherError::UnknownLauncherType(name.to_string()));
                }
                let runtime = FakeRuntime::new(recorder.clone())
                    .with_class(DEFAULT_MAIN_CLASS, true, None);
                let host = FakeAppletHost {
                    recorder: recorder.clone(),
                    fail: false,
                    crash: false,
                };
                Ok(Box::new(OneSixLauncher::new(Box::new(runtime), Box::new(host)))
                    as Box<dyn Launcher>)
            }
        };

        let script = format!(
            "launcher onesix\ncp a.jar\nnatives {}\nuserName bob\nsessionId s1\nlaunch\n",
            natives.display()
        );
        let exit = Listener::new(registry).listen(Cursor::new(script));

        assert_eq!(exit, 0);
        let recorder = recorder.borrow();
        assert_eq!(recorder.invocations.len(), 1);
        assert_eq!(recorder.invocations[0].class_name, DEFAULT_MAIN_CLASS);
        assert_eq!(
            recorder.invocations[0].args,
            vec!["--width", "854", "--height", "480"]
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_registry_knows_only_onesix() {
        let registry = DefaultRegistry::new(LauncherSettings::default());
        assert!(registry.create("onesix").is_ok());
        assert!(matches!(
            registry.create("legacy"),
            Err(LauncherError::UnknownLauncherType(name)) if name == "legacy"
        ));
    }
}
