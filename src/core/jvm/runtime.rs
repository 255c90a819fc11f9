// ─── JVM Runtime ───
// Resolves classes straight out of the classpath and invokes entry points by
// spawning `java` with the assembled environment.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::LaunchEnvironment;
use crate::core::settings::LauncherSettings;

use super::classfile::ClassFile;
use super::probe;
use super::{EntryPoint, JavaRuntime, ResolvedClass};

pub struct JvmRuntime {
    java_bin: PathBuf,
    jvm_args: Vec<String>,
    class_path: Vec<PathBuf>,
}

impl JvmRuntime {
    pub fn new(java_bin: PathBuf, jvm_args: Vec<String>) -> Self {
        Self {
            java_bin,
            jvm_args,
            class_path: Vec::new(),
        }
    }

    pub fn from_settings(settings: &LauncherSettings) -> Self {
        Self::new(settings.java_binary(), settings.jvm_args.clone())
    }

    /// Joined classpath string for `-cp`.
    pub fn class_path_string(&self) -> String {
        self.class_path
            .iter()
            .map(|entry| entry.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(get_classpath_separator())
    }

    fn find_class_bytes(&self, class_name: &str) -> Option<(PathBuf, Vec<u8>)> {
        let entry_name = format!("{}.class", class_name.replace('.', "/"));

        for root in &self.class_path {
            if root.is_dir() {
                let candidate = root.join(&entry_name);
                if let Ok(bytes) = std::fs::read(&candidate) {
                    return Some((root.clone(), bytes));
                }
                continue;
            }

            match read_jar_entry(root, &entry_name) {
                Ok(Some(bytes)) => return Some((root.clone(), bytes)),
                Ok(None) => {}
                Err(e) => debug!("Skipping classpath entry {:?}: {}", root, e),
            }
        }

        None
    }

    fn build_command(
        &self,
        entry: &EntryPoint,
        args: &[String],
        env: &LaunchEnvironment,
    ) -> Command {
        let mut cmd = Command::new(&self.java_bin);

        for arg in &self.jvm_args {
            cmd.arg(arg);
        }
        for (key, value) in &env.system_properties {
            cmd.arg(format!("-D{}={}", key, value));
        }
        cmd.arg("-cp").arg(self.class_path_string());
        cmd.arg(&entry.class_name);
        cmd.args(args);

        cmd.envs(&env.vars);
        cmd.current_dir(&env.working_dir);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
        cmd
    }
}

impl JavaRuntime for JvmRuntime {
    fn reported_arch(&self) -> String {
        probe::probe_os_arch(&self.java_bin).unwrap_or_else(|| {
            let arch = probe::host_arch();
            warn!(
                "Could not read os.arch from {:?}, assuming host architecture {}",
                self.java_bin, arch
            );
            arch
        })
    }

    fn add_to_class_path(&mut self, paths: &[String]) -> LauncherResult<()> {
        let separator = get_classpath_separator();
        for raw in paths {
            if raw.trim().is_empty() {
                return Err(LauncherError::ClasspathAssemblyFailed(
                    "empty classpath entry".into(),
                ));
            }
            if raw.contains(separator) {
                return Err(LauncherError::ClasspathAssemblyFailed(format!(
                    "{} contains the classpath separator '{}'",
                    raw, separator
                )));
            }
            self.class_path.push(PathBuf::from(raw));
        }
        Ok(())
    }

    fn resolve_class(&self, class_name: &str) -> LauncherResult<ResolvedClass> {
        let (origin, bytes) = self.find_class_bytes(class_name).ok_or_else(|| {
            LauncherError::EntryPointResolutionFailed {
                class: class_name.to_string(),
                reason: "class not found on the classpath".into(),
            }
        })?;

        let class =
            ClassFile::parse(&bytes).map_err(|e| LauncherError::EntryPointResolutionFailed {
                class: class_name.to_string(),
                reason: format!("unreadable class file in {:?}: {}", origin, e),
            })?;

        debug!("Resolved {} from {:?}", class_name, origin);
        Ok(ResolvedClass {
            name: class_name.to_string(),
            origin,
            has_main: class.has_main(),
            base_dir_field: class.base_dir_field().map(str::to_string),
        })
    }

    fn invoke(
        &self,
        entry: &EntryPoint,
        args: &[String],
        env: &LaunchEnvironment,
    ) -> LauncherResult<()> {
        let mut cmd = self.build_command(entry, args, env);

        info!("Invoking {} with Java: {:?}", entry.class_name, self.java_bin);
        debug!("Command (copy/paste): {}", format_command_for_logs(&cmd));

        let status = cmd.status().map_err(|e| LauncherError::SpawnFailed {
            class: entry.class_name.clone(),
            reason: format!("{:?}: {}", self.java_bin, e),
        })?;

        if !status.success() {
            return Err(LauncherError::InvocationFailed {
                class: entry.class_name.clone(),
                reason: format!("runtime exited with {}", status),
            });
        }
        Ok(())
    }
}

pub fn get_classpath_separator() -> &'static str {
    if cfg!(target_os = "windows") {
        ";"
    } else {
        ":"
    }
}

fn read_jar_entry(jar: &Path, entry_name: &str) -> LauncherResult<Option<Vec<u8>>> {
    let file = std::fs::File::open(jar).map_err(|source| LauncherError::Io {
        path: jar.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut zipped = match archive.by_name(entry_name) {
        Ok(zipped) => zipped,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut bytes = Vec::with_capacity(zipped.size() as usize);
    zipped
        .read_to_end(&mut bytes)
        .map_err(|source| LauncherError::Io {
            path: jar.to_path_buf(),
            source,
        })?;
    Ok(Some(bytes))
}

fn format_command_for_logs(cmd: &Command) -> String {
    let program = shell_escape(&cmd.get_program().to_string_lossy());
    let args = cmd
        .get_args()
        .map(|arg| shell_escape(&arg.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ");

    if args.is_empty() {
        program
    } else {
        format!("{} {}", program, args)
    }
}

fn shell_escape(raw: &str) -> String {
    if raw.is_empty() {
        return "\"\"".to_string();
    }

    if raw.chars().all(|ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '\\' | '=')
    }) {
        return raw.to_string();
    }

    format!("\"{}\"", raw.replace('"', "\\\""))
}
