use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// Ask the Java binary which architecture it runs as.
///
/// A 32-bit JVM on a 64-bit host needs 32-bit natives, so the runtime's own
/// `os.arch` wins over the host architecture when it can be read.
pub fn probe_os_arch(java_bin: &Path) -> Option<String> {
    let output = Command::new(java_bin)
        .args(["-XshowSettings:properties", "-version"])
        .stdin(Stdio::null())
        .output()
        .ok()?;

    let text = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stderr),
        String::from_utf8_lossy(&output.stdout)
    );
    let arch = parse_os_arch(&text);
    debug!("Probed {:?}: os.arch = {:?}", java_bin, arch);
    arch
}

/// Fallback when the runtime cannot be probed.
pub fn host_arch() -> String {
    std::env::consts::ARCH.to_string()
}

fn parse_os_arch(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if key.trim() != "os.arch" {
            return None;
        }
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
