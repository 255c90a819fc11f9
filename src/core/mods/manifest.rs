use std::io::Read;
use std::path::Path;

use crate::core::error::{LauncherError, LauncherResult};

const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Main attributes of a jar manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    attributes: Vec<(String, String)>,
}

impl Manifest {
    /// Parse the main section: attributes up to the first blank line, with
    /// continuation lines starting with a single space.
    pub fn parse(text: &str) -> Self {
        let mut attributes: Vec<(String, String)> = Vec::new();

        for line in text.split("\r\n").flat_map(|l| l.split(['\r', '\n'])) {
            if line.is_empty() {
                break;
            }

            if let Some(continuation) = line.strip_prefix(' ') {
                if let Some((_, value)) = attributes.last_mut() {
                    value.push_str(continuation);
                }
                continue;
            }

            if let Some((name, value)) = line.split_once(':') {
                let value = value.strip_prefix(' ').unwrap_or(value);
                attributes.push((name.trim().to_string(), value.to_string()));
            }
        }

        Self { attributes }
    }

    /// Attribute names compare case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Read the manifest out of `archive`. `Ok(None)` when the archive has none.
pub fn read_manifest(archive: &Path) -> LauncherResult<Option<Manifest>> {
    let file = std::fs::File::open(archive).map_err(|source| LauncherError::Io {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut zip = zip::ZipArchive::new(file)?;

    let mut entry = match zip.by_name(MANIFEST_ENTRY) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut raw = Vec::new();
    entry.read_to_end(&mut raw).map_err(|source| LauncherError::Io {
        path: archive.to_path_buf(),
        source,
    })?;

    Ok(Some(Manifest::parse(&String::from_utf8_lossy(&raw))))
}
