// ─── Native Library Stager ───
// Extracts the platform native archives into the natives directory before
// the game starts.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};

pub const ARCH_PLACEHOLDER: &str = "${arch}";

/// `os.arch` values that get 64-bit natives.
const ARCH_64_NAMES: [&str; 2] = ["x86_64", "amd64"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchClass {
    Bits64,
    Bits32,
}

impl ArchClass {
    pub fn from_reported(arch: &str) -> Self {
        if ARCH_64_NAMES
            .iter()
            .any(|name| arch.trim().eq_ignore_ascii_case(name))
        {
            ArchClass::Bits64
        } else {
            ArchClass::Bits32
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ArchClass::Bits64 => "64",
            ArchClass::Bits32 => "32",
        }
    }
}

pub fn resolve_template(template: &str, arch: ArchClass) -> String {
    template.replace(ARCH_PLACEHOLDER, arch.suffix())
}

/// Extract every archive template into `natives_dir`. The first failure
/// aborts staging.
pub fn stage_natives(
    templates: &[String],
    natives_dir: &Path,
    arch: ArchClass,
) -> LauncherResult<Vec<PathBuf>> {
    std::fs::create_dir_all(natives_dir).map_err(|e| LauncherError::NativeExtractionFailed {
        archive: natives_dir.to_path_buf(),
        reason: format!("cannot create natives directory: {}", e),
    })?;

    let mut staged = Vec::with_capacity(templates.len());
    for template in templates {
        let archive = PathBuf::from(resolve_template(template, arch));
        info!(
            "Extracting {}",
            archive
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| archive.to_string_lossy().into_owned())
        );

        unzip(&archive, natives_dir).map_err(|e| LauncherError::NativeExtractionFailed {
            archive: archive.clone(),
            reason: e.to_string(),
        })?;
        staged.push(archive);
    }

    Ok(staged)
}

/// Extract `archive` into `dest_dir`, skipping `META-INF` and any entry
/// whose path would leave `dest_dir`.
pub fn unzip(archive: &Path, dest_dir: &Path) -> LauncherResult<()> {
    let file = std::fs::File::open(archive).map_err(|source| LauncherError::Io {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut zip = zip::ZipArchive::new(file)?;

    for index in 0..zip.len() {
        let mut zipped = zip.by_index(index)?;

        let Some(rel_path) = zipped.enclosed_name() else {
            debug!("Skipping unsafe entry {:?} in {:?}", zipped.name(), archive);
            continue;
        };
        if rel_path.starts_with("META-INF") {
            continue;
        }

        let out_path = dest_dir.join(rel_path);
        if zipped.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(|source| LauncherError::Io {
                path: out_path,
                source,
            })?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LauncherError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut out = std::fs::File::create(&out_path).map_err(|source| LauncherError::Io {
            path: out_path.clone(),
            source,
        })?;
        std::io::copy(&mut zipped, &mut out).map_err(|source| LauncherError::Io {
            path: out_path.clone(),
            source,
        })?;
        debug!("Extracted native: {:?}", out_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("natives-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_zip(path: &Path, entries: &[&str]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for name in entries {
            writer
                .start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(name.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn arch_class_from_reported_arch() {
        assert_eq!(ArchClass::from_reported("amd64"), ArchClass::Bits64);
        assert_eq!(ArchClass::from_reported("X86_64"), ArchClass::Bits64);
        assert_eq!(ArchClass::from_reported("x86"), ArchClass::Bits32);
        assert_eq!(ArchClass::from_reported("i386"), ArchClass::Bits32);
        assert_eq!(ArchClass::from_reported(""), ArchClass::Bits32);
    }

    #[test]
    fn template_substitution() {
        assert_eq!(
            resolve_template("native-${arch}.zip", ArchClass::from_reported("amd64")),
            "native-64.zip"
        );
        assert_eq!(
            resolve_template("native-${arch}.zip", ArchClass::from_reported("sparc")),
            "native-32.zip"
        );
        assert_eq!(
            resolve_template("lwjgl-natives.jar", ArchClass::Bits64),
            "lwjgl-natives.jar"
        );
    }

    #[test]
    fn stage_extracts_resolved_archives_and_skips_meta_inf() {
        let dir = temp_dir("stage");
        write_zip(
            &dir.join("lwjgl-64.jar"),
            &["liblwjgl64.so", "META-INF/MANIFEST.MF", "sub/libopenal64.so"],
        );
        let natives = dir.join("natives");

        let template = dir.join("lwjgl-${arch}.jar").to_string_lossy().into_owned();
        let staged = stage_natives(&[template], &natives, ArchClass::Bits64).unwrap();

        assert_eq!(staged, vec![dir.join("lwjgl-64.jar")]);
        assert!(natives.join("liblwjgl64.so").is_file());
        assert!(natives.join("sub").join("libopenal64.so").is_file());
        assert!(!natives.join("META-INF").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_archive_aborts_staging() {
        let dir = temp_dir("missing");
        write_zip(&dir.join("ok.jar"), &["libok.so"]);
        let templates = vec![
            dir.join("ok.jar").to_string_lossy().into_owned(),
            dir.join("gone-${arch}.jar").to_string_lossy().into_owned(),
        ];

        match stage_natives(&templates, &dir.join("natives"), ArchClass::Bits32) {
            Err(LauncherError::NativeExtractionFailed { archive, .. }) => {
                assert_eq!(archive, dir.join("gone-32.jar"));
            }
            other => panic!("expected extraction failure, got {:?}", other),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
