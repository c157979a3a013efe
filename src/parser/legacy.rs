//! Legacy `.doc` pre-conversion through an office suite (LibreOffice `soffice`).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::tempdir;
use which::which;

use crate::error::{Error, Result};

/// Environment variables consulted, in order, for the office suite binary.
pub const SOFFICE_ENV_VARS: [&str; 2] = ["DOCMD_SOFFICE_PATH", "SOFFICE_PATH"];

/// Convert a legacy `.doc` file to DOCX bytes.
///
/// The office suite writes into a scratch directory that is removed before
/// returning, so the caller never sees intermediate files.
pub fn convert_legacy_doc(path: &Path, soffice: Option<&Path>) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let soffice = resolve_soffice_binary(soffice)?;
    let scratch = tempdir()
        .map_err(|e| Error::LegacyConversion(format!("Temp dir error: {}", e)))?;

    log::info!(
        "Converting legacy document {} with {}",
        path.display(),
        soffice.display()
    );

    let output = Command::new(&soffice)
        .arg("--headless")
        .arg("--nologo")
        .arg("--nofirststartwizard")
        .arg("--convert-to")
        .arg("docx")
        .arg("--outdir")
        .arg(scratch.path())
        .arg(path)
        .output()
        .map_err(|e| {
            Error::LegacyConversion(format!(
                "Failed to launch office suite ({}): {}",
                soffice.display(),
                e
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::LegacyConversion(format!(
            "office suite exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let stem = path
        .file_stem()
        .ok_or_else(|| Error::LegacyConversion("input has no file name".into()))?;
    let converted = scratch
        .path()
        .join(format!("{}.docx", stem.to_string_lossy()));
    fs::read(&converted).map_err(|e| {
        Error::LegacyConversion(format!(
            "office suite produced no output at {}: {}",
            converted.display(),
            e
        ))
    })
}

/// Locate the office suite binary.
///
/// An explicit path wins, then the environment overrides, then `PATH`,
/// then the usual install locations.
pub fn resolve_soffice_binary(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    for var in SOFFICE_ENV_VARS {
        if let Some(path) = env::var_os(var) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
    }

    for candidate in ["soffice", "libreoffice"] {
        if let Ok(path) = which(candidate) {
            return Ok(path);
        }
    }

    #[cfg(target_os = "macos")]
    {
        let candidate = PathBuf::from("/Applications/LibreOffice.app/Contents/MacOS/soffice");
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    #[cfg(target_os = "windows")]
    {
        let candidates = [
            r"C:\Program Files\LibreOffice\program\soffice.exe",
            r"C:\Program Files (x86)\LibreOffice\program\soffice.exe",
        ];
        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        let candidates = [
            "/usr/bin/soffice",
            "/usr/lib/libreoffice/program/soffice",
            "/opt/libreoffice/program/soffice",
        ];
        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    Err(Error::LegacyConversion(
        "Unable to locate LibreOffice (soffice). Set DOCMD_SOFFICE_PATH to override the detection."
            .to_string(),
    ))
}
