//! Output layout: where a converted document and its images land on disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{ConvertResult, OutputFormat};
use crate::error::{Error, Result};

/// Resolved output paths for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Folder holding the output file and its asset folder
    pub document_dir: PathBuf,
    /// The Markdown (or JSON) file
    pub output_file: PathBuf,
    /// Image folder, created only when an image is written
    pub asset_dir: PathBuf,
}

impl OutputLayout {
    /// Resolve the layout for a Markdown output.
    ///
    /// - no `output`: `<stem>/<stem>.md`
    /// - an existing directory or a path ending in a separator: `<output>/<stem>/<stem>.md`
    /// - anything else is the output file; its parent is the document folder,
    ///   or `<stem>/` when it has no parent
    pub fn resolve(input: &Path, output: Option<&Path>) -> Self {
        Self::resolve_for(input, output, OutputFormat::Markdown)
    }

    /// Resolve the layout for the given output format.
    pub fn resolve_for(input: &Path, output: Option<&Path>, format: OutputFormat) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        Self::resolve_named(&stem, output, format)
    }

    /// Resolve with an explicit document name instead of the input's stem.
    ///
    /// Batch callers use this to keep folders unique for inputs that share a stem.
    pub fn resolve_named(name: &str, output: Option<&Path>, format: OutputFormat) -> Self {
        let file_name = format!("{}.{}", name, format.extension());

        let (document_dir, output_file) = match output {
            None => {
                let dir = PathBuf::from(name);
                let file = dir.join(&file_name);
                (dir, file)
            }
            Some(out) if out.is_dir() || ends_with_separator(out) => {
                let dir = out.join(name);
                let file = dir.join(&file_name);
                (dir, file)
            }
            Some(out) => match out.parent().filter(|p| !p.as_os_str().is_empty()) {
                Some(parent) => (parent.to_path_buf(), out.to_path_buf()),
                None => {
                    let dir = PathBuf::from(name);
                    let file = dir.join(out);
                    (dir, file)
                }
            },
        };

        let asset_dir = document_dir.join("assets");
        Self {
            document_dir,
            output_file,
            asset_dir,
        }
    }

    /// Use a different asset folder name.
    pub fn with_asset_dir_name(mut self, name: &str) -> Self {
        self.asset_dir = self.document_dir.join(name);
        self
    }

    /// Write the converted document.
    ///
    /// Images are written first, then the output file. Each file goes through
    /// a temporary file persisted in place. On failure the files this call
    /// created are removed again; files that already existed are left alone.
    pub fn write(&self, result: &ConvertResult) -> Result<()> {
        fs::create_dir_all(&self.document_dir)?;

        let mut created: Vec<PathBuf> = Vec::new();
        let created_asset_dir = result.has_assets() && !self.asset_dir.exists();

        let outcome = self.write_all(result, &mut created);
        if let Err(ref e) = outcome {
            log::warn!(
                "Rolling back {} after error: {}",
                self.output_file.display(),
                e
            );
            for path in created.iter().rev() {
                let _ = fs::remove_file(path);
            }
            if created_asset_dir {
                let _ = fs::remove_dir(&self.asset_dir);
            }
        }
        outcome
    }

    fn write_all(&self, result: &ConvertResult, created: &mut Vec<PathBuf>) -> Result<()> {
        if result.has_assets() {
            fs::create_dir_all(&self.asset_dir)?;
            for asset in &result.assets {
                let path = self.asset_dir.join(&asset.file_name);
                persist(&self.asset_dir, &path, &asset.data, created)?;
                log::info!("Extracted image: {}", path.display());
            }
        }

        persist(
            &self.document_dir,
            &self.output_file,
            result.content.as_bytes(),
            created,
        )?;
        log::info!("Wrote {}", self.output_file.display());
        Ok(())
    }
}

/// Write `data` to `path` through a temporary file in `dir`.
///
/// `path` is recorded in `created` when it did not exist before.
fn persist(dir: &Path, path: &Path, data: &[u8], created: &mut Vec<PathBuf>) -> Result<()> {
    let existed = path.exists();
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    if !existed {
        created.push(path.to_path_buf());
    }
    Ok(())
}

fn ends_with_separator(path: &Path) -> bool {
    let text = path.to_string_lossy();
    text.ends_with('/') || text.ends_with(std::path::MAIN_SEPARATOR)
}
