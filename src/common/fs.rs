use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tempfile::NamedTempFile;
use zip::ZipArchive;

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Error unless the file already exists.
pub fn require_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        bail!("Path exists but is not a file: {}", path.display());
    }
    Ok(())
}

/// Extracts the given `.zip` file to the target directory. The archive itself is left in place.
pub fn extract_zip(zip_path: &Path, dest_dir: &Path) -> Result<()> {
    let file = File::open(zip_path)
        .with_context(|| format!("failed to open {:?}", zip_path))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("failed to read zip archive {:?}", zip_path))?;

    archive
        .extract(dest_dir)
        .with_context(|| format!("failed to extract {:?} to {:?}", zip_path, dest_dir))?;

    Ok(())
}

/// Write-then-rename wrapper for atomic file outputs
pub struct PendingWrite {
    target: PathBuf,
    tmp: Option<NamedTempFile>,
}

pub fn open_for_big_write(target: &Path, force: bool) -> Result<PendingWrite> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    let tmp = NamedTempFile::new_in(target.parent().unwrap_or(Path::new(".")))
        .context("create temp file")?;

    Ok(PendingWrite { target: target.to_path_buf(), tmp: Some(tmp) })
}

impl PendingWrite {
    fn file(&mut self) -> std::io::Result<&mut NamedTempFile> {
        self.tmp.as_mut()
            .ok_or_else(|| std::io::Error::other("write after finalize"))
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file()?.write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.file()?.flush()
    }
}

pub fn finalize_big_write(mut pending: PendingWrite) -> Result<()> {
    let Some(tmp) = pending.tmp.take() else { bail!("already finalized: {}", pending.target.display()) };
    tmp.as_file().sync_all().ok(); // best-effort fsync file
    tmp.persist(&pending.target)
        .with_context(|| format!("rename to {}", pending.target.display()))?;
    if let Some(dir) = pending.target.parent() {
        let _ = File::open(dir).and_then(|f| f.sync_all());
    }
    Ok(())
}
