use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::DocsError;
use crate::render::OutputFormat;

/// `prefix` + `.` + the format's suffix. The prefix is kept verbatim, dots included.
pub fn output_path(prefix: &Path, format: OutputFormat) -> PathBuf {
    let mut path = OsString::from(prefix.as_os_str());
    path.push(".");
    path.push(format.extension());
    PathBuf::from(path)
}

/// Writes the finished document, creating missing parent directories.
pub fn write_document(path: &Path, contents: &str) -> Result<(), DocsError> {
    let wrap = |source| DocsError::OutputWrite { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    let mut writer = BufWriter::new(File::create(path).map_err(wrap)?);
    writer.write_all(contents.as_bytes()).map_err(wrap)?;
    writer.flush().map_err(wrap)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote document");
    Ok(())
}
