use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::export::{FILE_EXTENSION, FILE_PREFIX, SVG_MIME_TYPE};
use crate::conversation::now_millis;
use crate::error::ForgeError;

/// A downloadable SVG file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportedArtifact {
    pub fn new(svg_code: impl Into<String>) -> Self {
        Self::at(svg_code, now_millis())
    }

    pub fn at(svg_code: impl Into<String>, millis: i64) -> Self {
        Self {
            file_name: export_file_name(millis),
            mime_type: SVG_MIME_TYPE,
            contents: svg_code.into(),
        }
    }

    /// Write the raw markup into `dir`, returning the file's path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ForgeError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.contents)?;
        tracing::info!(path = %path.display(), "exported svg");
        Ok(path)
    }
}

pub fn export_file_name(millis: i64) -> String {
    format!("{FILE_PREFIX}{millis}.{FILE_EXTENSION}")
}
