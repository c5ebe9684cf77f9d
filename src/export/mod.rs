//! Assessment export

pub mod json;
pub mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, ExportConfig};
use crate::engine::Assessment;
use crate::error::Result;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Render an assessment in the requested format
pub fn render(assessment: &Assessment, format: ExportFormat, app: &AppConfig) -> Result<String> {
    match format {
        ExportFormat::Json => json::generate(assessment, app),
        ExportFormat::Markdown => Ok(markdown::generate(assessment)),
    }
}

/// Write both documents into `dir`, returning the written paths (JSON first)
pub fn export_to_directory(
    assessment: &Assessment,
    app: &AppConfig,
    export: &ExportConfig,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(2);
    for (format, file_name) in [
        (ExportFormat::Json, &export.json_file_name),
        (ExportFormat::Markdown, &export.markdown_file_name),
    ] {
        let path = dir.join(file_name);
        fs::write(&path, render(assessment, format, app)?)?;
        tracing::info!(path = %path.display(), format = format.extension(), "assessment exported");
        written.push(path);
    }
    Ok(written)
}
