//! JSON export document

use serde::Serialize;

use crate::config::AppConfig;
use crate::decision_log::utc_timestamp;
use crate::engine::Assessment;
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub app: &'a str,
    pub version: &'a str,
    pub timestamp: String,
    pub assessment: &'a Assessment,
}

pub fn generate(assessment: &Assessment, app: &AppConfig) -> Result<String> {
    let doc = ExportDocument {
        app: &app.name,
        version: &app.version,
        timestamp: utc_timestamp(),
        assessment,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
