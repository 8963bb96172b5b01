// src/export/logic.rs

use crate::core::summary::build_day_summary;
use crate::core::tracking::EventLogger;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::SessionExport;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the paired sessions of `date` to `file`.
    ///
    /// Returns the number of exported rows.
    pub fn export(
        logger: &EventLogger,
        format: ExportFormat,
        file: &Path,
        date: NaiveDate,
        force: bool,
    ) -> AppResult<usize> {
        let records = logger.read_day(date)?;
        let summary = build_day_summary(&records);

        if summary.sessions.is_empty() {
            warning(format!("No sessions found for {date}."));
            return Ok(0);
        }

        ensure_writable(file, force)?;

        let rows: Vec<SessionExport> = summary.sessions.iter().map(SessionExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, file)?,
            ExportFormat::Json => export_json(&rows, file)?,
        }

        Ok(rows.len())
    }
}
