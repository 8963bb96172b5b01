use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracking::EventLogger;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::resolve_date;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        date,
        force,
    } = cmd
    {
        let day = resolve_date(date)?;
        let logger =
            EventLogger::new(cfg.tracking_dir()).with_options(cfg.known_options());
        ExportLogic::export(&logger, *format, Path::new(file), day, *force)?;
    }
    Ok(())
}
