use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::fs;
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (sample content)
///  - the tracking directory it points to
pub fn handle(path: &Path, force: bool) -> AppResult<()> {
    info("Initializing goltime…");

    let cfg = Config::init(path, force)?;
    success(format!("Config file : {}", path.display()));

    let dir = cfg.tracking_dir();
    fs::create_dir_all(&dir)?;
    success(format!("Tracking dir: {}", dir.display()));

    info("Edit the task list with `goltime config --edit`.");
    Ok(())
}
