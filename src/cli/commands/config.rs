use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            ConfigLogic::print(path)?;
        }

        if *check {
            let problems = cfg.check();
            if problems.is_empty() {
                success("Configuration looks good.");
            } else {
                for p in &problems {
                    warning(p);
                }
                return Err(AppError::Config(format!(
                    "{} problem(s) found in {}",
                    problems.len(),
                    path.display()
                )));
            }
        }

        if *edit_config {
            ConfigLogic::edit(path, editor)?;
            success(format!(
                "Configuration file edited using '{}'",
                ConfigLogic::resolve_editor(editor)
            ));
        }
    }

    Ok(())
}
