use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path)
            .map_err(|_| AppError::ConfigNotFound(path.display().to_string()))?;
        println!("{}", content);
        Ok(())
    }

    /// Editor precedence: explicit `--editor`, `$EDITOR`, `$VISUAL`, platform default.
    pub fn resolve_editor(requested: &Option<String>) -> String {
        requested
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let ed = Self::resolve_editor(editor);

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot launch editor '{ed}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("editor '{ed}' exited with {status}")));
        }
        Ok(())
    }
}
