use crate::errors::{AppError, AppResult};
use crate::models::task::Task;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-user configuration file, looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".goltime.yml";

const SAMPLE_CONFIG: &str = r#"# goltime configuration
#
# Command launched when a countdown expires (split on spaces, no shell).
musicCommand: "mpv --really-quiet /usr/share/sounds/freedesktop/stereo/complete.oga"

# Countdown choices in minutes (0 => no countdown).
countdownOptions: [0, 15, 25, 45, 60]
countdownDefault: 25

# Categories selectable for every task.
options:
  - dev
  - review
  - meeting

# Where tracking_YYYY_MM_DD.csv files are written.
trackingDirectory: "~/goltime"

tasks:
  - jiraCode: "PRJ-1"
    defaultOption: "dev"
    summary: "Example task"
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub music_command: String,
    #[serde(default)]
    pub countdown_options: Vec<u32>,
    #[serde(default)]
    pub countdown_default: u32,
    #[serde(default)]
    pub options: Vec<String>,
    pub tracking_directory: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Config {
    /// Return the full path of the config file (`~/.goltime.yml`).
    pub fn config_file() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Load the configuration from the default location.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    /// Load and normalize the configuration at `path`.
    ///
    /// A missing or unparsable file is an error: the caller aborts startup.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::ConfigNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)?;

        if cfg.tracking_directory.trim().is_empty() {
            return Err(AppError::Config("trackingDirectory must not be empty".into()));
        }

        cfg.tasks = cfg.tasks.into_iter().map(Task::normalized).collect();
        Ok(cfg)
    }

    /// Tracking directory with `~/` expanded.
    pub fn tracking_dir(&self) -> PathBuf {
        expand_tilde(&self.tracking_directory)
    }

    /// Every category a record may carry: `options` plus each task's own.
    pub fn known_options(&self) -> Vec<String> {
        let mut all: Vec<String> = self.options.clone();
        for t in &self.tasks {
            for o in [&t.default_option, &t.option] {
                if !o.is_empty() && !all.contains(o) {
                    all.push(o.clone());
                }
            }
        }
        all
    }

    /// Non-fatal consistency problems, one message per finding.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.countdown_options.is_empty()
            && !self.countdown_options.contains(&self.countdown_default)
        {
            problems.push(format!(
                "countdownDefault {} is not one of countdownOptions {:?}",
                self.countdown_default, self.countdown_options
            ));
        }

        if self.tasks.is_empty() {
            problems.push("no tasks configured".to_string());
        }

        let mut seen = HashSet::new();
        for t in &self.tasks {
            if t.code.trim().is_empty() {
                problems.push("task with empty jiraCode".to_string());
            } else if !seen.insert(t.code.as_str()) {
                problems.push(format!("duplicate task code '{}'", t.code));
            }

            if !self.options.is_empty()
                && !t.default_option.is_empty()
                && !self.options.contains(&t.default_option)
            {
                problems.push(format!(
                    "task '{}': defaultOption '{}' is not one of options",
                    t.code, t.default_option
                ));
            }
        }

        if self.music_command.trim().is_empty() {
            problems.push("musicCommand is empty: countdown expiry will be silent".to_string());
        }

        problems
    }

    /// Write the sample configuration to `path`.
    pub fn init(path: &Path, force: bool) -> AppResult<Self> {
        if path.exists() && !force {
            return Err(AppError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, SAMPLE_CONFIG)?;

        Self::from_yaml(SAMPLE_CONFIG)
    }
}
