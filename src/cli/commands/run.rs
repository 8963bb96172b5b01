use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::session::{SessionManager, SessionState, Timings};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, header, info, success, warning};
use crate::ui::terminal::{TaskBoard, TerminalObserver};
use crate::utils::time::parse_countdown;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

const TITLE: &str = "* GoL Time Emit Log *";

const HELP: &str = "\
Commands:
  tasks                 show the task board
  start <n>             start task n (ends the running one first)
  stop                  end the running task or silence the notification
  option <n> <option>   select the category of task n
  countdown <minutes>   countdown for the next start (0 => no countdown)
  status                show what is running
  help                  this text
  quit                  stop everything and exit";

/// A line typed on the interactive board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Tasks,
    Start(usize),
    Stop,
    Option(usize, String),
    Countdown(u32),
    Status,
    Help,
    Quit,
}

impl ShellCommand {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let cmd = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("tasks" | "ls", []) => Self::Tasks,
            ("start" | "s", [n]) => Self::Start(parse_index(n)?),
            ("stop" | "x", []) => Self::Stop,
            ("option" | "o", [n, rest @ ..]) if !rest.is_empty() => {
                Self::Option(parse_index(n)?, rest.join(" "))
            }
            ("countdown" | "c", [m]) => Self::Countdown(parse_countdown(m)?),
            ("status", []) => Self::Status,
            ("help" | "?", []) => Self::Help,
            ("quit" | "q" | "exit", []) => Self::Quit,
            _ => return Err(AppError::InvalidCommand(line.trim().to_string())),
        };

        Ok(Some(cmd))
    }
}

fn parse_index(s: &str) -> AppResult<usize> {
    s.parse::<usize>()
        .map_err(|_| AppError::InvalidCommand(format!("'{s}' is not a task number")))
}

fn timings_from(cli: &Cli) -> Timings {
    let mut t = Timings::default();
    if let Some(ms) = cli.minute_ms {
        t.minute = Duration::from_millis(ms);
    }
    if let Some(ms) = cli.notify_ms {
        t.notification_ceiling = Duration::from_millis(ms);
    }
    t
}

/// Handle the `run` command: interactive board on stdin/stdout.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Run { countdown } = &cli.command {
        for p in cfg.check() {
            warning(p);
        }

        let stdin = io::stdin();
        run_board(stdin.lock(), cfg, *countdown, timings_from(cli))?;
    }
    Ok(())
}

/// Read board commands from `input` until `quit` or EOF, then shut down.
pub fn run_board<R: BufRead>(
    input: R,
    cfg: &Config,
    countdown: Option<u32>,
    timings: Timings,
) -> AppResult<()> {
    let observer = TerminalObserver::new();
    let manager = SessionManager::from_config(cfg, Arc::new(observer.clone()), timings);

    if let Some(minutes) = countdown {
        check_countdown(cfg, minutes)?;
        manager.set_countdown(minutes);
    }

    let mut board = TaskBoard::new(&cfg.tasks, observer);

    header(TITLE);
    print!("{}", board.render(manager.countdown()));
    prompt();

    for line in input.lines() {
        let line = line?;
        match ShellCommand::parse(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(cmd)) => {
                if let Err(e) = execute(cmd, &mut board, &manager, cfg) {
                    error(e);
                }
            }
            Err(e) => error(e),
        }
        prompt();
    }

    manager.shutdown()?;
    success("Quit app!");
    Ok(())
}

fn prompt() {
    print!("> ");
    io::stdout().flush().ok();
}

fn check_countdown(cfg: &Config, minutes: u32) -> AppResult<()> {
    if !cfg.countdown_options.is_empty() && !cfg.countdown_options.contains(&minutes) {
        return Err(AppError::InvalidCountdown(format!(
            "{minutes} (choices: {:?})",
            cfg.countdown_options
        )));
    }
    Ok(())
}

fn execute(
    cmd: ShellCommand,
    board: &mut TaskBoard,
    manager: &SessionManager,
    cfg: &Config,
) -> AppResult<()> {
    match cmd {
        ShellCommand::Tasks => print!("{}", board.render(manager.countdown())),
        ShellCommand::Start(n) => {
            let row = board
                .row(n)
                .ok_or_else(|| AppError::UnknownTask(n.to_string()))?;
            if !board.start_enabled(&row.task.code) {
                warning(format!("{} is already running", row.task.code));
                return Ok(());
            }
            manager.start(row.task.clone())?;
        }
        ShellCommand::Stop => {
            if !board.stop_enabled() {
                info("Nothing to stop.");
            }
            manager.stop()?;
        }
        ShellCommand::Option(n, option) => {
            if !cfg.options.is_empty() && !cfg.options.contains(&option) {
                return Err(AppError::InvalidCommand(format!(
                    "unknown option '{option}' (choices: {})",
                    cfg.options.join(", ")
                )));
            }
            let row = board
                .row_mut(n)
                .ok_or_else(|| AppError::UnknownTask(n.to_string()))?;
            row.task.select_option(&option);
            info(format!("Option: {}", row.task.label()));
        }
        ShellCommand::Countdown(minutes) => {
            check_countdown(cfg, minutes)?;
            manager.set_countdown(minutes);
            info(format!("Countdown set to: {minutes}"));
        }
        ShellCommand::Status => match manager.state() {
            SessionState::Idle => info("Idle."),
            SessionState::Running { task, deadline } => match deadline {
                Some(d) => info(format!(
                    "Running {} until {}",
                    task.label(),
                    d.format("%H:%M:%S")
                )),
                None => info(format!("Running {} (no countdown)", task.label())),
            },
            SessionState::Notifying { task, pid } => {
                info(format!("Countdown of {} expired, notification pid {pid}", task.code))
            }
        },
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
    }
    Ok(())
}
