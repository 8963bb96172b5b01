use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::build_day_summary;
use crate::core::tracking::EventLogger;
use crate::errors::AppResult;
use crate::models::action::Action;
use crate::models::record::LogRecord;
use crate::models::session_summary::DaySummary;
use crate::utils::date::resolve_date;
use crate::utils::table::Table;
use crate::utils::time::mins2readable;
use ansi_term::Colour;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { date, records } = cmd {
        let day = resolve_date(date)?;
        let logger =
            EventLogger::new(cfg.tracking_dir()).with_options(cfg.known_options());
        let entries = logger.read_day(day)?;

        if entries.is_empty() {
            println!("No records for {}", day);
            return Ok(());
        }

        if *records {
            print_records(&entries);
        }

        print_summary(&day, &build_day_summary(&entries));
    }
    Ok(())
}

fn color_for_action(action: Action) -> Colour {
    match action {
        Action::Begin => Colour::Green,
        Action::End => Colour::Red,
    }
}

fn print_records(records: &[LogRecord]) {
    println!("RECORDS:");
    for r in records {
        println!(
            "- {} | {:<5} | {:>3} min | {} {} {}",
            r.timestamp_str(),
            color_for_action(r.action).paint(r.action.as_str()),
            r.countdown_minutes,
            r.code,
            r.option,
            r.summary
        );
    }
    println!();
}

fn print_summary(date: &NaiveDate, summary: &DaySummary) {
    println!("=== {} ===", date);

    let mut table = Table::new(&["Task", "Option", "Begin", "End", "Duration"]);
    for s in &summary.sessions {
        table.add_row(vec![
            format!("{} {}", s.begin.code, s.begin.summary),
            s.begin.option.clone(),
            s.begin.timestamp.format("%H:%M:%S").to_string(),
            s.end
                .as_ref()
                .map(|e| e.timestamp.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--:--".to_string()),
            if s.is_open() {
                "open".to_string()
            } else {
                mins2readable(s.duration_minutes)
            },
        ]);
    }
    print!("{}", table.render());

    println!(
        "\nSessions: {} | Tracked: {}",
        summary.sessions.len(),
        mins2readable(summary.total_minutes)
    );
}
