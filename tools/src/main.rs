//! activity-runner: headless account-activity generator.
//!
//! Usage:
//!   activity-runner --accounts users.csv --start 2024-01-01 --end 2025-01-01 --seed 42
//!   activity-runner --demo-accounts 25 --days 90 --format jsonl --out events.jsonl
//!   activity-runner --accounts users.csv --daily --add "newbie,newbie@example.com,pw,forum.example.com"

use activity_core::{
    config::{SimConfig, SimulationParameters},
    engine::{SimEngine, SimRun},
    handle_generator::HandleGenerator,
    registry::{AccountRegistry, AccountRow},
    summary,
};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::env;
use std::fs::File;
use std::io::{self, Write};

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Jsonl,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let config = match flag_value(&args, "--config") {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let seed = parse_arg(&args, "--seed", config.default_seed);
    let monthly_min = parse_arg(&args, "--monthly-min", config.default_monthly_min);
    let monthly_max = parse_arg(&args, "--monthly-max", config.default_monthly_max);
    let start_date = match flag_value(&args, "--start") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let params = match flag_value(&args, "--end") {
        Some(s) => SimulationParameters {
            start_date,
            end_date: parse_date(s)?,
            seed,
            monthly_min,
            monthly_max,
        },
        None => {
            let days = parse_arg(&args, "--days", config.default_window_days);
            SimulationParameters::for_days(start_date, days, seed, monthly_min, monthly_max)?
        }
    };
    let format = match flag_value(&args, "--format").unwrap_or("csv") {
        "csv" => OutputFormat::Csv,
        "jsonl" => OutputFormat::Jsonl,
        other => bail!("Unknown --format '{other}' (expected csv or jsonl)"),
    };
    let daily = args.iter().any(|a| a == "--daily");

    let rows = match flag_value(&args, "--accounts") {
        Some(path) => read_account_rows(path)?,
        None => {
            let n = parse_arg(&args, "--demo-accounts", 0usize);
            if n == 0 {
                bail!("Provide --accounts <csv> or --demo-accounts <n>");
            }
            HandleGenerator::demo_rows(seed, n)
        }
    };

    let engine = SimEngine::new(config);
    let mut registry = engine.new_registry(seed)?;
    registry.load(&rows)?;
    for spec in flag_values(&args, "--add") {
        append_account(&mut registry, spec)?;
    }

    eprintln!("activity-runner");
    eprintln!("  seed:      {}", params.seed);
    eprintln!("  window:    {} .. {}", params.start_date, params.end_date);
    eprintln!("  monthly:   {} .. {}", params.monthly_min, params.monthly_max);
    eprintln!("  accounts:  {}", registry.len());
    eprintln!();

    let run = engine.run(&registry, &params)?;

    let out: Box<dyn Write> = match flag_value(&args, "--out") {
        Some(path) => Box::new(File::create(path).with_context(|| format!("Cannot create {path}"))?),
        None => Box::new(io::stdout().lock()),
    };
    if daily {
        write_records(out, format, &summary::daily_rows(&run.calendars))?;
    } else {
        write_records(out, format, &run.events)?;
    }

    print_summary(&run);
    Ok(())
}

fn read_account_rows(path: &str) -> Result<Vec<AccountRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Cannot open {path}"))?;
    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<AccountRow>().enumerate() {
        rows.push(record.with_context(|| format!("{path}: bad record {i}"))?);
    }
    log::info!("read {} account rows from {path}", rows.len());
    Ok(rows)
}

fn append_account(registry: &mut AccountRegistry, spec: &str) -> Result<()> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    let [display_name, email, secret, site] = parts.as_slice() else {
        bail!("--add expects display_name,email,secret,site; got '{spec}'");
    };
    let account = registry.append(display_name, email, secret, site)?;
    eprintln!("Account {} added (id={}, pattern={})", account.display_name, account.id, account.pattern);
    Ok(())
}

fn write_records<T: Serialize>(out: Box<dyn Write>, format: OutputFormat, records: &[T]) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for r in records {
                writer.serialize(r)?;
            }
            writer.flush()?;
        }
        OutputFormat::Jsonl => {
            let mut out = out;
            for r in records {
                writeln!(out, "{}", serde_json::to_string(r)?)?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

fn print_summary(run: &SimRun) {
    eprintln!("=== RUN SUMMARY ===");
    eprintln!("  seed:           {}", run.seed);
    eprintln!("  days:           {}", run.simulation_days);
    eprintln!("  accounts:       {}", run.calendars.len());
    eprintln!("  total events:   {}", run.total_events());
    if run.simulation_days > 0 {
        let avg = run.total_events() as f64 / f64::from(run.simulation_days);
        eprintln!("  avg daily:      {avg:.1}");
    }
    if let Some((date, n)) = summary::busiest_day(&run.events) {
        eprintln!("  busiest day:    {date} ({n} events)");
    }
    eprintln!();
    eprintln!("=== BY PATTERN ===");
    for (pattern, n) in summary::pattern_totals(&run.events) {
        eprintln!("  {:<20} {n}", pattern.label());
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Bad date '{s}', expected YYYY-MM-DD"))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn flag_values<'a>(args: &'a [String], flag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    args.windows(2)
        .filter(move |w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
