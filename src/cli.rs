//! Terminal front-end
//!
//! Stands in for the widget UI: every subcommand goes through the same public API a
//! graphical front-end would call.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::api::commands::converter::{convert_units_with, get_categories_command};
use crate::api::commands::settings::get_settings;
use crate::core::converter::convert_value;
use crate::core::converter::format::format_display_with;
use crate::core::converter::parsing::{parse_quantity, resolve_unit};
use crate::core::converter::registry::Category;
use crate::core::converter::selection::ConverterState;
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::ConverterSettings;
use crate::shared::types::ConvertUnitsRequest;

#[derive(Parser, Debug)]
#[command(name = "unit-converter", author, version, about = "Convert between units of length, weight, temperature, area and volume")]
pub struct Cli {
    /// Settings file to use instead of the platform config dir
    #[arg(long, env = "UNIT_CONVERTER_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a value, e.g. `convert length Mile Kilometer 1`
    Convert {
        category: String,
        from: String,
        to: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// List categories and their units
    Units {
        category: Option<String>,
    },
    /// Convert a quantity written as free text, e.g. `parse "12 km" --to Mile`
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
        #[arg(long)]
        to: String,
    },
    /// Line-driven widget session reading commands from stdin
    Session,
}

pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_ref());

    match execute(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.message());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> ConverterSettings {
    let loaded = match path {
        Some(path) => ConverterSettings::load_from(path),
        None => get_settings(),
    };
    loaded.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load settings, using defaults");
        ConverterSettings::default()
    })
}

fn execute(command: Command, settings: &ConverterSettings) -> AppResult<()> {
    match command {
        Command::Convert { category, from, to, value } => {
            let response = convert_units_with(
                ConvertUnitsRequest {
                    category,
                    from_unit: from,
                    to_unit: to,
                    input: value,
                },
                &settings.format,
            )?;
            println!("{}", response.display);
        }
        Command::Units { category } => {
            let wanted = category
                .map(|name| name.parse::<Category>())
                .transpose()
                .map_err(|e| AppError::Validation(e.to_string()))?;

            for entry in get_categories_command()? {
                if wanted.is_some_and(|c| c != entry.id) {
                    continue;
                }
                println!("{}: {}", entry.label, entry.units.join(", "));
            }
        }
        Command::Parse { text, to } => {
            let quantity = parse_quantity(&text)?;
            let (category, target) = resolve_unit(&to)
                .ok_or_else(|| AppError::Validation(format!("Unknown unit: {}", to)))?;
            if category != quantity.category {
                return Err(AppError::Validation(format!(
                    "Cannot convert {} ({}) to {} ({})",
                    quantity.unit, quantity.category, target, category
                )));
            }
            let result = convert_value(category, quantity.unit, target, quantity.amount)?;
            println!("{}", format_display_with(result, target, &settings.format));
        }
        Command::Session => run_session(settings, io::stdin().lock(), io::stdout().lock())?,
    }
    Ok(())
}

/// Drive a `ConverterState` from text commands, printing the result after each one.
///
/// Commands: `category <name>`, `from <unit>`, `to <unit>`, `swap`, `clear`,
/// `units`, `quit`; any other line replaces the input text.
fn run_session(settings: &ConverterSettings, input: impl BufRead, mut out: impl Write) -> AppResult<()> {
    let mut state = ConverterState::with_settings(settings);
    print_state(&state, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let (verb, rest) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        let outcome = match verb {
            "quit" | "exit" => break,
            "category" => state.set_category_by_name(rest.trim()),
            "from" => state.set_from_unit(rest.trim()),
            "to" => state.set_to_unit(rest.trim()),
            "swap" => {
                state.swap_units();
                Ok(())
            }
            "clear" => {
                state.clear_input();
                Ok(())
            }
            "units" => {
                writeln!(out, "{}", state.available_units().join(", "))?;
                continue;
            }
            _ => {
                state.set_input(line.trim());
                Ok(())
            }
        };

        if let Err(err) = outcome {
            writeln!(out, "! {}", err)?;
        }
        print_state(&state, &mut out)?;
    }
    Ok(())
}

fn print_state(state: &ConverterState, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "[{}] {} {} -> {}",
        state.category(),
        state.input(),
        state.from_unit(),
        state.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str) -> String {
        let mut out = Vec::new();
        run_session(&ConverterSettings::default(), script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_session_walkthrough() {
        let output = session("from Kilometer\n2\nswap\ncategory temperature\n100\nquit\n1\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[length] 1 Meter -> 0.001 Kilometer",
                "[length] 1 Kilometer -> 1000 Meter",
                "[length] 2 Kilometer -> 2000 Meter",
                "[length] 2 Meter -> 0.002 Kilometer",
                "[temperature] 2 Celsius -> 35.6 Fahrenheit",
                "[temperature] 100 Celsius -> 212 Fahrenheit",
            ]
        );
    }

    #[test]
    fn test_session_reports_errors() {
        let output = session("from Kelvin\nclear\n");
        assert!(output.contains("! Unknown unit 'Kelvin' for category length"));
        assert!(output.ends_with("[length]  Meter -> Please enter a valid number\n"));
    }

    #[test]
    fn test_invalid_settings_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "format": { "precision": 70000 } }"#).unwrap();

        let settings = load_settings(Some(&path));
        assert_eq!(settings, ConverterSettings::default());
        assert_eq!(ConverterState::with_settings(&settings).display(), "0.001 Kilometer");
    }

    #[test]
    fn test_cli_parses_negative_value() {
        let cli = Cli::try_parse_from(["unit-converter", "convert", "temperature", "Celsius", "Fahrenheit", "-40"]).unwrap();
        match cli.command {
            Command::Convert { value, .. } => assert_eq!(value, "-40"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_execute_parse_rejects_cross_category() {
        let err = execute(
            Command::Parse {
                text: "3 kg".to_string(),
                to: "Meter".to_string(),
            },
            &ConverterSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
