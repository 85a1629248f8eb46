use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gardeplan", version, about = "On-call staffing calendar CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a date into its tariff category
    Classify {
        /// Date to classify (YYYY-MM-DD)
        date: NaiveDate,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List holidays and bridge days of a year
    Calendar {
        /// Year to scan
        year: i32,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Audit the stored rules for inconsistencies
    Check {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Repair the stored rules in place
    Fix {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rule management
    Rules {
        #[command(subcommand)]
        action: commands::rules::RulesAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Classify { date, json } => commands::classify::run(date, json),
        Commands::Calendar { year, json } => commands::calendar::run(year, json),
        Commands::Check { json } => commands::check::run(json),
        Commands::Fix { json } => commands::fix::run(json),
        Commands::Rules { action } => commands::rules::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "gardeplan", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gardeplan_core::DayType;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn classify_parses_a_date() {
        let cli = Cli::try_parse_from(["gardeplan", "classify", "2024-05-09"]).unwrap();
        match cli.command {
            Commands::Classify { date, json } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 9).unwrap());
                assert!(!json);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn classify_rejects_garbage_dates() {
        assert!(Cli::try_parse_from(["gardeplan", "classify", "yesterday"]).is_err());
    }

    #[test]
    fn rules_add_parses_day_type_and_quotas() {
        let cli = Cli::try_parse_from([
            "gardeplan",
            "rules",
            "add",
            "2024-12-24",
            "2024-12-26",
            "sunday_or_holiday",
            "--quota",
            "interne=3",
            "--quota",
            "senior=2",
        ])
        .unwrap();
        match cli.command {
            Commands::Rules {
                action:
                    commands::rules::RulesAction::Add {
                        day_type, quotas, ..
                    },
            } => {
                assert_eq!(day_type, DayType::SundayOrHoliday);
                assert_eq!(
                    quotas,
                    vec![("interne".to_string(), 3), ("senior".to_string(), 2)]
                );
            }
            _ => panic!("expected rules add"),
        }
    }

    #[test]
    fn check_accepts_json_flag() {
        let cli = Cli::try_parse_from(["gardeplan", "check", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { json: true }));
    }
}
