use charter_scanner::BoatFilter;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "charter")]
#[command(about = "Seat availability for charter fishing boats")]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Log every extracted entry")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up one booking page on one date
    Lookup {
        /// Base URL of the boat's booking page
        url: String,

        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Query every registered boat on one date
    Status {
        /// TOML file with a `[[boats]]` list
        #[arg(long)]
        boats: PathBuf,

        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Only boats in these regions ("전체" for all)
        #[arg(long = "region", value_delimiter = ',')]
        regions: Vec<String>,

        /// Only boats with these registered names
        #[arg(long = "ship", value_delimiter = ',')]
        ships: Vec<String>,
    },
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Ship names win over regions when both are given.
pub fn boat_filter(regions: Vec<String>, ships: Vec<String>) -> BoatFilter {
    if ships.is_empty() {
        BoatFilter::from_regions(regions)
    } else {
        BoatFilter::Specific(ships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-01"),
            Ok(NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"))
        );
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn test_status_args() {
        let cli = Cli::try_parse_from([
            "charter",
            "status",
            "--boats",
            "boats.toml",
            "--date",
            "2024-05-01",
            "--region",
            "보령,태안",
            "--debug",
        ])
        .expect("valid args");

        assert!(cli.debug);
        match cli.command {
            Command::Status {
                boats,
                date,
                regions,
                ships,
            } => {
                assert_eq!(boats, PathBuf::from("boats.toml"));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1));
                assert_eq!(regions, vec!["보령", "태안"]);
                assert!(ships.is_empty());
            }
            Command::Lookup { .. } => panic!("expected status command"),
        }
    }

    #[test]
    fn test_boat_filter_precedence() {
        assert_eq!(boat_filter(vec![], vec![]), BoatFilter::All);
        assert_eq!(
            boat_filter(vec!["보령".to_string()], vec!["조커호".to_string()]),
            BoatFilter::Specific(vec!["조커호".to_string()])
        );
        assert_eq!(
            boat_filter(vec!["보령".to_string()], vec![]),
            BoatFilter::Regions(vec!["보령".to_string()])
        );
    }
}
