//! urpa-identifiers command line
//!
//! Validates identifiers from the shell, e.g. for batch checks of exported
//! robot input files.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use urpa_identifiers::{
    decode_birth, justify_business_registration_number, IdentifierConfig, IdentifierKind,
};

const CONFIG_ENV: &str = "URPA_IDENTIFIERS_CONFIG";

/// Exit status when at least one value is invalid
const EXIT_INVALID: u8 = 1;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Validate personal IDs, business registration and account numbers
#[derive(Parser)]
#[command(name = "urpa-identifiers", version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more values
    Validate {
        /// personal-id (rc), business-registration (ico) or account-number
        kind: IdentifierKind,

        /// Values to check
        #[arg(required = true)]
        values: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the birth date and sex encoded in a personal ID (check digit is not verified)
    BirthDate {
        value: String,
    },
    /// Left-pad a short business registration number to 8 digits
    Justify {
        value: String,

        /// Fill character (defaults to the configured one)
        #[arg(long)]
        fill: Option<char>,
    },
}

#[derive(Serialize)]
struct ValidationRecord<'a> {
    kind: IdentifierKind,
    value: &'a str,
    valid: bool,
}

fn main() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let status = run(cli, &mut std::io::stdout().lock())?;
    Ok(ExitCode::from(status))
}

/// Execute a parsed command, writing its output to `out`.
///
/// Returns the process exit status.
fn run(cli: Cli, out: &mut impl Write) -> CliResult<u8> {
    let config = load_config(cli.config)?;
    debug!("Using configuration: {:?}", config);

    match cli.command {
        Commands::Validate { kind, values, json } => {
            let validator = kind.validator(&config);
            let records: Vec<ValidationRecord> = values
                .iter()
                .map(|value| ValidationRecord {
                    kind,
                    value: value.as_str(),
                    valid: validator.is_valid(value),
                })
                .collect();

            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
            } else {
                for record in &records {
                    let verdict = if record.valid { "valid" } else { "invalid" };
                    writeln!(out, "{}\t{}", record.value, verdict)?;
                }
            }

            let invalid = records.iter().filter(|r| !r.valid).count();
            info!("Checked {} {} value(s), {} invalid", records.len(), kind, invalid);
            Ok(if invalid == 0 { 0 } else { EXIT_INVALID })
        }
        Commands::BirthDate { value } => {
            let (date, month) = decode_birth(&value, config.personal_id.century)?;
            writeln!(out, "{}\t{}", date, month.sex.display_name())?;
            Ok(0)
        }
        Commands::Justify { value, fill } => {
            let fill = fill.unwrap_or(config.business_registration.fill_char);
            writeln!(out, "{}", justify_business_registration_number(&value, fill)?)?;
            Ok(0)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>) -> CliResult<IdentifierConfig> {
    let path = path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Ok(IdentifierConfig::load(&path)?)
        }
        None => Ok(IdentifierConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (u8, String) {
        let cli = Cli::try_parse_from(std::iter::once("urpa-identifiers").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let status = run(cli, &mut out).unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn validate_all_valid_exits_zero() {
        let (status, out) = run_args(&["validate", "rc", "7906047424", "635414/2234"]);
        assert_eq!(status, 0);
        assert_eq!(out, "7906047424\tvalid\n635414/2234\tvalid\n");
    }

    #[test]
    fn validate_mixed_exits_one() {
        let (status, out) = run_args(&["validate", "ico", "26868644", "26868643"]);
        assert_eq!(status, EXIT_INVALID);
        assert_eq!(out, "26868644\tvalid\n26868643\tinvalid\n");
    }

    #[test]
    fn validate_json_records() {
        let (status, out) = run_args(&[
            "validate",
            "account-number",
            "--json",
            "19-2235210247",
            "1234567890",
        ]);
        assert_eq!(status, EXIT_INVALID);

        let records: serde_json::Value = serde_json::from_str(&out).unwrap();
        let records = records.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["kind"], "account-number");
        assert_eq!(records[0]["value"], "19-2235210247");
        assert_eq!(records[0]["valid"], true);
        assert_eq!(records[1]["valid"], false);
    }

    #[test]
    fn unknown_kind_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["urpa-identifiers", "validate", "iban", "x"]).is_err());
    }

    #[test]
    fn birth_date_prints_date_and_sex() {
        let (status, out) = run_args(&["birth-date", "635414/2234"]);
        assert_eq!(status, 0);
        assert_eq!(out, "1963-04-14\tfemale\n");
    }

    #[test]
    fn birth_date_ignores_check_digit() {
        let (_, out) = run_args(&["birth-date", "7806047424"]);
        assert_eq!(out, "1978-06-04\tmale\n");
    }

    #[test]
    fn birth_date_uses_configured_window() {
        let file = config_file("[personal_id]\ncentury = { fixed = 2000 }\n");
        let path = file.path().to_str().unwrap();
        let (_, out) = run_args(&["--config", path, "birth-date", "8001010040"]);
        assert_eq!(out, "2080-01-01\tmale\n");
    }

    #[test]
    fn justify_uses_configured_fill_char() {
        let file = config_file("[business_registration]\nfill_char = \"1\"\n");
        let path = file.path().to_str().unwrap();

        let (status, out) = run_args(&["--config", path, "justify", "1234"]);
        assert_eq!(status, 0);
        assert_eq!(out, "11111234\n");

        let (_, out) = run_args(&["--config", path, "justify", "1234", "--fill", "0"]);
        assert_eq!(out, "00001234\n");
    }

    #[test]
    fn justify_invalid_value_is_an_error() {
        let cli = Cli::try_parse_from(["urpa-identifiers", "justify", "12"]).unwrap();
        assert!(run(cli, &mut Vec::new()).is_err());
    }
}
