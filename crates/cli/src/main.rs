// sheetsense CLI - financial table structure inference from the terminal

mod exit_codes;
mod load;
mod settings;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use sheetsense_structure::{StructureConfig, StructureError, StructureSession, StructuredTable};

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_INPUT_PARSE, EXIT_SUCCESS, EXIT_USAGE};
use load::InputFormat;

#[derive(Parser)]
#[command(name = "sheetsense")]
#[command(about = "Infer the structure of financial tables (headers, key rows, quarterly series)")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a grid snapshot and print what was found
    #[command(after_help = "\
Examples:
  sheetsense analyze pnl.json
  sheetsense analyze forecast.csv -o json
  cat export.csv | sheetsense analyze - -f csv -o prompt
  sheetsense analyze ledger.csv --budget 20000")]
    Analyze {
        /// Input file (JSON snapshot, CSV or TSV). Reads stdin when omitted or '-'
        input: Option<PathBuf>,

        /// Input format (inferred from the file extension when omitted)
        #[arg(long, short = 'f')]
        from: Option<InputFormat>,

        /// Output format
        #[arg(long, short = 'o', default_value = "summary")]
        output: OutputFormat,

        /// CSV delimiter (sniffed when omitted)
        #[arg(long)]
        delimiter: Option<char>,

        /// Override the cell budget from the config
        #[arg(long)]
        budget: Option<usize>,

        /// Config file (TOML)
        #[arg(long, env = "SHEETSENSE_CONFIG")]
        config: Option<PathBuf>,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Config file (TOML)
        #[arg(long, env = "SHEETSENSE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// One-paragraph description
    Summary,
    /// Full structured table
    Json,
    /// Compact text block for a language-model prompt
    Prompt,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            input,
            from,
            output,
            delimiter,
            budget,
            config,
            compact,
        } => cmd_analyze(input, from, output, delimiter, budget, config, compact),
        Commands::Config { config } => cmd_config(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Engine logs go through the `log` facade; tracing-subscriber picks them up.
fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT_PARSE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<StructureError> for CliError {
    fn from(err: StructureError) -> Self {
        match &err {
            StructureError::ConfigParse(_) | StructureError::ConfigValidation(_) => {
                CliError::config(err.to_string())
                    .with_hint("run 'sheetsense config' to see the expected keys")
            }
            StructureError::SnapshotParse(_) => CliError::parse(err.to_string()),
            StructureError::Io(_) => CliError::io(err.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

fn cmd_analyze(
    input: Option<PathBuf>,
    from: Option<InputFormat>,
    output: OutputFormat,
    delimiter: Option<char>,
    budget: Option<usize>,
    config: Option<PathBuf>,
    compact: bool,
) -> Result<(), CliError> {
    let format = resolve_format(input.as_deref(), from)?;
    let delimiter = delimiter.map(delimiter_byte).transpose()?;

    let (mut config, source) = settings::load_config(config.as_deref())?;
    log::debug!("config from {}", source.describe());
    if let Some(budget) = budget {
        if budget == 0 {
            return Err(CliError::args("--budget must be greater than 0"));
        }
        config = config.with_cell_budget(budget);
    }

    if let Some(path) = input.as_deref() {
        if path != Path::new("-") && !path.exists() {
            return Err(CliError::args(format!("file not found: {}", path.display())));
        }
    }

    let content = load::read_input(input.as_deref())?;
    let snapshot = load::parse_snapshot(&content, format, delimiter)?;

    let mut session = StructureSession::new(config);
    let table = session.analyze(&snapshot);

    write_output(table, output, compact)
}

fn resolve_format(input: Option<&Path>, from: Option<InputFormat>) -> Result<InputFormat, CliError> {
    if let Some(format) = from {
        return Ok(format);
    }
    match input {
        Some(path) if path != Path::new("-") => InputFormat::from_path(path).ok_or_else(|| {
            CliError::args(format!("cannot infer input format for {}", path.display()))
                .with_hint("pass --from json|csv|tsv")
        }),
        _ => Ok(InputFormat::Json),
    }
}

fn delimiter_byte(c: char) -> Result<u8, CliError> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(CliError::args(format!("delimiter must be a single ASCII character, got '{c}'")))
    }
}

fn write_output(table: &StructuredTable, output: OutputFormat, compact: bool) -> Result<(), CliError> {
    let text = match output {
        OutputFormat::Summary => table.summary.clone(),
        OutputFormat::Prompt => table.to_prompt_text(),
        OutputFormat::Json => {
            let json = if compact {
                serde_json::to_string(table)
            } else {
                serde_json::to_string_pretty(table)
            };
            json.map_err(|e| CliError::io(format!("cannot serialize result: {e}")))?
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", text.trim_end()).map_err(|e| CliError::io(e.to_string()))
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config(config: Option<PathBuf>) -> Result<(), CliError> {
    let (config, source) = settings::load_config(config.as_deref())?;
    print!("{}", render_config(&config, &source)?);
    Ok(())
}

fn render_config(config: &StructureConfig, source: &settings::ConfigSource) -> Result<String, CliError> {
    let body = config.to_toml()?;
    let mut text = format!("# source: {}\n", source.describe());
    if let Some(path) = settings::user_config_path() {
        text.push_str(&format!("# user config path: {}\n", path.display()));
    }
    text.push_str(&body);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_resolution() {
        assert_eq!(
            resolve_format(Some(Path::new("a.csv")), None).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            resolve_format(Some(Path::new("a.csv")), Some(InputFormat::Json)).unwrap(),
            InputFormat::Json
        );
        assert_eq!(resolve_format(None, None).unwrap(), InputFormat::Json);
        assert_eq!(
            resolve_format(Some(Path::new("-")), None).unwrap(),
            InputFormat::Json
        );

        let err = resolve_format(Some(Path::new("book.xlsx")), None).unwrap_err();
        assert_eq!(err.code, EXIT_USAGE);
        assert!(err.hint.is_some());
    }

    #[test]
    fn delimiter_must_be_ascii() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('§').unwrap_err().code, EXIT_USAGE);
    }

    #[test]
    fn structure_errors_map_to_exit_codes() {
        let e: CliError = StructureError::ConfigValidation("x".into()).into();
        assert_eq!(e.code, EXIT_CONFIG);
        let e: CliError = StructureError::SnapshotParse("x".into()).into();
        assert_eq!(e.code, EXIT_INPUT_PARSE);
        let e: CliError = StructureError::Io("x".into()).into();
        assert_eq!(e.code, EXIT_ERROR);
    }

    #[test]
    fn rendered_config_round_trips() {
        let config = StructureConfig::default().with_cell_budget(42);
        let text = render_config(&config, &settings::ConfigSource::Defaults).unwrap();
        assert!(text.starts_with("# source: built-in defaults"));
        assert_eq!(StructureConfig::from_toml(&text).unwrap(), config);
    }
}
