//! sucre CLI: driving adapter for the sucre operation catalogue.
//!
//! Subcommands:
//! - `run <op> <input> [--args JSON] [--config FILE] [--raw]`: run one operation
//! - `check <config>`: validate an inflection table loads without errors
//! - `info`: print every operation with its summary

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sucre::{catalogue, Inflections, InflectionsConfig, Value};

#[derive(Parser)]
#[command(name = "sucre")]
#[command(about = "Text and collection utilities from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one operation and print its output
    Run {
        /// Operation name (see `sucre info`)
        op: String,

        /// Input: JSON, or a plain string when it is not JSON. `-` reads stdin.
        input: String,

        /// Arguments as a JSON object
        #[arg(short, long)]
        args: Option<String>,

        /// Inflection table (YAML, or JSON by extension) replacing the English one
        #[arg(short, long)]
        config: Option<String>,

        /// Treat the input as a string even when it parses as JSON
        #[arg(long)]
        raw: bool,
    },
    /// Validate an inflection table
    Check {
        /// Path to a YAML or JSON inflection table
        config: String,
    },
    /// List operations
    Info,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            op,
            input,
            args,
            config,
            raw,
        } => cmd_run(&op, &input, args.as_deref(), config.as_deref(), raw),
        Commands::Check { config } => cmd_check(&config),
        Commands::Info => {
            cmd_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_run(op: &str, input: &str, args: Option<&str>, config: Option<&str>, raw: bool) -> Result<()> {
    if catalogue::lookup(op).is_none() {
        bail!("unknown operation \"{op}\" (see `sucre info`)");
    }

    let input = read_input(input)?;
    let input = if raw { Value::String(input) } else { parse_value(&input) };
    let args = match args {
        Some(json) => serde_json::from_str(json).context("--args is not valid JSON")?,
        None => Value::Null,
    };

    let custom = config.map(load_inflections).transpose()?;
    let table = custom.as_ref().unwrap_or_else(|| Inflections::english());

    log::debug!("running {op} on a {} input", input.type_name());
    let output = catalogue::invoke(op, &input, &args, table)?;
    println!("{}", render(&output)?);
    Ok(())
}

fn cmd_check(path: &str) -> Result<()> {
    load_inflections(path)?;
    println!("Config valid");
    Ok(())
}

fn cmd_info() {
    let width = catalogue::names().map(str::len).max().unwrap_or(0);
    for op in catalogue::operations() {
        println!("  {:width$}  {}", op.name, op.summary);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_config(path: &str) -> Result<InflectionsConfig> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read \"{path}\""))?;

    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).context("JSON parse error")
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).context("YAML parse error")
    }
}

fn load_inflections(path: &str) -> Result<Inflections> {
    let config = load_config(path)?;
    Inflections::from_config(&config).context("config invalid")
}

// ═══════════════════════════════════════════════════════════════════════════════
// Input and output
// ═══════════════════════════════════════════════════════════════════════════════

fn read_input(input: &str) -> Result<String> {
    if input != "-" {
        return Ok(input.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

/// JSON when the text parses as JSON, otherwise the text itself.
fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Strings print bare; everything else prints as JSON.
fn render(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string(other)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_value_prefers_json() {
        assert_eq!(parse_value("[1, 2]"), Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(parse_value("\"quoted\""), Value::from("quoted"));
        assert_eq!(parse_value("caps_lock"), Value::from("caps_lock"));
        assert_eq!(parse_value("{broken"), Value::from("{broken"));
    }

    #[test]
    fn render_strings_bare() {
        assert_eq!(render(&Value::from("CapsLock")).unwrap(), "CapsLock");
        assert_eq!(render(&Value::Null).unwrap(), "null");
        assert_eq!(render(&Value::from(vec![1, 2])).unwrap(), "[1,2]");
    }

    #[test]
    fn run_rejects_unknown_operations() {
        let err = cmd_run("frobnicate", "x", None, None, false).unwrap_err();
        assert!(err.to_string().contains("unknown operation"));
    }

    #[test]
    fn run_rejects_bad_args() {
        assert!(cmd_run("at", "jumpy", Some("{index"), None, false).is_err());
        assert!(cmd_run("at", "jumpy", Some(r#"{"index": "x"}"#), None, false).is_err());
        assert!(cmd_run("at", "jumpy", Some(r#"{"index": 5}"#), None, false).is_ok());
    }

    #[test]
    fn load_yaml_config() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "irregulars:\n  - {{ singular: cactus, plural: cacti }}").unwrap();
        let path = file.path().to_str().unwrap();

        let table = load_inflections(path).unwrap();
        assert_eq!(table.pluralize("cactus"), "cacti");
        assert_eq!(table.pluralize("post"), "posts");
        assert!(cmd_check(path).is_ok());
    }

    #[test]
    fn load_json_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"uncountables": ["pokemon"]}}"#).unwrap();
        let table = load_inflections(file.path().to_str().unwrap()).unwrap();
        assert_eq!(table.pluralize("pokemon"), "pokemon");
    }

    #[test]
    fn check_reports_bad_configs() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "plurals:\n  - {{ pattern: '(unclosed', replacement: x }}").unwrap();
        assert!(cmd_check(file.path().to_str().unwrap()).is_err());
        assert!(cmd_check("/nonexistent/table.yaml").is_err());
    }
}
