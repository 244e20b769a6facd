//! Purpose: `keycase` CLI entry point.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Stdout carries only command output (JSON or plain keys).
//! Invariants: Errors go to stderr, as JSON when stderr is not a terminal.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap::error::ErrorKind as ClapErrorKind;
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use keycase::api::{Error, ErrorKind, KeyStrategy, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run(std::env::args_os()) {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run<I>(args: I) -> Result<RunOutcome, Error>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `keycase --help`."));
            }
        },
    };

    init_tracing();
    command_dispatch::dispatch_command(cli.command)
}

#[derive(Parser)]
#[command(
    name = "keycase",
    version,
    about = "Normalize snake_case keys and resolve fields from JSON records",
    long_about = None,
    after_help = r#"EXAMPLES
  $ keycase normalize first_name _first_name last_name_
  $ echo '{"first_name":"Krishna"}' | keycase decode --field firstName
  $ keycase decode payload.json --field id=user_id --field nickname?
  $ keycase decode payload.json --schema user.schema.json --explain

Set RUST_LOG=debug to see how each field was matched."#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Convert snake_case keys to camelCase")]
    Normalize {
        #[arg(required = true, help = "Keys to convert")]
        keys: Vec<String>,
        #[arg(long, help = "Print only the converted keys, one per line")]
        plain: bool,
    },
    #[command(about = "Resolve schema fields from a JSON object payload")]
    Decode(DecodeArgs),
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct DecodeArgs {
    #[arg(
        help = "Payload file containing one JSON object (default: stdin, or `-`)",
        value_hint = ValueHint::FilePath
    )]
    input: Option<PathBuf>,
    #[arg(long, help = "JSON schema file listing fields", value_hint = ValueHint::FilePath)]
    schema: Option<PathBuf>,
    #[arg(
        long = "field",
        value_name = "NAME[=KEY][?]",
        help = "Field to resolve; `=KEY` sets an explicit raw key, `?` marks it optional"
    )]
    fields: Vec<String>,
    #[arg(long, value_enum, help = "How fields without an explicit key are matched")]
    strategy: Option<StrategyArg>,
    #[arg(long, help = "Report which raw key each field was read from")]
    explain: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StrategyArg {
    /// Match normalized (camelCase) record keys.
    Snake,
    /// Match record keys exactly.
    Exact,
}

impl From<StrategyArg> for KeyStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Snake => KeyStrategy::ConvertFromSnakeCase,
            StrategyArg::Exact => KeyStrategy::UseDefaultKeys,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_json(value: Value) {
    let text = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    match text {
        Ok(text) => println!("{text}"),
        Err(err) => emit_error(
            &Error::new(ErrorKind::Internal)
                .with_message("json encode failed")
                .with_source(err),
        ),
    }
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::MissingKey => match (err.field(), err.key()) {
            (Some(field), Some(key)) => {
                format!("no value associated with key {key:?} for field `{field}`")
            }
            _ => "missing key".to_string(),
        },
        ErrorKind::Parse => "parse error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(field) = err.field() {
        inner.insert("field".to_string(), json!(field));
    }
    if let Some(key) = err.key() {
        inner.insert("key".to_string(), json!(key));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("path: {}", path.display()));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, error_json, error_message, run};
    use clap::{CommandFactory, Parser};
    use keycase::api::{Error, ErrorKind};
    use std::ffi::OsString;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn decode_collects_repeated_fields() {
        let cli = Cli::try_parse_from(args(&[
            "keycase",
            "decode",
            "payload.json",
            "--field",
            "id=user_id",
            "--field",
            "firstName",
            "--strategy",
            "exact",
        ]))
        .expect("parse");
        let Command::Decode(decode) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(decode.fields, ["id=user_id", "firstName"]);
        assert!(decode.strategy.is_some());
        assert!(!decode.explain);
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = run(args(&["keycase", "normalize", "--bogus", "a_b"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.message().unwrap_or_default().contains("--bogus"));
    }

    #[test]
    fn missing_key_message_names_field_and_key() {
        let err = Error::missing_key("firstName", "firstName");
        assert_eq!(
            error_message(&err),
            "no value associated with key \"firstName\" for field `firstName`"
        );
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "MissingKey");
        assert_eq!(value["error"]["field"], "firstName");
        assert_eq!(value["error"]["key"], "firstName");
    }
}
