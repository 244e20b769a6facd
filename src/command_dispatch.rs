//! Purpose: Hold top-level CLI command dispatch for `keycase`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Payload and schema I/O happens here, never in the library core.
//! Invariants: Output envelopes and exit code semantics match `main.rs` helpers.

use super::*;
use keycase::api::{Resolution, Schema, convert_from_snake_case, parse_field_arg};
use std::io::Read;
use std::path::Path;

pub(super) fn dispatch_command(command: Command) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "keycase", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Normalize { keys, plain } => {
            for key in &keys {
                let normalized = convert_from_snake_case(key);
                if plain {
                    println!("{normalized}");
                } else {
                    emit_json(json!({ "key": key, "normalized": normalized }));
                }
            }
            Ok(RunOutcome::ok())
        }
        Command::Decode(args) => {
            let schema = load_schema(&args)?;
            let decoder = match args.strategy {
                Some(strategy) => schema.decoder().with_strategy(strategy.into()),
                None => schema.decoder(),
            };
            let payload = read_payload(args.input.as_deref())?;
            let resolution = decoder.decode_slice(&payload, schema.fields())?;
            if args.explain {
                emit_json(explain_json(resolution));
            } else {
                emit_json(Value::Object(resolution.into_record()));
            }
            Ok(RunOutcome::ok())
        }
    }
}

fn load_schema(args: &DecodeArgs) -> Result<Schema, Error> {
    let inline = args
        .fields
        .iter()
        .map(|arg| parse_field_arg(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let schema = match &args.schema {
        Some(path) => Schema::from_path(path)?.extend(inline)?,
        None => Schema::new(inline)?,
    };
    if schema.fields().is_empty() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("no fields to decode")
            .with_hint("Pass --field NAME (repeatable) or --schema FILE."));
    }
    Ok(schema)
}

fn read_payload(input: Option<&Path>) -> Result<Vec<u8>, Error> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read payload")
                .with_path(path)
                .with_source(err)
        }),
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read payload from stdin")
                    .with_source(err)
            })?;
            Ok(buf)
        }
    }
}

fn explain_json(resolution: Resolution) -> Value {
    let fields = resolution
        .fields()
        .iter()
        .map(|resolved| {
            let mut entry = json!({
                "field": resolved.field,
                "key": resolved.key,
                "matched": resolved.matched.as_str(),
            });
            if !resolved.alternatives.is_empty() {
                entry["ignored"] = json!(resolved.alternatives);
            }
            entry
        })
        .collect::<Vec<_>>();
    let skipped = resolution.skipped().to_vec();
    json!({
        "record": Value::Object(resolution.into_record()),
        "fields": fields,
        "skipped": skipped,
    })
}
