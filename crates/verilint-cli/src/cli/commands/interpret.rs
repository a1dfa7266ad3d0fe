use super::super::args::InterpretArgs;
use crate::exit_codes::SUCCESS;
use anyhow::Context;
use verilint_core::interpret::{interpret, interpret_text};

/// A file that parses as JSON is treated as a full response body; anything
/// else is treated as the reply text itself.
pub(crate) fn run(args: InterpretArgs) -> anyhow::Result<i32> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let record = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(body @ serde_json::Value::Object(_)) => interpret(&Ok(body)),
        _ => interpret_text(&raw),
    };

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(SUCCESS)
}
