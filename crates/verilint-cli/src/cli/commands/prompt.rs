use super::super::args::PromptArgs;
use crate::exit_codes::SUCCESS;
use anyhow::Context;
use verilint_core::prompt::{source_lines, PromptBuilder};
use verilint_core::reserved::ReservedWords;

pub(crate) fn run(args: PromptArgs) -> anyhow::Result<i32> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let module = match args.module {
        Some(name) => name,
        None => args
            .file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .context("cannot derive a module name from the file path; pass --module")?,
    };

    let builder = PromptBuilder::new(ReservedWords::load(&args.reserved_words));
    print!("{}", builder.build(&module, &source_lines(&source)));
    Ok(SUCCESS)
}
