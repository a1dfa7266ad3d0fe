use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod run;

pub use run::RunArgs;

#[derive(Parser)]
#[command(
    name = "verilint",
    version,
    about = "LLM-assisted defect screening for benchmark Verilog modules"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyse every configured module and write the CSV report
    Run(RunArgs),
    /// Print the analysis prompt for one Verilog file (no network)
    Prompt(PromptArgs),
    /// Interpret a saved model reply (raw text or JSON body)
    Interpret(InterpretArgs),
    Version,
}

#[derive(clap::Args, Clone)]
pub struct PromptArgs {
    pub file: PathBuf,

    /// Module name used in the prompt (defaults to the file stem)
    #[arg(long)]
    pub module: Option<String>,

    #[arg(long, default_value = "reservewords")]
    pub reserved_words: PathBuf,
}

#[derive(clap::Args, Clone)]
pub struct InterpretArgs {
    pub file: PathBuf,
}
