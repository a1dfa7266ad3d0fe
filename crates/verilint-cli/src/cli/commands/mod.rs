use super::args::*;
use crate::exit_codes::SUCCESS;

pub(crate) mod interpret;
pub(crate) mod prompt;
pub(crate) mod run;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => run::run(args).await,
        Command::Prompt(args) => prompt::run(args),
        Command::Interpret(args) => interpret::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
