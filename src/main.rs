use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;

use avro_docs::cli::CommandLineInterface;

fn main() -> ExitCode {
    let command_line_interface = CommandLineInterface::load();
    command_line_interface.init_logging();
    match run(&command_line_interface) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(command_line_interface: &CommandLineInterface) -> anyhow::Result<()> {
    command_line_interface
        .run()
        .context("could not generate schema documentation")?;
    Ok(())
}
