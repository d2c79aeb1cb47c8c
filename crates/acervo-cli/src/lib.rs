pub mod cli;
pub mod commands;
pub mod logging;

#[cfg(test)]
pub mod test_util;

use std::io::{Read, Write};

use clap::Parser;

use acervo_lib::output::ConsoleIO;
use acervo_lib::runtime::Runtime;

use cli::{Cli, Command};

/// Main CLI entry point. Parses args and dispatches to the appropriate command.
pub fn try_run<IN, OUT, ERR>(
    args: &[&str],
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    let cli = Cli::try_parse_from(args)?;

    match cli.command {
        Command::Init => commands::init::run_init(runtime, io),
        Command::Add {
            file,
            title,
            author,
            description,
        } => commands::add::run_add(
            &file,
            &title,
            author.as_deref(),
            description.as_deref(),
            runtime,
            io,
        ),
        Command::List { json } => commands::list::run_list(json, runtime, io),
        Command::Remove { id } => commands::remove::run_remove(id, runtime, io),
        Command::Query { text } => commands::query::run_query(&text, runtime, io),
    }
}
