//! Command dispatch logic for daybook

use std::time::Instant;

use crate::cli::Cli;
use daybook_core::error::Result;
use daybook_core::store::resolve_root;
use tracing::debug;

mod command;
mod commands;
pub(crate) mod macros;

use command::{Command, CommandContext, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root(cli.root.as_deref())?;

    debug!(elapsed = ?start.elapsed(), root = %root.display(), "resolve_root");

    let ctx = CommandContext::new(cli, &root, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
