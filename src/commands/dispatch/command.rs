//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use daybook_core::error::Result;
use daybook_core::store::Journal;

use super::macros::trace_command;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// Open the journal at the resolved root; fails if `init` never ran
    pub fn open_journal(&self) -> Result<Journal> {
        let journal = Journal::open(self.root)?;
        trace_command!(self.cli, self.start, "open_journal");
        Ok(journal)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("daybook {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("A daily journal: one markdown file per day, tagged and searchable.");
        println!();
        println!("Run `daybook --help` for usage information.");
        Ok(())
    }
}
