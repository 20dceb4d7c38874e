//! Routing from parsed subcommands to their implementations

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{
    add, backup, delete, edit, export, import, init, list, search, show, stats, tags, templates,
};
use daybook_core::error::Result;

use super::macros::trace_command;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = match self {
            Commands::Init => init::execute(ctx.cli, ctx.root),
            Commands::Templates => templates::execute(ctx.cli),
            Commands::Add(args) => add::execute(ctx.cli, &ctx.open_journal()?, args),
            Commands::List(args) => list::execute(ctx.cli, &ctx.open_journal()?, args),
            Commands::Show(args) => show::execute(ctx.cli, &ctx.open_journal()?, args),
            Commands::Edit(args) => edit::execute(ctx.cli, &ctx.open_journal()?, args),
            Commands::Delete(args) => delete::execute(ctx.cli, &ctx.open_journal()?, args),
            Commands::Search(args) => search::execute(ctx.cli, &ctx.open_journal()?, args),
            Commands::Tags => tags::execute(ctx.cli, &ctx.open_journal()?),
            Commands::Stats => stats::execute(ctx.cli, &ctx.open_journal()?),
            Commands::Export(args) => export::execute(ctx.cli, &ctx.open_journal()?, args),
            Commands::Import(args) => import::execute(ctx.cli, &ctx.open_journal()?, args),
            Commands::Backup => backup::execute(ctx.cli, &ctx.open_journal()?),
        };
        trace_command!(ctx.cli, ctx.start, "execute_command");
        result
    }
}
