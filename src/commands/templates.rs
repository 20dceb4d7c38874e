//! `daybook templates` - list the built-in entry templates

use crate::cli::Cli;
use crate::commands::format::{output_by_format, print_json};
use daybook_core::error::Result;
use daybook_core::templates::TEMPLATES;

pub fn execute(cli: &Cli) -> Result<()> {
    output_by_format!(cli.format,
        json => print_json(TEMPLATES),
        human => {
            for template in TEMPLATES {
                println!("{:<20} {}  [{}]", template.key, template.title, template.tags.join(", "));
            }
        }
    )
}
