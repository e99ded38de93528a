//! Tags command - list the language tag catalog.

use colored::Colorize;

use crate::Context;
use crate::error::CliResult;

/// Print one line per catalog entry.
pub fn run(ctx: &Context) -> CliResult<()> {
    let langtags = ctx.db.langtags()?;

    for item in langtags.items() {
        let aliases: Vec<&str> = item.aliases().iter().map(|alias| alias.name()).collect();
        print!(
            "{:<12} {:<20} {}",
            item.tag().name().cyan(),
            item.recognition(),
            item.description()
        );
        if aliases.is_empty() {
            println!();
        } else {
            println!(" {}", format!("[{}]", aliases.join(", ")).as_str().dimmed());
        }
    }

    if !ctx.quiet {
        println!();
        println!("{} tags", langtags.len());
    }

    Ok(())
}
