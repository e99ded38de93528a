//! Resolve command - show how language tags are understood.

use colored::Colorize;
use lingua_i18n::Subtag;

use crate::Context;
use crate::error::CliResult;

/// Print the canonical form, subtags, fallback chain and catalog entry of
/// each tag.
pub fn run(ctx: &Context, tags: &[String]) -> CliResult<()> {
    let langtags = ctx.db.langtags()?;

    for (i, text) in tags.iter().enumerate() {
        let tag = ctx.db.langtag(text)?;
        if i > 0 {
            println!();
        }

        println!("{} {}", tag.name().cyan().bold(), format!("({})", text).as_str().dimmed());
        let language = tag.language();
        println!("  {:<10} {} ({})", "language:", language.code(), language.name());
        if let Some(script) = tag.script() {
            println!("  {:<10} {} ({})", "script:", script.code(), script.name());
        }
        if let Some(region) = tag.region() {
            println!(
                "  {:<10} {} ({}) {}",
                "region:",
                region.code(),
                region.name(),
                region.flag()
            );
        }
        if !tag.fallbacks().is_empty() {
            println!("  {:<10} {}", "fallback:", tag.fallbacks().join(" > "));
        }

        match langtags.lookup_tag(&tag) {
            Ok(item) => println!(
                "  {:<10} {} - {} ({})",
                "catalog:",
                item.tag().name(),
                item.recognition(),
                item.description()
            ),
            Err(e) if e.is_lookup_miss() => {
                println!("  {:<10} {}", "catalog:", "no entry".yellow());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
