//! Generate command - create message files for requested languages.

use colored::Colorize;
use lingua_i18n::Segment;
use lingua_log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::Context;
use crate::error::CliResult;

/// Load existing message files under `base`, add an empty segment for each
/// requested language without a file, and write everything back.
///
/// Each new file is named after the requested tag in canonical form, not
/// after the catalog entry answering for it: `zh_hans_sg` writes
/// `zh-Hans-SG.toml` even though its entry is `zh-Hans`.
pub fn run(ctx: &Context, base: &Path, languages: &[String]) -> CliResult<()> {
    fs::create_dir_all(base)?;

    let message = ctx.db.open_messages(base)?;
    let existing = message.preload()?;
    debug!("Found {} message files in {}", existing, base.display());

    let langtags = ctx.db.langtags()?;
    let mut created = HashSet::new();
    for language in languages {
        let tag = ctx.db.langtag(language)?;
        if message.path_for(tag.name()).is_file() {
            continue;
        }
        message.insert(Segment::generate(langtags, tag.name())?);
        created.insert(tag.name().to_string());
    }

    for path in message.dump(base)? {
        if ctx.quiet {
            continue;
        }
        let is_new = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(message.suffix()))
            .is_some_and(|name| created.contains(name));
        if is_new {
            println!("  {} {}", "CREATE".green().bold(), path.display());
        } else {
            println!("  {} {}", "UPDATE".yellow().bold(), path.display());
        }
    }

    Ok(())
}
