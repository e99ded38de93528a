//! Render command - render one section of a message file.

use lingua_log::debug;
use std::path::Path;

use crate::Context;
use crate::error::{CliError, CliResult};

/// Resolve `tag` against the messages under `base` and print every rendered
/// leaf of `section`, one `key = value` line each.
pub fn run(ctx: &Context, base: &Path, tag: &str, section: &str, args: &[String]) -> CliResult<()> {
    let args = parse_args(args)?;

    let message = ctx.db.open_messages(base)?;
    let segment = message.lookup(tag)?;
    debug!("Rendering {} from segment {}", section, segment.langtag());

    for (key, value) in segment.lookup(section).render(&args)? {
        println!("{} = {}", key, value);
    }

    Ok(())
}

fn parse_args(args: &[String]) -> CliResult<Vec<(&str, &str)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| CliError::InvalidArgument(format!("expected KEY=VALUE, got '{}'", arg)))
        })
        .collect()
}
