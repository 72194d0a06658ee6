//! Command: generate policy files for every platform.
use anyhow::Result;

use crate::cli::{GenerateOpts, GlobalOpts};
use crate::logging::Logger;
use crate::output::{self, GenerateOptions};

/// Run the generate command.
///
/// # Errors
///
/// Returns an error if the policy source cannot be loaded, a `--browser`
/// value is unknown, or any output failed. Every output is attempted before
/// failing.
pub fn run(global: &GlobalOpts, opts: &GenerateOpts, log: &Logger) -> Result<()> {
    log.info(&format!("policygen {}", super::version::version()));

    let browsers = super::resolve_browsers(&opts.browser)?;
    let source = super::load_source(global, log)?;

    let options = GenerateOptions {
        output_root: global.output.clone(),
        browsers,
        dry_run: global.dry_run,
    };
    let summary = output::generate(&source, &options, log);
    log.debug(&format!(
        "{} written, {} failed, {} skipped",
        summary.succeeded().count(),
        summary.failed().count(),
        summary.skipped.len()
    ));

    super::finish(log)
}
