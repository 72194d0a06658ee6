//! Subcommand implementations and the setup they share.
pub mod generate;
pub mod validate;
pub mod version;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::policy::{Browser, PolicySource};

/// Load the policy source named on the command line.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_source(global: &GlobalOpts, log: &Logger) -> Result<PolicySource> {
    log.stage("Loading policy source");
    let source = PolicySource::load(&global.input)
        .with_context(|| format!("loading {}", global.input.display()))?;

    for browser in Browser::ALL {
        match source.policies(browser) {
            Some(policies) => log.debug(&format!("{browser}: {} policies", policies.len())),
            None => log.debug(&format!("{browser}: not defined")),
        }
    }
    log.info(&format!("loaded {}", global.input.display()));
    Ok(source)
}

/// Resolve `--browser` values, defaulting to every browser.
///
/// Duplicates are dropped; the order is always chrome, brave, edge.
///
/// # Errors
///
/// Returns an error naming the first value that is not a known browser.
pub fn resolve_browsers(names: &[String]) -> Result<Vec<Browser>> {
    if names.is_empty() {
        return Ok(Browser::ALL.to_vec());
    }
    let requested = names
        .iter()
        .map(|n| n.trim().parse::<Browser>().map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()?;
    Ok(Browser::ALL
        .into_iter()
        .filter(|b| requested.contains(b))
        .collect())
}

/// Print the summary and bail if any output failed.
///
/// # Errors
///
/// Returns an error if one or more outputs recorded a failure.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} output(s) failed");
    }
    Ok(())
}
