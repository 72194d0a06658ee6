//! Command: check the policy source without writing anything.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::{Logger, TaskStatus};
use crate::output;
use crate::policy::validation::{self, ValidationWarning};
use crate::policy::{Browser, metadata};
use crate::transcode::Format;

/// Run the validate command.
///
/// Loads the source, reports validation warnings, and transcodes every
/// output in memory so serialization errors surface without touching disk.
///
/// # Errors
///
/// Returns an error if the source cannot be loaded or any output fails to
/// transcode. Warnings alone do not fail the command.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let source = super::load_source(global, log)?;

    for name in source.unknown_browsers() {
        log.warn(&format!("ignoring unknown browser '{name}' in policy source"));
    }

    for browser in Browser::ALL {
        log.stage(&format!("Validating {browser}"));
        report("metadata", &validation::validate_metadata(browser), log);

        let Some(policies) = source.policies(browser) else {
            log.info("no policies defined");
            log.record_task(browser.as_str(), TaskStatus::Skipped, Some("no policies defined"));
            continue;
        };
        let Some(meta) = metadata(browser) else {
            continue;
        };
        for validator in validation::VALIDATORS {
            report(validator.name(), &validator.validate(browser, policies), log);
        }

        for format in Format::ALL {
            let Some(rendered) = output::render(policies, format, meta) else {
                continue;
            };
            let name = format!("{browser}/{format}");
            match rendered {
                Ok(bytes) => {
                    log.debug(&format!("{name}: {} bytes", bytes.len()));
                    log.record_task(&name, TaskStatus::Ok, None);
                }
                Err(e) => {
                    log.error(&format!("{name}: {e}"));
                    log.record_task(&name, TaskStatus::Failed, Some(&e.to_string()));
                }
            }
        }
    }

    super::finish(log)
}

fn report(check: &str, warnings: &[ValidationWarning], log: &Logger) {
    if warnings.is_empty() {
        log.debug(&format!("{check}: ok"));
        return;
    }
    log.warn(&format!("{check}: found {} warning(s):", warnings.len()));
    for warning in warnings {
        log.warn(&format!(
            "  {} [{}]: {}",
            warning.source, warning.item, warning.message
        ));
    }
}
