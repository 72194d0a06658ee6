//! Generation orchestrator: one output per (browser, format) pair.
//!
//! Every output is an independent unit. A failure is logged and recorded,
//! and the remaining outputs are still attempted; the caller decides the exit
//! status from the returned [`GenerationSummary`].
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{OutputError, TranscodeError};
use crate::logging::{Log, TaskStatus};
use crate::policy::validation;
use crate::policy::{Browser, BrowserMetadata, PolicyMap, PolicySource, metadata};
use crate::transcode::{Format, json, profile, registry};

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory the `macos/`, `windows/` and `linux/` trees are written under.
    pub output_root: PathBuf,
    /// Browsers to generate, in order.
    pub browsers: Vec<Browser>,
    /// Transcode everything but write nothing.
    pub dry_run: bool,
}

impl GenerateOptions {
    /// Generate every browser into `output_root`.
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            browsers: Browser::ALL.to_vec(),
            dry_run: false,
        }
    }
}

/// The result of one (browser, format) output.
#[derive(Debug)]
pub struct OutputRecord {
    /// Browser the output belongs to.
    pub browser: Browser,
    /// Output format.
    pub format: Format,
    /// Destination path on success.
    pub result: Result<PathBuf, OutputError>,
}

impl OutputRecord {
    /// Summary name of the output, e.g. `chrome/registry`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}/{}", self.browser, self.format)
    }
}

/// Everything a generation run attempted.
#[derive(Debug, Default)]
pub struct GenerationSummary {
    /// Attempted outputs, in generation order.
    pub outputs: Vec<OutputRecord>,
    /// Browsers skipped for lack of policies or metadata.
    pub skipped: Vec<Browser>,
}

impl GenerationSummary {
    /// Outputs that were written (or would have been, in dry-run mode).
    pub fn succeeded(&self) -> impl Iterator<Item = &OutputRecord> {
        self.outputs.iter().filter(|o| o.result.is_ok())
    }

    /// Outputs that failed.
    pub fn failed(&self) -> impl Iterator<Item = &OutputRecord> {
        self.outputs.iter().filter(|o| o.result.is_err())
    }

    /// Whether every attempted output succeeded. Skipped browsers do not count.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Destination of `format` for `browser`, or `None` when the browser has no
/// metadata for that format.
#[must_use]
pub fn output_path(
    root: &Path,
    browser: Browser,
    format: Format,
    meta: &BrowserMetadata,
) -> Option<PathBuf> {
    let file_name = match format {
        Format::MobileConfig => meta.profile.map(|_| format!("{browser}.mobileconfig")),
        Format::Registry => meta.registry.map(|_| format!("{browser}.reg")),
        Format::Json => meta.json.map(|j| j.file_name(browser)),
    }?;
    Some(root.join(format.platform_dir()).join(file_name))
}

/// Transcode `policies` into the bytes of `format`.
///
/// Returns `None` when the browser has no metadata for that format. JSON
/// output gains a trailing newline here so every writer sees final content.
#[must_use]
pub fn render(
    policies: &PolicyMap,
    format: Format,
    meta: &BrowserMetadata,
) -> Option<Result<Vec<u8>, TranscodeError>> {
    match format {
        Format::MobileConfig => meta
            .profile
            .map(|profile_meta| profile::to_mobileconfig(policies, &profile_meta)),
        Format::Registry => meta
            .registry
            .map(|reg| Ok(registry::to_registry(policies, &reg).into_bytes())),
        Format::Json => meta.json.map(|_| {
            json::to_json(policies).map(|mut text| {
                text.push('\n');
                text.into_bytes()
            })
        }),
    }
}

/// Write `content` to `path`, creating the parent directory first.
///
/// # Errors
///
/// Returns [`OutputError::CreateDir`] or [`OutputError::Write`] with the
/// offending path.
pub fn write_output(path: &Path, content: &[u8]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let write_err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::File::create(path).map_err(write_err)?;
    file.write_all(content).map_err(write_err)?;
    file.flush().map_err(write_err)
}

/// Generate every requested browser from `source`.
///
/// Never fails as a whole: skipped browsers and per-output failures are
/// logged, recorded through [`Log::record_task`], and returned in the
/// summary.
pub fn generate(
    source: &PolicySource,
    opts: &GenerateOptions,
    log: &dyn Log,
) -> GenerationSummary {
    let mut summary = GenerationSummary::default();

    for name in source.unknown_browsers() {
        log.warn(&format!("ignoring unknown browser '{name}' in policy source"));
    }

    for &browser in &opts.browsers {
        log.stage(&format!("Generating {browser}"));

        let Some(policies) = source.policies(browser) else {
            skip(&mut summary, browser, "no policies defined", log);
            continue;
        };
        let Some(meta) = metadata(browser) else {
            skip(&mut summary, browser, "no metadata defined", log);
            continue;
        };

        log.debug(&format!("{} policies", policies.len()));
        for warning in validation::validate(browser, policies) {
            log.warn(&format!("{} [{}]: {}", warning.source, warning.item, warning.message));
        }

        for format in Format::ALL {
            let Some(path) = output_path(&opts.output_root, browser, format, meta) else {
                log.debug(&format!("{browser}: no {format} metadata, not generated"));
                continue;
            };
            let Some(rendered) = render(policies, format, meta) else {
                continue;
            };
            let record = OutputRecord {
                browser,
                format,
                result: emit(&path, rendered, opts.dry_run, log),
            };
            report(&record, opts.dry_run, log);
            summary.outputs.push(record);
        }
    }

    summary
}

fn emit(
    path: &Path,
    rendered: Result<Vec<u8>, TranscodeError>,
    dry_run: bool,
    log: &dyn Log,
) -> Result<PathBuf, OutputError> {
    let content = rendered.map_err(|source| OutputError::Transcode {
        path: path.to_path_buf(),
        source,
    })?;
    if dry_run {
        log.dry_run(&format!("would write {} ({} bytes)", path.display(), content.len()));
    } else {
        write_output(path, &content)?;
        log.info(&format!("wrote {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn report(record: &OutputRecord, dry_run: bool, log: &dyn Log) {
    let name = record.name();
    match &record.result {
        Ok(path) => {
            let status = if dry_run { TaskStatus::DryRun } else { TaskStatus::Ok };
            log.record_task(&name, status, Some(&path.display().to_string()));
        }
        Err(e) => {
            log.error(&format!("{name}: {e}"));
            log.record_task(&name, TaskStatus::Failed, Some(&e.to_string()));
        }
    }
}

fn skip(summary: &mut GenerationSummary, browser: Browser, reason: &str, log: &dyn Log) {
    log.warn(&format!("skipping {browser}: {reason}"));
    log.record_task(browser.as_str(), TaskStatus::Skipped, Some(reason));
    summary.skipped.push(browser);
}
