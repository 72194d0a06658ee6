//! Command: print version information.

/// Version string: `POLICYGEN_VERSION` from the build, else the package version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("POLICYGEN_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the policygen version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("policygen {}", version());
}
