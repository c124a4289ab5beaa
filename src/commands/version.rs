//! Command: print version information.

/// Version string baked in by the build script, or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("MACIFY_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the macify version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("macify {}", version());
}
