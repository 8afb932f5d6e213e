use tracing_subscriber::EnvFilter;

/// Installs the global subscriber on stderr, leaving stdout to the breakdown.
///
/// `RUST_LOG` takes precedence over `verbose`.
pub fn init_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "compound_projection=debug"
    } else {
        "compound_projection=info"
    }
}
