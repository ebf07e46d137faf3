use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over the
/// verbosity flag.
pub fn init_cli_logger(verbose: bool) {
    let default_directive = if verbose {
        "shelterscope=debug,info"
    } else {
        "shelterscope=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
