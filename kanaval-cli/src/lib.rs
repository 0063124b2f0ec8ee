//! kanaval-cli: command-line and HTTP front-ends for kanaval-engine.

pub mod report;
pub mod server;
pub mod settings;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for a binary.
///
/// `RUST_LOG` wins when set; otherwise info level, or debug with `verbose`.
/// Logs go to stderr so that command output on stdout stays machine-readable.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "kanaval=debug,kanaval_cli=debug,kanaval_engine=debug,kanaval_server=debug,tower_http=debug"
    } else {
        "kanaval=info,kanaval_cli=info,kanaval_engine=info,kanaval_server=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
