//! Tracing setup.
//!
//! Log lines go to stderr so stdout carries only converter output and tables,
//! which keeps `nerkh convert ... > out.txt` clean. Logging is off unless
//! `--verbose` is given or `RUST_LOG` is set, so nothing interleaves with the
//! interactive prompt.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const CRATE_TARGET: &str = "nerkh";

/// Filter directives used when `RUST_LOG` is unset.
fn default_directives(verbose: bool) -> String {
    if verbose {
        format!("{CRATE_TARGET}=debug")
    } else {
        "off".to_string()
    }
}

pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();
}
