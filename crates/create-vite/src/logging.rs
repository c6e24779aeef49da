//! Tracing subscriber initialisation.
//!
//! `scaffold-core` only emits events; the binary owns the subscriber.
//! Verbosity: none = warn, `-v` info, `-vv` debug, `-vvv` trace, `--quiet`
//! error. `RUST_LOG` overrides all of these.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let level = derive_level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("create_vite={level},scaffold_core={level}")));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn derive_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
