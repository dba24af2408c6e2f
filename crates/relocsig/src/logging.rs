//! Tracing setup for the `relocsig` binary.
//!
//! The subscriber is only installed when `RELOCSIG_LOG` (or `RUST_LOG`) is
//! set, or when `--verbose` is passed. Output goes to stderr so it never
//! mixes with command output on stdout.
//!
//! ```bash
//! RELOCSIG_LOG=debug relocsig parse method '<T:Ljava/lang/Object;>(TT;)V'
//! RELOCSIG_LOG="relocator_signature=trace" relocsig classes type 'Ljava/util/List;'
//! ```

use tracing_subscriber::EnvFilter;

const LOG_VAR: &str = "RELOCSIG_LOG";

/// `RELOCSIG_LOG` takes precedence over `RUST_LOG`; `--verbose` overrides both.
fn build_filter(verbose: bool) -> Option<EnvFilter> {
    if verbose {
        return Some(EnvFilter::new("debug"));
    }
    if let Ok(val) = std::env::var(LOG_VAR) {
        return Some(EnvFilter::builder().parse_lossy(val));
    }
    if std::env::var("RUST_LOG").is_ok() {
        return Some(EnvFilter::from_default_env());
    }
    None
}

pub fn init_tracing(verbose: bool) {
    let Some(filter) = build_filter(verbose) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
