use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_DIRECTIVES: &str = "clash=warn";

fn directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => DEFAULT_LOG_DIRECTIVES,
        1 => "clash=info",
        2 => "clash=debug",
        _ => "clash=trace",
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `verbosity`.
/// Calling it again is a no-op.
pub fn init(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(directives(0), "clash=warn");
        assert_eq!(directives(2), "clash=debug");
        assert_eq!(directives(9), "clash=trace");
    }

    #[test]
    fn init_twice() {
        init(0);
        init(3);
    }
}
