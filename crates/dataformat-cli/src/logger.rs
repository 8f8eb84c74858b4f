use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATES: &[&str] = &[
    "dataformat_cli",
    "dataformat_traits",
    "dataformats",
    "xml_dom_dataformat",
    "xpath_test_harness",
];

fn directives(level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|name| format!("{}={}", name, level)));
    directives.join(",")
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `verbose`
pub fn init_cli_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_cover_every_crate() {
        let debug = directives("debug");
        assert!(debug.starts_with("warn,"));
        assert!(debug.contains("xml_dom_dataformat=debug"));
        assert_eq!(debug.matches('=').count(), CRATES.len());
    }
}
