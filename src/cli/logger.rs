// Logging setup for the CLI
use std::io::Write;

/// Level for `freshstats` log records given the verbosity flags
pub fn level_for(verbose: bool, quiet: bool) -> log::LevelFilter {
    if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    }
}

/// Initialize the logger. Output goes to stderr so stdout stays pure JSON.
///
/// `RUST_LOG`, when set, replaces all of the filtering below.
pub fn init_logger(verbose: bool, quiet: bool) {
    if std::env::var("RUST_LOG").is_ok() {
        return env_logger::init();
    }

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbose, quiet))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            if record.level() == log::Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
            }
        });

    // page fetches and cache refreshes, without dependency chatter
    if verbose {
        builder.filter_module("freshstats", log::LevelFilter::Debug);
        for noisy in ["reqwest", "hyper", "hyper_util", "rustls", "tokio"] {
            builder.filter_module(noisy, log::LevelFilter::Info);
        }
    }

    builder.init();
}
