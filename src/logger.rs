//! Logging setup for the binary. The library only emits `log` records; this
//! module wires them to `env_logger` at a level picked from the `-v` count.

use log::LevelFilter;

/// Map repeated `-v` flags onto a level: warnings by default, then info,
/// debug, trace.
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the `env_logger` backend. `RUST_LOG`, when set, overrides
/// `filter`. Calling this twice keeps the first logger.
pub fn init_logger(filter: LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init();

    if result.is_err() {
        log::debug!("logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, LevelFilter::Warn)]
    #[case(1, LevelFilter::Info)]
    #[case(2, LevelFilter::Debug)]
    #[case(5, LevelFilter::Trace)]
    fn maps_verbosity(#[case] verbose: u8, #[case] expected: LevelFilter) {
        assert_eq!(level_from_verbosity(verbose), expected);
    }
}
