//! Binary entry point: parse flags, set up logging, read the config file, and
//! hand the command to the library.
use clap::Parser;

use choir_songbook::cli::{run, Flags};
use choir_songbook::config::Settings;
use choir_songbook::logger::{init_logger, level_from_verbosity};

fn main() -> anyhow::Result<()> {
    let flags = Flags::parse();
    init_logger(level_from_verbosity(flags.verbose));

    let settings = Settings::load(flags.config.as_deref())?;
    run(flags, &settings, &mut std::io::stdout().lock())
}
