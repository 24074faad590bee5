//! Command-line surface:
//!
//! ```text
//! choir-songbook songbook sync --site <DIR> --sheets <DIR>
//! choir-songbook songbook missing --site <DIR> -c <COLUMN>
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use crate::config::Settings;
use crate::models::Field;
use crate::sync::{missing_songs, sync_songbook};

#[derive(Debug, Parser)]
#[command(name = "choir-songbook", version, about)]
pub struct Flags {
    /// Config file to read instead of the default location
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Maintain the song catalog
    #[command(subcommand)]
    Songbook(SongbookCommand),
}

#[derive(Debug, Subcommand)]
pub enum SongbookCommand {
    /// Add sheet-music files to the catalog and rewrite both exports
    Sync {
        /// Site directory holding `_data/songs.csv`
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        site: Option<PathBuf>,
        /// Folder with the sheet-music files
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        sheets: Option<PathBuf>,
    },
    /// List songs with an empty column
    Missing {
        /// Site directory holding `_data/songs.csv`
        #[arg(long, value_hint = clap::ValueHint::DirPath)]
        site: Option<PathBuf>,
        /// Column to check: name, key, hymn_reference or sheet_type
        #[arg(short, long)]
        column: Field,
    },
}

/// Run the parsed command, writing user-facing output to `out`.
pub fn run<W: Write>(flags: Flags, settings: &Settings, out: &mut W) -> Result<()> {
    match flags.command {
        Command::Songbook(SongbookCommand::Sync { site, sheets }) => {
            let site = settings.resolve_site(site)?;
            let sheets = settings.resolve_sheets(sheets)?;
            writeln!(out, "Site directory: {}", site.display())?;
            writeln!(out, "Sheet directory: {}", sheets.display())?;
            let report = sync_songbook(&site, &sheets).context("failed to sync the songbooks")?;
            writeln!(out, "Successfully synced the songbooks! ({report})")?;
        }
        Command::Songbook(SongbookCommand::Missing { site, column }) => {
            let site = settings.resolve_site(site)?;
            for name in missing_songs(&site, column)? {
                writeln!(out, "{name}")?;
            }
        }
    }
    Ok(())
}
