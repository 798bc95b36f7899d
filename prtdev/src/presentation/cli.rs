use clap::{ArgGroup, Parser, Subcommand};
use prt_core::resume::DEFAULT_CONFIG_NAME;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "prtdev: split files into parts and stitch them back", long_about = None)]
pub struct Cli {
    /// More output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a file into numbered .prt parts plus a hash record
    #[command(group(ArgGroup::new("size").required(true).args(["parts", "chunk_size"])))]
    Split {
        file: PathBuf,

        /// number of parts; the last part takes the remainder
        #[arg(short, long)]
        parts: Option<u64>,

        /// bytes per part; the last part holds what is left
        #[arg(short = 's', long)]
        chunk_size: Option<u64>,

        /// run stamp to use instead of the current time (MMDDYYYY_HHMM)
        #[arg(long)]
        run: Option<String>,

        /// where to save the resume config
        #[arg(long, default_value = DEFAULT_CONFIG_NAME, conflicts_with = "no_config")]
        config: PathBuf,

        /// do not write a resume config
        #[arg(long)]
        no_config: bool,
    },

    /// Stitch the parts of a file back together
    Stitch {
        /// original file path; parts are looked up next to it
        file: PathBuf,

        /// output path (defaults to the original path)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// hash record written by split, used to verify the result
        #[arg(long = "hash-file")]
        hash_file: Option<PathBuf>,

        /// only use parts of this run
        #[arg(long)]
        run: Option<String>,
    },

    /// Stitch using the resume config written by split
    Resume {
        #[arg(long, default_value = DEFAULT_CONFIG_NAME)]
        config: PathBuf,

        /// output path (defaults to the original path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show the parts found for a file, grouped by run
    List {
        file: PathBuf,

        #[arg(long)]
        run: Option<String>,
    },

    /// Check a file against a hash record
    Verify {
        file: PathBuf,

        #[arg(long = "hash-file")]
        hash_file: PathBuf,
    },
}
