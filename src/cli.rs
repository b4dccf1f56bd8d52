//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mtdname")]
#[command(author, version, about = "Resolve MTD partition names to devices", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// MTD status table to read
    #[arg(long, global = true, default_value = mtdname_index::PROC_MTD)]
    pub proc_mtd: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the unit number of a partition
    Resolve {
        /// Partition name (case-sensitive, without quotes)
        name: String,
    },

    /// Print the device node of a partition
    Path {
        /// Partition name (case-sensitive, without quotes)
        name: String,
    },

    /// List all partitions in the MTD table
    List,

    /// Resolve a device selector such as `name=bios` or `dev=0`
    Select {
        /// Comma-separated key=value options
        target: String,
    },
}
