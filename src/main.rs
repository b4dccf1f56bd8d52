//! mtdname - Linux MTD partition lookup
//!
//! Resolves MTD partition names from `/proc/mtd` to unit numbers and
//! `/dev/mtdN` device nodes, for use from flashing scripts:
//!
//! ```bash
//! flashcp image.bin "$(mtdname path bios)"
//! ```

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use mtdname_index::{MtdIndex, MtdIndexConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let index = MtdIndex::new(&MtdIndexConfig::with_source(&cli.proc_mtd));

    match cli.command {
        Commands::Resolve { name } => commands::cmd_resolve(&index, &name),
        Commands::Path { name } => commands::cmd_path(&index, &name),
        Commands::List => commands::cmd_list(&index),
        Commands::Select { target } => commands::cmd_select(&index, &target),
    }
}
