//! List command implementation

use mtdname_index::{device_path, MtdIndex};

/// List all partitions in the MTD table
pub fn cmd_list(index: &MtdIndex) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = index.snapshot()?;

    if snapshot.is_empty() {
        log::warn!("No MTD partitions listed in {}", index.source().display());
        return Ok(());
    }

    println!("{:>4}  {:<12} Name", "Unit", "Device");
    println!("{}", "-".repeat(40));

    for (name, unit) in snapshot.entries() {
        println!(
            "{:>4}  {:<12} {}",
            unit,
            device_path(unit).display().to_string(),
            name
        );
    }

    Ok(())
}
