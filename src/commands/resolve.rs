//! Name resolution commands

use mtdname_index::{device_path, parse_target_string, MtdIndex};

/// Print the unit number of a partition
pub fn cmd_resolve(index: &MtdIndex, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let unit = index.resolve(name)?;
    log::debug!("'{}' is mtd{}", name, unit);
    println!("{}", unit);
    Ok(())
}

/// Print the device node of a partition
pub fn cmd_path(index: &MtdIndex, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let unit = index.resolve(name)?;
    println!("{}", device_path(unit).display());
    Ok(())
}

/// Resolve a `name=...` or `dev=...` selector to a device node
pub fn cmd_select(index: &MtdIndex, target: &str) -> Result<(), Box<dyn std::error::Error>> {
    let target = parse_target_string(target)?;
    let unit = target.resolve(index)?;
    log::debug!("{:?} is mtd{}", target, unit);
    println!("{}", device_path(unit).display());
    Ok(())
}
