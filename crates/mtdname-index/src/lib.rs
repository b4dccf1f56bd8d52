//! mtdname-index - Linux MTD partition name lookup
//!
//! Flashing and provisioning tools usually know the partition they want by
//! name ("bios", "u-boot-env") rather than by device number. This crate reads
//! the kernel's MTD status table, builds a name to unit index from it and
//! answers lookups from that index.
//!
//! # Overview
//!
//! The table is read once, on the first lookup. Later lookups never touch
//! it again, so device hot-plug after the first lookup is not observed unless
//! the index is explicitly invalidated or reloaded.
//!
//! Errors fall into three groups:
//!
//! - I/O: the table cannot be opened or read
//! - Parse: a device line carries a malformed unit number
//! - Not found: the table is fine but has no such partition
//!
//! # Example
//!
//! ```no_run
//! use mtdname_index::{device_path, name_to_unit};
//!
//! // Look up the "bios" partition in /proc/mtd
//! let unit = name_to_unit("bios")?;
//! println!("bios is {}", device_path(unit).display());
//! # Ok::<(), mtdname_index::MtdIndexError>(())
//! ```
//!
//! An explicit index instance can point at another table:
//!
//! ```no_run
//! use mtdname_index::{MtdIndex, MtdIndexConfig};
//!
//! let index = MtdIndex::new(&MtdIndexConfig::with_source("/tmp/mtd"));
//! for (name, unit) in index.snapshot()?.entries() {
//!     println!("mtd{}: {}", unit, name);
//! }
//! # Ok::<(), mtdname_index::MtdIndexError>(())
//! ```
//!
//! # Table format
//!
//! ```text
//! dev:    size   erasesize  name
//! mtd0: 00080000 00010000 "bios"
//! mtd1: 00040000 00010000 "u-boot-env"
//! ```

pub mod error;
pub mod index;
pub mod options;
pub mod table;

// Re-exports
pub use error::{MtdIndexError, Result};
pub use index::{device_path, name_to_unit, MtdIndex, MtdIndexConfig};
pub use options::{parse_options, parse_target_string, MtdTarget};
pub use table::{NameIndex, PROC_MTD};
