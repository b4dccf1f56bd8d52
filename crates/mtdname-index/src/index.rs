//! Lazily built, shared MTD name index

use crate::error::{MtdIndexError, Result};
use crate::table::{NameIndex, PROC_MTD};
use log::debug;
use once_cell::sync::Lazy;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Device root
const DEV_ROOT: &str = "/dev";

/// Index over `/proc/mtd`, shared by [`name_to_unit`]
static PROC_MTD_INDEX: Lazy<MtdIndex> = Lazy::new(MtdIndex::proc_mtd);

/// Configuration for an MTD index
#[derive(Debug, Clone)]
pub struct MtdIndexConfig {
    /// Path of the device table to read
    pub source: PathBuf,
}

impl MtdIndexConfig {
    /// Create a configuration reading the table at `source`
    pub fn with_source(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl Default for MtdIndexConfig {
    fn default() -> Self {
        Self::with_source(PROC_MTD)
    }
}

/// MTD partition name resolver
///
/// The device table is read on the first lookup and the resulting
/// [`NameIndex`] serves every later lookup without touching the table again.
/// The build runs under a lock, so concurrent first use still reads the
/// table once.
///
/// A failed build publishes nothing: the index stays unbuilt and the next
/// lookup retries from scratch.
///
/// # Example
///
/// ```no_run
/// use mtdname_index::{MtdIndex, MtdIndexConfig};
///
/// let index = MtdIndex::new(&MtdIndexConfig::default());
/// let unit = index.resolve("bios")?;
/// println!("bios is /dev/mtd{}", unit);
/// # Ok::<(), mtdname_index::MtdIndexError>(())
/// ```
#[derive(Debug)]
pub struct MtdIndex {
    /// Device table path
    source: PathBuf,
    /// Built index, `None` until the first successful build
    cached: Mutex<Option<Arc<NameIndex>>>,
}

impl MtdIndex {
    /// Create an unbuilt index over the configured device table
    pub fn new(config: &MtdIndexConfig) -> Self {
        Self {
            source: config.source.clone(),
            cached: Mutex::new(None),
        }
    }

    /// Create an unbuilt index over `/proc/mtd`
    pub fn proc_mtd() -> Self {
        Self::new(&MtdIndexConfig::default())
    }

    /// Path of the device table
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Whether the table has been read successfully
    pub fn is_built(&self) -> bool {
        self.lock().is_some()
    }

    /// Resolve a partition name to its MTD unit number
    ///
    /// # Errors
    /// - I/O errors if the table cannot be opened or read
    /// - Parse errors if a device line carries a malformed unit number
    /// - [`MtdIndexError::NotFound`] if the table has no such name
    pub fn resolve(&self, name: &str) -> Result<u32> {
        self.snapshot()?
            .get(name)
            .ok_or_else(|| MtdIndexError::NotFound(name.to_string()))
    }

    /// Shared handle to the built index, building it if needed
    pub fn snapshot(&self) -> Result<Arc<NameIndex>> {
        let mut cached = self.lock();
        if let Some(index) = cached.as_ref() {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(self.build()?);
        *cached = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Drop the cached index so the next lookup re-reads the table
    ///
    /// Handles returned by [`snapshot`](Self::snapshot) stay valid.
    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            debug!("Dropped MTD index for {}", self.source.display());
        }
    }

    /// Re-read the table now
    ///
    /// On failure the index is left unbuilt.
    pub fn reload(&self) -> Result<Arc<NameIndex>> {
        let mut cached = self.lock();
        *cached = None;

        let index = Arc::new(self.build()?);
        *cached = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Read and parse the device table
    fn build(&self) -> Result<NameIndex> {
        let path = self.source.display().to_string();
        debug!("Reading MTD table from {}", path);

        let file = File::open(&self.source).map_err(|e| MtdIndexError::Open {
            path: path.clone(),
            source: e,
        })?;
        let index = NameIndex::parse(BufReader::new(file), &path)?;

        debug!("Indexed {} MTD partitions from {}", index.len(), path);
        Ok(index)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<NameIndex>>> {
        // The guarded value is only ever replaced whole, so a poisoned lock
        // still holds a consistent state.
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolve a partition name against the process-wide `/proc/mtd` index
///
/// The table is read on the first call and cached for the life of the
/// process.
pub fn name_to_unit(name: &str) -> Result<u32> {
    PROC_MTD_INDEX.resolve(name)
}

/// Character device node for an MTD unit
pub fn device_path(unit: u32) -> PathBuf {
    PathBuf::from(format!("{}/mtd{}", DEV_ROOT, unit))
}
