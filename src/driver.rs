//! Load, stamp, migrate and persist a genesis file.
//!
//! The driver is the only place that does I/O. A document that fails to
//! decode never reaches [`GenesisStore::save`], so a half-migrated genesis is
//! never written.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{MigrationError, Result};
use crate::genesis::GenesisDocument;
use crate::migrate::pool_addresses_present;

pub const DEFAULT_CHAIN_ID: &str = "devnet-n";
pub const DEFAULT_GENESIS_TIME: &str = "2019-02-11T12:00:00Z";

/// Values stamped onto the migrated genesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationArgs {
    pub chain_id: String,
    /// RFC 3339, UTC, second precision.
    pub genesis_time: String,
}

impl MigrationArgs {
    /// Validate `genesis_time` and normalize it to `YYYY-MM-DDTHH:MM:SSZ`.
    /// A blank `chain_id` is rejected.
    pub fn new(chain_id: impl Into<String>, genesis_time: &str) -> Result<Self> {
        let chain_id = chain_id.into();
        if chain_id.trim().is_empty() {
            return Err(MigrationError::InvalidChainId(chain_id));
        }
        let parsed = DateTime::parse_from_rfc3339(genesis_time).map_err(|source| {
            MigrationError::InvalidGenesisTime {
                value: genesis_time.to_string(),
                source,
            }
        })?;
        Ok(Self {
            chain_id,
            genesis_time: parsed
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}

impl Default for MigrationArgs {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            genesis_time: DEFAULT_GENESIS_TIME.to_string(),
        }
    }
}

/// Where the genesis text comes from and goes to.
pub trait GenesisStore {
    fn load(&self) -> Result<String>;
    fn save(&mut self, contents: &str) -> Result<()>;
}

/// Reads `input` and writes `output` on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStore {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl FileStore {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

impl GenesisStore for FileStore {
    fn load(&self) -> Result<String> {
        fs::read_to_string(&self.input).map_err(|source| MigrationError::Io {
            path: self.input.clone(),
            source,
        })
    }

    fn save(&mut self, contents: &str) -> Result<()> {
        fs::write(&self.output, contents).map_err(|source| MigrationError::Io {
            path: self.output.clone(),
            source,
        })
    }
}

/// Run `transform` over the genesis held by `store`.
///
/// # Errors
/// Any load, decode or encode failure is returned before `save` is called.
pub fn run_migration<S, F>(store: &mut S, args: &MigrationArgs, transform: F) -> Result<()>
where
    S: GenesisStore,
    F: FnOnce(GenesisDocument, &MigrationArgs) -> GenesisDocument,
{
    let raw = store.load()?;
    debug!(bytes = raw.len(), "loaded genesis");

    let source: Value = serde_json::from_str(&raw).map_err(MigrationError::from_decode)?;
    let mut genesis = GenesisDocument::from_value(source.clone())?;
    info!(
        from_chain_id = %genesis.chain_id,
        accounts = genesis.app_state.accounts.len(),
        "decoded genesis"
    );
    for address in pool_addresses_present(&genesis) {
        warn!(address, "pool account already in genesis, it will be appended again");
    }

    genesis.chain_id = args.chain_id.clone();
    genesis.genesis_time = args.genesis_time.clone();

    let migrated = transform(genesis, args);
    let out = migrated.write_over(source)?;

    store.save(&out)?;
    info!(
        chain_id = %migrated.chain_id,
        genesis_time = %migrated.genesis_time,
        accounts = migrated.app_state.accounts.len(),
        "wrote migrated genesis"
    );
    Ok(())
}
