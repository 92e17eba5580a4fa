//! Typed view of the genesis document.
//!
//! Only the paths the migration touches are modelled as fields. Every struct
//! carries a flattened `extra` map so the rest of the genesis file passes
//! through a load/save cycle untouched. Serde writes modelled fields before
//! flattened ones, so the driver saves through
//! [`GenesisDocument::write_over`], which keeps the key order of the source
//! file. Required sub-structs (`distribution`, `account.params`,
//! `trustaking.params`, `accounts`) make a document that lacks them fail at
//! decode time, before anything is mutated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MigrationError, Result};

/// Keys not modelled explicitly at a given level.
pub type Extra = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenesisDocument {
    #[serde(default)]
    pub genesis_time: String,
    #[serde(default)]
    pub chain_id: String,
    pub app_state: AppState,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub distribution: Distribution,
    pub account: AccountModule,
    pub trustaking: Trustaking,
    pub accounts: Vec<GenesisAccount>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(default)]
    pub community_tax: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// The `account` module section (not to be confused with `accounts`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountModule {
    pub params: AccountParams,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountParams {
    #[serde(default)]
    pub user_growth_allocation: String,
    #[serde(default)]
    pub stakeholder_allocation: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trustaking {
    pub params: TrustakingParams,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustakingParams {
    #[serde(default)]
    pub user_reward_allocation: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    /// Integer amount, string encoded.
    pub amount: String,
}

/// Account owned by a protocol module rather than a key pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleAccount {
    pub address: String,
    pub coins: Vec<Coin>,
    pub sequence_number: String,
    pub account_number: String,
    pub original_vesting: Vec<Coin>,
    pub delegated_free: Vec<Coin>,
    pub delegated_vesting: Vec<Coin>,
    pub start_time: String,
    pub end_time: String,
    pub module_name: String,
    pub module_permissions: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Entry of `app_state.accounts`. Anything that does not decode as a module
/// account is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenesisAccount {
    Module(ModuleAccount),
    Base(Value),
}

impl GenesisAccount {
    pub fn address(&self) -> Option<&str> {
        match self {
            GenesisAccount::Module(m) => Some(&m.address),
            GenesisAccount::Base(v) => v.get("address").and_then(Value::as_str),
        }
    }

    pub fn module_name(&self) -> Option<&str> {
        match self {
            GenesisAccount::Module(m) => Some(&m.module_name),
            GenesisAccount::Base(_) => None,
        }
    }
}

impl GenesisDocument {
    /// Decode a genesis file.
    ///
    /// # Errors
    /// `Parse` for malformed JSON, `MissingPath` when a required section is
    /// absent.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(MigrationError::from_decode)
    }

    /// Decode from an already parsed tree.
    pub fn from_value(source: Value) -> Result<Self> {
        serde_json::from_value(source).map_err(MigrationError::from_decode)
    }

    /// Encode onto `source`, the tree this document was decoded from.
    ///
    /// Keys keep their position in `source`; keys that are new to it go last
    /// in their object. Array elements are matched by index.
    pub fn write_over(&self, mut source: Value) -> Result<String> {
        let typed = serde_json::to_value(self).map_err(MigrationError::Serialize)?;
        overlay(&mut source, typed);
        let mut out = serde_json::to_string_pretty(&source).map_err(MigrationError::Serialize)?;
        out.push('\n');
        Ok(out)
    }

    /// Encode with two-space indentation and a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self).map_err(MigrationError::Serialize)?;
        out.push('\n');
        Ok(out)
    }
}

fn overlay(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(dst), Value::Array(src)) => {
            dst.truncate(src.len());
            let mut src = src.into_iter();
            for (slot, value) in dst.iter_mut().zip(src.by_ref()) {
                overlay(slot, value);
            }
            dst.extend(src);
        }
        (slot, value) => *slot = value,
    }
}
