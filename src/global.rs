//! Process-wide default engine and free-function shortcuts.
//!
//! Prefer constructing a [`PincodeData`] and passing it around; these
//! functions exist for one-off lookups against the default data file.

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use crate::data::model::{PincodeRecord, Statistics};
use crate::engine::PincodeData;
use crate::error::Result;
use crate::pincode::PincodeInput;

/// Environment variable overriding the default data file.
pub const DATA_FILE_ENV: &str = "PININ_DATA_FILE";

/// Data file shipped with the crate.
pub const BUNDLED_DATA_FILE: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/data/All_India_pincode_data.csv");

// A `Mutex` rather than `OnceLock` because loading is fallible and
// `OnceLock::get_or_try_init` is unstable. Holding the lock across the load
// means concurrent first callers wait for a single load instead of racing.
// A failed load is not cached; the next call tries again.
static DEFAULT_ENGINE: Mutex<Option<Arc<PincodeData>>> = Mutex::new(None);

/// Resolve the default data file: `PININ_DATA_FILE`, else the bundled CSV.
pub fn default_data_file() -> PathBuf {
    match env::var_os(DATA_FILE_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(BUNDLED_DATA_FILE),
    }
}

/// The shared default engine, loading it on first use.
pub fn default_engine() -> Result<Arc<PincodeData>> {
    let mut slot = DEFAULT_ENGINE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(engine) = &*slot {
        return Ok(Arc::clone(engine));
    }

    debug!("initialising default pincode engine");
    let engine = Arc::new(PincodeData::new()?);
    *slot = Some(Arc::clone(&engine));
    Ok(engine)
}

/// All rows for `pincode` in the default dataset.
pub fn pincode_info<'a>(pincode: impl Into<PincodeInput<'a>>) -> Result<Vec<PincodeRecord>> {
    default_engine()?.info(pincode)
}

pub fn state<'a>(pincode: impl Into<PincodeInput<'a>>) -> Result<String> {
    default_engine()?.state(pincode)
}

pub fn district<'a>(pincode: impl Into<PincodeInput<'a>>) -> Result<String> {
    default_engine()?.district(pincode)
}

pub fn taluk<'a>(pincode: impl Into<PincodeInput<'a>>) -> Result<String> {
    default_engine()?.taluk(pincode)
}

pub fn offices<'a>(pincode: impl Into<PincodeInput<'a>>) -> Result<Vec<String>> {
    default_engine()?.offices(pincode)
}

pub fn search_by_state(state_name: &str) -> Result<Vec<String>> {
    Ok(default_engine()?.search_by_state(state_name))
}

pub fn search_by_district(district_name: &str, state_name: Option<&str>) -> Result<Vec<String>> {
    Ok(default_engine()?.search_by_district(district_name, state_name))
}

pub fn search_by_office(fragment: &str) -> Result<Vec<PincodeRecord>> {
    Ok(default_engine()?.search_by_office(fragment))
}

/// Every state in the default dataset.
pub fn states() -> Result<Vec<String>> {
    Ok(default_engine()?.all_states())
}

/// Every district in the default dataset, optionally within one state.
pub fn districts(state_name: Option<&str>) -> Result<Vec<String>> {
    Ok(default_engine()?.all_districts(state_name))
}

pub fn statistics() -> Result<Statistics> {
    Ok(default_engine()?.statistics())
}
