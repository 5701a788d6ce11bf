use std::path::{Path, PathBuf};

use log::debug;

use crate::data::filter::{filtered, unique_values, FilterState, Predicate};
use crate::data::loader;
use crate::data::model::{Field, PincodeRecord, PincodeTable, Statistics};
use crate::error::{PininError, Result};
use crate::global::default_data_file;
use crate::pincode::{Pincode, PincodeInput};

// ---------------------------------------------------------------------------
// Query engine
// ---------------------------------------------------------------------------

/// An immutable, loaded pincode table plus the queries over it.
///
/// Construction fails fast: if the data file cannot be loaded there is no
/// engine. Once built it is never mutated and can be shared across threads.
#[derive(Debug, Clone)]
pub struct PincodeData {
    /// Where the table came from (`None` for in-memory tables).
    data_file: Option<PathBuf>,
    table: PincodeTable,
}

impl PincodeData {
    /// Load the default data file (see [`default_data_file`]).
    pub fn new() -> Result<Self> {
        Self::from_path(default_data_file())
    }

    /// Load a specific CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = loader::load_file(path)?;
        Ok(PincodeData {
            data_file: Some(path.to_path_buf()),
            table,
        })
    }

    /// Wrap an already-built table.
    pub fn from_table(table: PincodeTable) -> Self {
        PincodeData {
            data_file: None,
            table,
        }
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    pub fn table(&self) -> &PincodeTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    // -- Point lookups --

    /// Every row for `pincode`, in table order.
    pub fn info<'a>(&self, pincode: impl Into<PincodeInput<'a>>) -> Result<Vec<PincodeRecord>> {
        self.matching(pincode)
            .map(|rows| rows.into_iter().cloned().collect())
    }

    /// State of the first row for `pincode`.
    pub fn state<'a>(&self, pincode: impl Into<PincodeInput<'a>>) -> Result<String> {
        self.first_field(pincode, Field::StateName)
    }

    /// District of the first row for `pincode`.
    pub fn district<'a>(&self, pincode: impl Into<PincodeInput<'a>>) -> Result<String> {
        self.first_field(pincode, Field::DistrictName)
    }

    /// Taluk of the first row for `pincode`.
    pub fn taluk<'a>(&self, pincode: impl Into<PincodeInput<'a>>) -> Result<String> {
        self.first_field(pincode, Field::Taluk)
    }

    /// Office names of every row for `pincode`, duplicates kept.
    pub fn offices<'a>(&self, pincode: impl Into<PincodeInput<'a>>) -> Result<Vec<String>> {
        let rows = self.matching(pincode)?;
        Ok(rows
            .into_iter()
            .map(|r| r.office_name().to_string())
            .collect())
    }

    // -- Searches (never NotFound) --

    /// Sorted, distinct pincodes whose state equals `state_name` (any case).
    pub fn search_by_state(&self, state_name: &str) -> Vec<String> {
        self.unique_where(&[Predicate::exact(Field::StateName, state_name)], Field::Pincode)
    }

    /// Sorted, distinct pincodes in `district_name`, optionally within `state_name`.
    pub fn search_by_district(&self, district_name: &str, state_name: Option<&str>) -> Vec<String> {
        let mut filters: FilterState = vec![Predicate::exact(Field::DistrictName, district_name)];
        if let Some(state) = state_name.filter(|s| !s.is_empty()) {
            filters.push(Predicate::exact(Field::StateName, state));
        }
        self.unique_where(&filters, Field::Pincode)
    }

    /// Rows whose office name contains `fragment` (any case).
    pub fn search_by_office(&self, fragment: &str) -> Vec<PincodeRecord> {
        let filters = [Predicate::contains(Field::OfficeName, fragment)];
        let hits: Vec<PincodeRecord> = filtered(&self.table, &filters).cloned().collect();
        debug!("office search {fragment:?}: {} rows", hits.len());
        hits
    }

    // -- Listings --

    /// Every state name, sorted and distinct.
    pub fn all_states(&self) -> Vec<String> {
        self.unique_where(&[], Field::StateName)
    }

    /// Every district name, sorted and distinct, optionally within one state.
    pub fn all_districts(&self, state_name: Option<&str>) -> Vec<String> {
        match state_name.filter(|s| !s.is_empty()) {
            Some(state) => {
                self.unique_where(&[Predicate::exact(Field::StateName, state)], Field::DistrictName)
            }
            None => self.unique_where(&[], Field::DistrictName),
        }
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::of(&self.table)
    }

    // -- helpers --

    fn matching<'a>(&self, pincode: impl Into<PincodeInput<'a>>) -> Result<Vec<&PincodeRecord>> {
        let pincode = Pincode::parse(pincode)?;
        let filters = [Predicate::exact(Field::Pincode, pincode.as_str())];
        let rows: Vec<&PincodeRecord> = filtered(&self.table, &filters).collect();
        debug!("pincode {pincode}: {} rows", rows.len());

        if rows.is_empty() {
            return Err(PininError::NotFound {
                pincode: pincode.as_str().to_string(),
            });
        }
        Ok(rows)
    }

    fn first_field<'a>(&self, pincode: impl Into<PincodeInput<'a>>, field: Field) -> Result<String> {
        let rows = self.matching(pincode)?;
        // `matching` never returns an empty set.
        Ok(rows[0].get(field).to_string())
    }

    fn unique_where(&self, filters: &[Predicate], field: Field) -> Vec<String> {
        let values = unique_values(filtered(&self.table, filters), field);
        debug!("{} distinct {field} values for {} filters", values.len(), filters.len());
        values
    }
}
