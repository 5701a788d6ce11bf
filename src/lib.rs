//! Indian pincode lookup.
//!
//! Loads a CSV of post offices (pincode, office, state, district, taluk,
//! office type, delivery status) once and answers point lookups and simple
//! searches against it.
//!
//! ```no_run
//! use pinin::PincodeData;
//!
//! let data = PincodeData::new()?;
//! assert_eq!(data.state("110001")?, "DELHI");
//! # Ok::<(), pinin::PininError>(())
//! ```

pub mod data;
pub mod engine;
pub mod error;
pub mod global;
pub mod output;
pub mod pincode;

pub use data::model::{Field, PincodeRecord, PincodeTable, Schema, Statistics};
pub use engine::PincodeData;
pub use error::{LoadError, PininError, Result};
pub use global::{
    default_data_file, default_engine, district, districts, offices, pincode_info, search_by_district,
    search_by_office, search_by_state, state, states, statistics, taluk,
};
pub use pincode::{Pincode, PincodeInput};
