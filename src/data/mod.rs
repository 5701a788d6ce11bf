//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  All_India_pincode_data.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  decode (utf-8 → cp1252) + parse CSV → PincodeTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ PincodeTable  │  Arc<Schema>, Vec<PincodeRecord>
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  case-insensitive column predicates → matching records
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod filter;
