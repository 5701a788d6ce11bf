use std::collections::BTreeSet;

use super::model::{Field, PincodeRecord, PincodeTable};

// ---------------------------------------------------------------------------
// Predicates over a single column
// ---------------------------------------------------------------------------

/// How a column value is compared against a needle. Both variants ignore case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    /// Whole-string equality.
    Exact(String),
    /// Substring containment.
    Contains(String),
}

/// A column constraint. The needle is upper-cased once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    field: Field,
    matcher: Match,
}

impl Predicate {
    pub fn exact(field: Field, needle: &str) -> Self {
        Predicate {
            field,
            matcher: Match::Exact(needle.to_uppercase()),
        }
    }

    pub fn contains(field: Field, needle: &str) -> Self {
        Predicate {
            field,
            matcher: Match::Contains(needle.to_uppercase()),
        }
    }

    pub fn matches(&self, record: &PincodeRecord) -> bool {
        let value = record.get(self.field).to_uppercase();
        match &self.matcher {
            Match::Exact(needle) => value == *needle,
            Match::Contains(needle) => value.contains(needle.as_str()),
        }
    }
}

/// Conjunction of predicates. An empty filter passes every row.
pub type FilterState = Vec<Predicate>;

/// Records passing every predicate, in table order.
pub fn filtered<'t, 'f>(
    table: &'t PincodeTable,
    filters: &'f [Predicate],
) -> impl Iterator<Item = &'t PincodeRecord> + 'f
where
    't: 'f,
{
    table
        .records()
        .iter()
        .filter(move |rec| filters.iter().all(|p| p.matches(rec)))
}

/// Sorted, de-duplicated values of `field` over the given records.
pub fn unique_values<'t>(
    records: impl Iterator<Item = &'t PincodeRecord>,
    field: Field,
) -> Vec<String> {
    records
        .map(|rec| rec.get(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
