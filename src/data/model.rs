use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Field – the columns every dataset must carry
// ---------------------------------------------------------------------------

/// A required column of the pincode dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Pincode,
    OfficeName,
    StateName,
    DistrictName,
    Taluk,
    OfficeType,
    DeliveryStatus,
}

impl Field {
    /// All required columns, in the order they are reported when missing.
    pub const ALL: [Field; 7] = [
        Field::Pincode,
        Field::OfficeName,
        Field::StateName,
        Field::DistrictName,
        Field::Taluk,
        Field::OfficeType,
        Field::DeliveryStatus,
    ];

    /// Header name as it appears in the source CSV.
    pub fn column(self) -> &'static str {
        match self {
            Field::Pincode => "pincode",
            Field::OfficeName => "officename",
            Field::StateName => "statename",
            Field::DistrictName => "districtname",
            Field::Taluk => "taluk",
            Field::OfficeType => "officetype",
            Field::DeliveryStatus => "Deliverystatus",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Schema – header row plus positions of the required columns
// ---------------------------------------------------------------------------

/// Column layout shared by every record of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    names: Vec<String>,
    /// `positions[field.slot()]` is that field's index into `names`.
    positions: [usize; 7],
}

impl Schema {
    /// Build a schema from a header row, rejecting it if any required column is absent.
    pub fn from_headers(names: Vec<String>) -> Result<Self, LoadError> {
        let mut positions = [0usize; 7];
        let mut missing = Vec::new();

        for field in Field::ALL {
            match names.iter().position(|n| n == field.column()) {
                Some(idx) => positions[field.slot()] = idx,
                None => missing.push(field.column().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }
        Ok(Schema { names, positions })
    }

    /// All column names in source order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn position(&self, field: Field) -> usize {
        self.positions[field.slot()]
    }
}

// ---------------------------------------------------------------------------
// PincodeRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// One post office row. Immutable once built.
///
/// Values are kept in source column order so extra columns pass through
/// untouched; the required fields are reached through typed accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PincodeRecord {
    schema: Arc<Schema>,
    values: Vec<String>,
}

impl PincodeRecord {
    pub fn get(&self, field: Field) -> &str {
        &self.values[self.schema.position(field)]
    }

    /// Look up any column by header name, including extra columns.
    pub fn column(&self, name: &str) -> Option<&str> {
        self.schema
            .names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values[idx].as_str())
    }

    pub fn pincode(&self) -> &str {
        self.get(Field::Pincode)
    }

    pub fn office_name(&self) -> &str {
        self.get(Field::OfficeName)
    }

    pub fn office_type(&self) -> &str {
        self.get(Field::OfficeType)
    }

    pub fn delivery_status(&self) -> &str {
        self.get(Field::DeliveryStatus)
    }

    pub fn state_name(&self) -> &str {
        self.get(Field::StateName)
    }

    pub fn district_name(&self) -> &str {
        self.get(Field::DistrictName)
    }

    pub fn taluk(&self) -> &str {
        self.get(Field::Taluk)
    }

    /// `(column, value)` pairs in source column order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.schema
            .names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Serialize for PincodeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.pairs() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// PincodeTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All rows of a dataset, in source order.
#[derive(Debug, Clone)]
pub struct PincodeTable {
    schema: Arc<Schema>,
    records: Vec<PincodeRecord>,
}

impl PincodeTable {
    /// Assemble a table from raw rows. The pincode column is normalised to
    /// fixed-width text; every row must match the header width.
    pub fn from_rows(schema: Schema, rows: Vec<Vec<String>>) -> Result<Self, LoadError> {
        let schema = Arc::new(schema);
        let width = schema.len();
        let pin_idx = schema.position(Field::Pincode);

        let mut records = Vec::with_capacity(rows.len());
        for (row_no, mut values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(LoadError::RowLength {
                    row: row_no,
                    expected: width,
                    found: values.len(),
                });
            }
            values[pin_idx] = normalize_pincode(&values[pin_idx]);
            records.push(PincodeRecord {
                schema: Arc::clone(&schema),
                values,
            });
        }

        Ok(PincodeTable { schema, records })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[PincodeRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Pincodes are text: trim, and undo a float rendering such as `110001.0`.
fn normalize_pincode(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.split_once('.') {
        Some((int, frac))
            if !int.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && !frac.is_empty()
                && frac.bytes().all(|b| b == b'0') =>
        {
            int.to_string()
        }
        _ => trimmed.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Row and distinct-value counts over a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Statistics {
    pub total_records: usize,
    pub unique_pincodes: usize,
    pub unique_states: usize,
    pub unique_districts: usize,
    pub unique_offices: usize,
}

impl Statistics {
    pub fn of(table: &PincodeTable) -> Self {
        let distinct = |field: Field| {
            table
                .records
                .iter()
                .map(|r| r.get(field))
                .collect::<BTreeSet<_>>()
                .len()
        };
        Statistics {
            total_records: table.len(),
            unique_pincodes: distinct(Field::Pincode),
            unique_states: distinct(Field::StateName),
            unique_districts: distinct(Field::DistrictName),
            unique_offices: distinct(Field::OfficeName),
        }
    }

    /// `(key, count)` pairs in display order.
    pub fn pairs(&self) -> [(&'static str, usize); 5] {
        [
            ("total_records", self.total_records),
            ("unique_pincodes", self.unique_pincodes),
            ("unique_states", self.unique_states),
            ("unique_districts", self.unique_districts),
            ("unique_offices", self.unique_offices),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    const FULL: &[&str] = &[
        "officename",
        "pincode",
        "officetype",
        "Deliverystatus",
        "circlename",
        "taluk",
        "districtname",
        "statename",
    ];

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn schema_reports_every_missing_column() {
        let err = Schema::from_headers(headers(&["pincode", "officename", "statename"])).unwrap_err();
        match err {
            LoadError::MissingColumns(cols) => {
                assert_eq!(cols, ["districtname", "taluk", "officetype", "Deliverystatus"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let mut names = headers(FULL);
        names[3] = "deliverystatus".into();
        assert!(matches!(
            Schema::from_headers(names),
            Err(LoadError::MissingColumns(cols)) if cols == ["Deliverystatus"]
        ));
    }

    #[test]
    fn record_accessors_follow_the_header() {
        let schema = Schema::from_headers(headers(FULL)).unwrap();
        let table = PincodeTable::from_rows(
            schema,
            vec![row(&[
                "Connaught Place S.O",
                " 110001 ",
                "S.O",
                "Delivery",
                "Delhi Circle",
                "New Delhi",
                "Central Delhi",
                "DELHI",
            ])],
        )
        .unwrap();

        let rec = &table.records()[0];
        assert_eq!(rec.pincode(), "110001");
        assert_eq!(rec.office_name(), "Connaught Place S.O");
        assert_eq!(rec.office_type(), "S.O");
        assert_eq!(rec.delivery_status(), "Delivery");
        assert_eq!(rec.taluk(), "New Delhi");
        assert_eq!(rec.district_name(), "Central Delhi");
        assert_eq!(rec.state_name(), "DELHI");
        assert_eq!(rec.column("circlename"), Some("Delhi Circle"));
        assert_eq!(rec.column("regionname"), None);

        let keys: Vec<&str> = rec.pairs().map(|(k, _)| k).collect();
        assert_eq!(keys, FULL);
    }

    #[test]
    fn record_serializes_in_column_order() {
        let schema = Schema::from_headers(headers(FULL)).unwrap();
        let table = PincodeTable::from_rows(
            schema,
            vec![row(&["A B.O", "500001", "B.O", "Delivery", "AP", "T", "D", "S"])],
        )
        .unwrap();
        let json = serde_json::to_string(&table.records()[0]).unwrap();
        assert!(json.starts_with(r#"{"officename":"A B.O","pincode":"500001","#));
        assert!(json.ends_with(r#""statename":"S"}"#));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let schema = Schema::from_headers(headers(FULL)).unwrap();
        let err = PincodeTable::from_rows(schema, vec![row(&["only", "two"])]).unwrap_err();
        assert!(matches!(err, LoadError::RowLength { row: 0, expected: 8, found: 2 }));
    }

    #[test]
    fn float_rendered_pincodes_are_restored() {
        assert_eq!(normalize_pincode("110001.0"), "110001");
        assert_eq!(normalize_pincode("110001.00"), "110001");
        assert_eq!(normalize_pincode("110001.5"), "110001.5");
        assert_eq!(normalize_pincode("011001"), "011001");
        assert_eq!(normalize_pincode(".0"), ".0");
    }

    #[test]
    fn statistics_of_empty_table_are_zero() {
        let schema = Schema::from_headers(headers(FULL)).unwrap();
        let table = PincodeTable::from_rows(schema, Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(Statistics::of(&table), Statistics::default());
    }
}
