// Library-level tests against CSV files on disk and the bundled dataset.
use std::io::Write;
use std::sync::Arc;
use std::thread;

use pinin::global::BUNDLED_DATA_FILE;
use pinin::{LoadError, PincodeData, PininError};

const HEADER: &str = "pincode,officename,statename,districtname,taluk,officetype,Deliverystatus";

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write csv");
    file.flush().expect("flush");
    file
}

fn bundled() -> PincodeData {
    PincodeData::from_path(BUNDLED_DATA_FILE).expect("bundled dataset loads")
}

#[test]
fn two_offices_share_a_pincode() {
    let file = write_csv(&format!(
        "{HEADER}\n\
         110001,Connaught Place S.O,DELHI,Central Delhi,New Delhi,S.O,Delivery\n\
         110001,Parliament Street S.O,DELHI,Central Delhi,New Delhi,S.O,Non-Delivery\n"
    ));
    let data = PincodeData::from_path(file.path()).expect("load");
    assert_eq!(data.data_file(), Some(file.path()));

    let info = data.info("110001").expect("info");
    assert_eq!(info.len(), 2);
    assert_eq!(info[0].office_name(), "Connaught Place S.O");
    assert_eq!(info[1].delivery_status(), "Non-Delivery");

    assert_eq!(data.state("110001").unwrap(), "DELHI");
    assert_eq!(
        data.offices("110001").unwrap(),
        ["Connaught Place S.O", "Parliament Street S.O"]
    );
}

#[test]
fn missing_taluk_column_fails_the_load() {
    let file = write_csv(
        "pincode,officename,statename,districtname,officetype,Deliverystatus\n\
         110001,Connaught Place S.O,DELHI,Central Delhi,S.O,Delivery\n",
    );
    let err = PincodeData::from_path(file.path()).unwrap_err();
    match err.load_error() {
        Some(LoadError::MissingColumns(cols)) => assert_eq!(cols, &["taluk"]),
        other => panic!("expected missing columns, got {other:?}"),
    }
    assert!(err.to_string().contains("taluk"));
}

#[test]
fn missing_file_fails_the_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = PincodeData::from_path(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(
        err,
        PininError::DataLoad {
            source: LoadError::FileNotFound,
            ..
        }
    ));

    // A directory is not a readable file either.
    let err = PincodeData::from_path(dir.path()).unwrap_err();
    assert!(matches!(err.load_error(), Some(LoadError::FileNotFound)));
}

#[test]
fn empty_file_fails_but_header_only_is_empty_table() {
    let empty = write_csv("");
    let err = PincodeData::from_path(empty.path()).unwrap_err();
    assert!(matches!(err.load_error(), Some(LoadError::Empty)));

    let header_only = write_csv(&format!("{HEADER}\n"));
    let data = PincodeData::from_path(header_only.path()).expect("load");
    assert!(data.is_empty());
    let stats = data.statistics();
    assert_eq!(stats.total_records, 0);
    assert_eq!(stats.unique_pincodes, 0);
    assert_eq!(stats.unique_states, 0);
    assert_eq!(stats.unique_districts, 0);
    assert_eq!(stats.unique_offices, 0);
    assert!(data.all_states().is_empty());
    assert!(matches!(data.info("110001"), Err(PininError::NotFound { .. })));
}

#[test]
fn bundled_lookups() {
    let data = bundled();
    assert_eq!(data.state("110001").unwrap(), "DELHI");
    assert_eq!(data.district(560004).unwrap(), "Bangalore");
    assert_eq!(data.taluk("600004").unwrap(), "Mylapore");
    assert_eq!(data.info("400001").unwrap().len(), 2);
    assert!(matches!(data.info("999999"), Err(PininError::NotFound { .. })));
    assert!(matches!(data.info(5), Err(PininError::InvalidFormat { pincode }) if pincode == "5"));
}

#[test]
fn extra_columns_pass_through() {
    let data = bundled();
    let rec = &data.info("110001").unwrap()[0];
    assert_eq!(rec.column("circlename"), Some("Delhi"));
    assert_eq!(rec.column("divisionname"), Some("New Delhi Central"));
}

#[test]
fn every_info_row_carries_the_code() {
    let data = bundled();
    for code in data.search_by_state("delhi") {
        let rows = data.info(code.as_str()).unwrap();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.pincode() == code));
        let offices: Vec<String> = rows.iter().map(|r| r.office_name().to_string()).collect();
        assert_eq!(data.offices(code.as_str()).unwrap(), offices);
    }
}

#[test]
fn bundled_searches() {
    let data = bundled();
    let goa = data.search_by_state("Goa");
    assert_eq!(goa, ["403001"]);
    assert_eq!(data.search_by_state("GOA"), goa);
    assert!(data.search_by_state("LADAKH").is_empty());

    let all = data.search_by_district("aurangabad", None);
    assert_eq!(all, ["431001", "824202"]);
    let bihar = data.search_by_district("aurangabad", Some("Bihar"));
    assert_eq!(bihar, ["824202"]);
    assert!(bihar.iter().all(|p| all.contains(p)));

    let gpos = data.search_by_office("g.p.o");
    assert!(gpos.len() >= 5);
    assert!(gpos.iter().all(|r| r.office_name().contains("G.P.O.")));
}

#[test]
fn bundled_listings_and_stats() {
    let data = bundled();

    let states = data.all_states();
    assert_eq!(states.len(), 11);
    assert!(states.windows(2).all(|w| w[0] < w[1]));

    let districts = data.all_districts(None);
    assert!(districts.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(
        data.all_districts(Some("maharashtra")),
        ["Aurangabad", "Mumbai", "Pune"]
    );

    let stats = data.statistics();
    assert_eq!(stats.total_records, 30);
    assert_eq!(stats.unique_pincodes, 26);
    assert_eq!(stats.unique_states, 11);
    assert_eq!(stats.unique_districts, 17);
    assert_eq!(stats.unique_offices, 30);
}

#[test]
fn engine_is_shared_across_threads() {
    let data = Arc::new(bundled());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let data = Arc::clone(&data);
            thread::spawn(move || data.state("400001").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "MAHARASHTRA");
    }
}

#[test]
fn default_engine_loads_once() {
    if std::env::var_os(pinin::global::DATA_FILE_ENV).is_some() {
        return;
    }
    let engines: Vec<Arc<PincodeData>> = (0..8)
        .map(|_| thread::spawn(pinin::default_engine))
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap().expect("default engine"))
        .collect();
    assert!(engines.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));

    assert_eq!(pinin::state("110001").unwrap(), "DELHI");
    assert_eq!(pinin::districts(Some("karnataka")).unwrap(), ["Bangalore", "Mysore"]);
    assert!(pinin::search_by_state("goa").unwrap().contains(&"403001".to_string()));
    assert!(matches!(pinin::taluk("11000"), Err(PininError::InvalidFormat { .. })));
}
