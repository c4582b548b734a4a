// tests/pull_to_csv.rs
//
// End-to-end checks for the normalize-then-dump path, no network.

use std::fs;

use serde_json::json;

use cfbpull::sink::{self, Destination};
use cfbpull::table::Table;

fn games() -> Table {
    Table::from_json(&json!([
        {
            "id": 1,
            "team": "Alabama",
            "venue": {"city": "Tuscaloosa", "capacity": 100077}
        },
        {
            "id": 2,
            "team": "Georgia",
            "attendance": null
        }
    ]))
    .unwrap()
}

#[test]
fn json_to_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.csv");
    sink::write(&games(), &Destination::Csv { path: path.clone() }).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(
        headers,
        ["ID", "TEAM", "VENUE.CITY", "VENUE.CAPACITY", "ATTENDANCE"]
    );

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    assert_eq!(rows[0], ["1", "Alabama", "Tuscaloosa", "100077", ""]);
    assert_eq!(rows[1], ["2", "Georgia", "", "", ""]);
}

#[test]
fn rerunning_the_dump_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.csv");

    sink::write(&games(), &Destination::Csv { path: path.clone() }).unwrap();
    let first = fs::read(&path).unwrap();
    sink::write(&games(), &Destination::Csv { path: path.clone() }).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn empty_result_still_writes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let table = Table::from_json(&json!([])).unwrap();

    sink::write(&table, &Destination::Csv { path: path.clone() }).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"");
}
