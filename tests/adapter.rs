mod common;

use common::wafers::stdf_stream;
use die_cluster::adapter::{parse_file, result_file_name, write_result};
use die_cluster::classify::classify;
use die_cluster::config::thresholds::parse_thresholds;
use std::fs;
use std::path::PathBuf;

/// Fresh scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("die_cluster_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn text_file_round_trips_through_the_adapter() {
    let dir = scratch_dir("text");
    let input_path = dir.join("wafer3.txt");
    let content = "lot header\n...\nX1X\n111\ntrailer\n";
    fs::write(&input_path, content).unwrap();

    let (grid, template) = parse_file(&input_path).unwrap();
    assert_eq!(grid.to_string(), "...\nX1X\n111");

    // identity table: nothing flips, the file must reproduce exactly
    let table = parse_thresholds(r#"{"0":9,"1":9,"2":9,"3":9,"4":9,"5":9,"6":9,"7":9,"8":9}"#)
        .unwrap();
    let classified = classify(&grid, &table).unwrap();
    let output = template.render(&classified.to_string());
    assert_eq!(output, content);

    let written = write_result(&dir, &input_path, &output).unwrap();
    assert_eq!(written.file_name().unwrap(), "result_of_wafer3.txt");
    assert_eq!(fs::read_to_string(written).unwrap(), content);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn stdf_file_parses_to_passthrough_template() {
    let dir = scratch_dir("stdf");
    let input_path = dir.join("lot7.stdf");
    let parts = [(0, 0, false), (1, 0, true), (0, 1, true), (1, 1, false)];
    fs::write(&input_path, stdf_stream(&parts)).unwrap();

    let (grid, template) = parse_file(&input_path).unwrap();
    assert_eq!(grid.to_string(), "1X\nX1");
    assert_eq!(template.render(&grid.to_string()), "1X\nX1");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unsupported_suffix_is_refused() {
    let dir = scratch_dir("suffix");
    let input_path = dir.join("wafer.csv");
    fs::write(&input_path, "1,X\n").unwrap();
    let err = parse_file(&input_path).unwrap_err();
    assert!(err.contains("only .txt and .stdf"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn result_naming_is_stable() {
    assert_eq!(
        result_file_name(&PathBuf::from("/tmp/in/lot7_wafer3.stdf")),
        "result_of_lot7_wafer3.txt"
    );
}
