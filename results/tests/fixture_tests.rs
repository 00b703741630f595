//! End-to-end checks against benchmark JSON files on disk
//!
//! These mirror the way the report tool is used: write a results file, open
//! it, select one map's benchmarks by prefix and reshape them.

use approx::assert_relative_eq;
use hashbench_results::filter::{filter_value_size_3d, filter_value_size_insertions};
use hashbench_results::{
    BenchmarkReport, LIBRARY_PREFIX, MalformedPolicy, REFERENCE_PREFIX, ResultsError, Sample,
    compare_by_key_size, samples_with_prefix,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_fixture(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(json.as_bytes()).expect("write fixture");
    file
}

/// Google Benchmark output for both maps over key sizes 4..64, value size 256,
/// insertions 1 and 256
fn grid_fixture() -> String {
    let mut entries = Vec::new();
    for (prefix, scale) in [(LIBRARY_PREFIX, 1.0), (REFERENCE_PREFIX, 2.0)] {
        for k in [2u32, 4, 6] {
            for insertions in [1u64, 256] {
                let time = scale * (1u64 << k) as f64 * insertions as f64;
                entries.push(format!(
                    r#"{{"name": "{prefix}<char[1<<{k}], char[1<<8]>/{insertions}", "run_type": "iteration", "iterations": 100, "real_time": {time}, "cpu_time": "{time}", "time_unit": "ns"}}"#
                ));
            }
        }
    }
    format!(
        r#"{{"context": {{"date": "2019-05-01", "host_name": "bench", "num_cpus": 4}}, "benchmarks": [{}]}}"#,
        entries.join(",")
    )
}

#[test]
fn test_single_record_fixture() {
    let file = write_fixture(
        r#"{"benchmarks": [{"name": "BM_HashmapInsert<char[1<<2], char[1<<8]>/4", "cpu_time": "123.0"}]}"#,
    );
    let report = BenchmarkReport::open(file.path()).unwrap();
    let samples = samples_with_prefix(&report, LIBRARY_PREFIX, MalformedPolicy::Fail).unwrap();
    assert_eq!(
        samples,
        vec![Sample {
            key_size: 4,
            value_size: 256,
            insertions: 4,
            time: 123.0,
        }]
    );
}

#[test]
fn test_empty_benchmarks_array_is_a_clear_error() {
    let file = write_fixture(r#"{"benchmarks": []}"#);
    let report = BenchmarkReport::open(file.path()).unwrap();
    assert!(report.benchmarks.is_empty());

    let err = samples_with_prefix(&report, LIBRARY_PREFIX, MalformedPolicy::Fail).unwrap_err();
    assert!(matches!(err, ResultsError::NoMatchingBenchmarks { .. }));
    assert!(err.to_string().contains(LIBRARY_PREFIX));

    let err = filter_value_size_insertions(&[], 256, 1).unwrap_err();
    assert!(matches!(err, ResultsError::NoData { .. }));
}

#[test]
fn test_grid_fixture_reshapes_for_both_maps() {
    let file = write_fixture(&grid_fixture());
    let report = BenchmarkReport::open(file.path()).unwrap();
    assert_eq!(report.time_unit(LIBRARY_PREFIX), Some("ns"));

    let library = samples_with_prefix(&report, LIBRARY_PREFIX, MalformedPolicy::Fail).unwrap();
    let reference = samples_with_prefix(&report, REFERENCE_PREFIX, MalformedPolicy::Fail).unwrap();
    assert_eq!(library.len(), 6);
    assert_eq!(reference.len(), 6);

    let line = filter_value_size_insertions(&library, 256, 256).unwrap();
    assert_eq!(line.x.to_vec(), vec![4.0, 16.0, 64.0]);
    assert_eq!(line.y.to_vec(), vec![1024.0, 4096.0, 16384.0]);

    let surface = filter_value_size_3d(&reference, 256).unwrap();
    assert_eq!(surface.len(), 6);
    for (x, y, z) in surface.points() {
        // time = 2 * key * insertions, so log10(time) = log10(2) + x + y
        assert_relative_eq!(z, 2f64.log10() + x + y, epsilon = 1e-12);
    }

    let rows = compare_by_key_size(&library, &reference, 256, 1).unwrap();
    assert_eq!(rows.iter().map(|r| r.key_size).collect::<Vec<_>>(), vec![4, 16, 64]);
    for row in rows {
        assert_relative_eq!(row.speedup, 2.0);
    }
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = BenchmarkReport::open(dir.path().join("benchmarks.json")).unwrap_err();
    assert!(matches!(err, ResultsError::Io { .. }));
}
