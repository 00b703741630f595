use crate::error::{Result, ResultsError};
use crate::name::parse_bench_name;
use crate::record::{BenchmarkRecord, BenchmarkReport};
use serde::Serialize;
use tracing::{debug, warn};

/// Name prefix of the custom hashmap insertion benchmarks
pub const LIBRARY_PREFIX: &str = "BM_HashmapInsert";
/// Name prefix of the `std::unordered_map` insertion benchmarks
pub const REFERENCE_PREFIX: &str = "BM_StdUnorderedMap";

/// One parsed measurement: (key size, value size, insertions, time)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub key_size: u64,
    pub value_size: u64,
    pub insertions: u64,
    pub time: f64,
}

/// What to do with a prefixed record whose name cannot be parsed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort on the first malformed name
    #[default]
    Fail,
    /// Log a warning and drop the record
    Skip,
}

impl Sample {
    pub fn from_record(record: &BenchmarkRecord) -> Result<Self> {
        let dims = parse_bench_name(&record.name)?;
        Ok(Self {
            key_size: dims.key_size,
            value_size: dims.value_size,
            insertions: dims.insertions,
            time: record.cpu_time()?,
        })
    }
}

/// Parse every record starting with `prefix` into a sample, in document order
///
/// Aggregate rows are never samples and are always dropped. A document with no
/// record under `prefix` is reported as [`ResultsError::NoMatchingBenchmarks`].
pub fn samples_with_prefix(
    report: &BenchmarkReport,
    prefix: &str,
    policy: MalformedPolicy,
) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    let mut seen = 0usize;

    for record in report.with_prefix(prefix) {
        seen += 1;
        if record.is_aggregate() {
            debug!("Skipping aggregate row {}", record.name);
            continue;
        }

        match Sample::from_record(record) {
            Ok(sample) => samples.push(sample),
            Err(err @ ResultsError::MalformedName { .. }) if policy == MalformedPolicy::Skip => {
                warn!("Skipping record: {}", err);
            }
            Err(err) => return Err(err),
        }
    }

    if seen == 0 {
        return Err(ResultsError::NoMatchingBenchmarks {
            prefix: prefix.to_string(),
        });
    }

    debug!(
        "Parsed {} samples from {} records with prefix {}",
        samples.len(),
        seen,
        prefix
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(json: &str) -> BenchmarkReport {
        BenchmarkReport::from_json(json).unwrap()
    }

    #[test]
    fn test_prefix_selection_keeps_document_order() {
        let report = report(
            r#"{"benchmarks": [
                {"name": "BM_HashmapInsert<char[1<<3], char[1<<0]>/2", "cpu_time": 3},
                {"name": "BM_StdUnorderedMap<char[1<<3], char[1<<0]>/2", "cpu_time": 9},
                {"name": "BM_HashmapCreation/16/16", "cpu_time": 1},
                {"name": "BM_HashmapInsert<char[1<<1], char[1<<0]>/2", "cpu_time": "1.5"}
            ]}"#,
        );

        let library = samples_with_prefix(&report, LIBRARY_PREFIX, MalformedPolicy::Fail).unwrap();
        assert_eq!(
            library,
            vec![
                Sample {
                    key_size: 8,
                    value_size: 1,
                    insertions: 2,
                    time: 3.0
                },
                Sample {
                    key_size: 2,
                    value_size: 1,
                    insertions: 2,
                    time: 1.5
                },
            ]
        );

        let reference =
            samples_with_prefix(&report, REFERENCE_PREFIX, MalformedPolicy::Fail).unwrap();
        assert_eq!(reference.len(), 1);
        assert_eq!(reference[0].time, 9.0);
    }

    #[test]
    fn test_malformed_name_policy() {
        let report = report(
            r#"{"benchmarks": [
                {"name": "BM_HashmapInsert/1/1/1", "cpu_time": 3},
                {"name": "BM_HashmapInsert<char[1<<1], char[1<<0]>/2", "cpu_time": 1}
            ]}"#,
        );

        let err = samples_with_prefix(&report, LIBRARY_PREFIX, MalformedPolicy::Fail).unwrap_err();
        assert!(matches!(err, ResultsError::MalformedName { .. }));

        let skipped = samples_with_prefix(&report, LIBRARY_PREFIX, MalformedPolicy::Skip).unwrap();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].key_size, 2);
    }

    #[test]
    fn test_skip_policy_does_not_hide_bad_times() {
        let report = report(
            r#"{"benchmarks": [
                {"name": "BM_HashmapInsert<char[1<<1], char[1<<0]>/2", "cpu_time": "n/a"}
            ]}"#,
        );
        let err = samples_with_prefix(&report, LIBRARY_PREFIX, MalformedPolicy::Skip).unwrap_err();
        assert!(matches!(err, ResultsError::InvalidTime { .. }));
    }

    #[test]
    fn test_aggregates_are_dropped() {
        let report = report(
            r#"{"benchmarks": [
                {"name": "BM_HashmapInsert<char[1<<1], char[1<<0]>/2", "cpu_time": 1, "run_type": "iteration"},
                {"name": "BM_HashmapInsert<char[1<<1], char[1<<0]>/2_mean", "cpu_time": 1, "run_type": "aggregate"}
            ]}"#,
        );
        let samples = samples_with_prefix(&report, LIBRARY_PREFIX, MalformedPolicy::Fail).unwrap();
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn test_empty_document_reports_missing_prefix() {
        let report = report(r#"{"benchmarks": []}"#);
        let err = samples_with_prefix(&report, LIBRARY_PREFIX, MalformedPolicy::Fail).unwrap_err();
        assert!(
            matches!(err, ResultsError::NoMatchingBenchmarks { ref prefix } if prefix == LIBRARY_PREFIX)
        );
    }
}
