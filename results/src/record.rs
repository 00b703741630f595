use crate::error::{Result, ResultsError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::Display;
use tracing::{debug, info};

/// Default file name the report tool reads from the working directory
pub const DEFAULT_RESULTS_FILE: &str = "benchmarks.json";

/// A complete Google Benchmark JSON dump
///
/// Only the fields the report needs are modelled; anything else in the
/// document is ignored during deserialization.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BenchmarkReport {
    /// Machine and build information recorded by the benchmark runner
    #[serde(default)]
    pub context: Option<BenchmarkContext>,

    /// One entry per timed benchmark run
    pub benchmarks: Vec<BenchmarkRecord>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BenchmarkContext {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    pub executable: Option<String>,
    #[serde(default)]
    pub num_cpus: Option<u32>,
    #[serde(default)]
    pub mhz_per_cpu: Option<u32>,
    #[serde(default)]
    pub library_build_type: Option<String>,
}

/// One timed measurement entry from the results file
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BenchmarkRecord {
    pub name: String,
    pub cpu_time: CpuTime,
    #[serde(default)]
    pub real_time: Option<CpuTime>,
    #[serde(default)]
    pub time_unit: Option<String>,
    #[serde(default)]
    pub iterations: Option<u64>,
    #[serde(default)]
    pub run_type: Option<RunType>,
}

/// A timing value that may be written as a JSON number or as a numeric string
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CpuTime {
    Number(f64),
    Text(String),
}

impl CpuTime {
    /// Interpret the value as seconds/nanoseconds/etc. in the record's own unit
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CpuTime::Number(value) => Some(*value),
            CpuTime::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RunType {
    Iteration,
    Aggregate,
}

impl BenchmarkRecord {
    /// The record's cpu_time as a float, or `InvalidTime` if it is a non-numeric string
    pub fn cpu_time(&self) -> Result<f64> {
        self.cpu_time
            .as_f64()
            .ok_or_else(|| ResultsError::InvalidTime {
                name: self.name.clone(),
                value: match &self.cpu_time {
                    CpuTime::Text(text) => text.clone(),
                    CpuTime::Number(value) => value.to_string(),
                },
            })
    }

    /// Aggregate rows (`_mean`, `_median`, `_stddev`) summarize repetitions
    pub fn is_aggregate(&self) -> bool {
        self.run_type == Some(RunType::Aggregate)
    }
}

impl BenchmarkReport {
    /// Parse a results document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let report: BenchmarkReport = serde_json::from_str(json)?;
        debug!("Parsed {} benchmark records", report.benchmarks.len());
        Ok(report)
    }

    /// Read and parse a results file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let report: BenchmarkReport = serde_json::from_slice(&bytes)?;

        info!(
            "Loaded {} benchmark records from {}",
            report.benchmarks.len(),
            path.display()
        );
        if let Some(context) = &report.context {
            info!(
                "Recorded on {} ({} CPUs) at {}",
                context.host_name.as_deref().unwrap_or("unknown host"),
                context.num_cpus.unwrap_or(0),
                context.date.as_deref().unwrap_or("unknown date"),
            );
        }

        Ok(report)
    }

    /// Records whose name starts with `prefix`, in document order
    pub fn with_prefix<'a, 'p>(
        &'a self,
        prefix: &'p str,
    ) -> impl Iterator<Item = &'a BenchmarkRecord> + use<'a, 'p> {
        self.benchmarks
            .iter()
            .filter(move |record| record.name.starts_with(prefix))
    }

    /// The time unit shared by the records with `prefix`, if they agree on one
    pub fn time_unit(&self, prefix: &str) -> Option<&str> {
        let mut units = self
            .with_prefix(prefix)
            .filter_map(|record| record.time_unit.as_deref());
        let first = units.next()?;
        units.all(|unit| unit == first).then_some(first)
    }
}
