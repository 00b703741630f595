//! # hashbench-results
//!
//! Load Google Benchmark JSON dumps of hashmap insertion benchmarks and reshape
//! them into plot-ready series.
//!
//! Benchmark names carry their dimensions in the template arguments, e.g.
//! `BM_HashmapInsert<char[1<<2], char[1<<8]>/4` is a run with 4-byte keys,
//! 256-byte values and 4 insertions.
//!
//! ```rust,no_run
//! use hashbench_results::{BenchmarkReport, MalformedPolicy, samples_with_prefix};
//! use hashbench_results::filter::filter_value_size_insertions;
//!
//! let report = BenchmarkReport::open("benchmarks.json")?;
//! let samples = samples_with_prefix(&report, "BM_HashmapInsert", MalformedPolicy::Fail)?;
//! let series = filter_value_size_insertions(&samples, 256, 1)?;
//! # Ok::<(), hashbench_results::ResultsError>(())
//! ```

pub mod error;
pub mod filter;
pub mod name;
pub mod record;
pub mod sample;
pub mod summary;

pub use error::{Result, ResultsError};
pub use filter::{Series2, Series3};
pub use name::{BenchName, parse_bench_name};
pub use record::{BenchmarkContext, BenchmarkRecord, BenchmarkReport, CpuTime, DEFAULT_RESULTS_FILE};
pub use sample::{LIBRARY_PREFIX, MalformedPolicy, REFERENCE_PREFIX, Sample, samples_with_prefix};
pub use summary::{ComparisonRow, compare_by_key_size, render_table};
