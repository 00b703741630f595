use crate::error::{Result, ResultsError};
use crate::sample::Sample;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt::Write;

/// Library and reference times for one key size
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub key_size: u64,
    pub library_time: f64,
    pub reference_time: f64,
    /// reference / library; above 1.0 the library is faster
    pub speedup: f64,
}

impl ComparisonRow {
    pub fn library_wins(&self) -> bool {
        self.speedup > 1.0
    }
}

/// Join both sample sets on key size at a fixed value size and insertion count
///
/// Rows are sorted by key size. A key size measured on only one side is
/// dropped. If a key size appears more than once on a side, the last
/// measurement wins.
pub fn compare_by_key_size(
    library: &[Sample],
    reference: &[Sample],
    value_size: u64,
    insertions: u64,
) -> Result<Vec<ComparisonRow>> {
    let select = |samples: &[Sample]| -> FxHashMap<u64, f64> {
        samples
            .iter()
            .filter(|s| s.value_size == value_size && s.insertions == insertions)
            .map(|s| (s.key_size, s.time))
            .collect()
    };

    let library_times = select(library);
    let reference_times = select(reference);

    let rows: Vec<ComparisonRow> = library_times
        .iter()
        .filter_map(|(&key_size, &library_time)| {
            reference_times
                .get(&key_size)
                .map(|&reference_time| ComparisonRow {
                    key_size,
                    library_time,
                    reference_time,
                    speedup: reference_time / library_time,
                })
        })
        .sorted_by_key(|row| row.key_size)
        .collect();

    if rows.is_empty() {
        return Err(ResultsError::no_data(format!(
            "key sizes measured by both maps at value_size == {value_size} and insertions == {insertions}"
        )));
    }

    Ok(rows)
}

/// Format comparison rows as an aligned text table
pub fn render_table(
    rows: &[ComparisonRow],
    library_label: &str,
    reference_label: &str,
    time_unit: &str,
) -> String {
    let library_header = format!("{library_label} ({time_unit})");
    let reference_header = format!("{reference_label} ({time_unit})");
    let width = library_header.len().max(reference_header.len()).max(15);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<width$} {:<width$} {:<10} {}",
        "Key size", library_header, reference_header, "Speedup", "Winner",
    );
    let _ = writeln!(out, "{}", "-".repeat(10 + 2 * width + 10 + 4 + 16));

    for row in rows {
        let winner = if row.library_wins() {
            library_label
        } else {
            reference_label
        };
        let _ = writeln!(
            out,
            "{:<10} {:<width$.2} {:<width$.2} {:>9.2}x {}",
            row.key_size, row.library_time, row.reference_time, row.speedup, winner,
        );
    }

    out
}
