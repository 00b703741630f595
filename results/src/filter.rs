//! Project samples onto the 1D/2D slices the report plots.
//!
//! Every function selects the samples matching its fixed dimensions and
//! returns parallel columns in input order. The `*_3d` and `filter_same_kv`
//! variants return log10 values, ready for a surface plot whose axes span
//! several orders of magnitude. An empty selection is an error that names the
//! selector.

use crate::error::{Result, ResultsError};
use crate::sample::Sample;
use ndarray::Array1;
use serde::Serialize;

/// Value size used by [`filter_insertions_2d`]
pub const NARROW_VALUE_SIZE: u64 = 8;

/// Two parallel columns, e.g. (key size, time)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series2 {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
}

/// Three parallel columns, e.g. (key size, insertions, time)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series3 {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
}

impl Series2 {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (x, y) pairs in series order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn log10(&self) -> Self {
        Self {
            x: self.x.mapv(f64::log10),
            y: self.y.mapv(f64::log10),
        }
    }
}

impl Series3 {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (x, y, z) triples in series order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .zip(self.z.iter())
            .map(|((x, y), z)| (*x, *y, *z))
    }

    pub fn log10(&self) -> Self {
        Self {
            x: self.x.mapv(f64::log10),
            y: self.y.mapv(f64::log10),
            z: self.z.mapv(f64::log10),
        }
    }
}

fn collect2(
    samples: &[Sample],
    selection: impl FnOnce() -> String,
    keep: impl Fn(&Sample) -> bool,
    project: impl Fn(&Sample) -> (f64, f64),
) -> Result<Series2> {
    let (x, y): (Vec<f64>, Vec<f64>) = samples.iter().filter(|s| keep(*s)).map(project).unzip();
    if x.is_empty() {
        return Err(ResultsError::no_data(selection()));
    }
    Ok(Series2 {
        x: Array1::from(x),
        y: Array1::from(y),
    })
}

fn collect3(
    samples: &[Sample],
    selection: impl FnOnce() -> String,
    keep: impl Fn(&Sample) -> bool,
    project: impl Fn(&Sample) -> (f64, f64, f64),
) -> Result<Series3> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();
    for (a, b, c) in samples.iter().filter(|s| keep(*s)).map(project) {
        x.push(a);
        y.push(b);
        z.push(c);
    }
    if x.is_empty() {
        return Err(ResultsError::no_data(selection()));
    }
    Ok(Series3 {
        x: Array1::from(x),
        y: Array1::from(y),
        z: Array1::from(z),
    })
}

/// (insertions, time) for one key/value size pair
pub fn filter_kv(samples: &[Sample], key_size: u64, value_size: u64) -> Result<Series2> {
    collect2(
        samples,
        || format!("key_size == {key_size} and value_size == {value_size}"),
        |s| s.key_size == key_size && s.value_size == value_size,
        |s| (s.insertions as f64, s.time),
    )
}

/// (key size, time) for one value size and insertion count
pub fn filter_value_size_insertions(
    samples: &[Sample],
    value_size: u64,
    insertions: u64,
) -> Result<Series2> {
    collect2(
        samples,
        || format!("value_size == {value_size} and insertions == {insertions}"),
        |s| s.value_size == value_size && s.insertions == insertions,
        |s| (s.key_size as f64, s.time),
    )
}

/// log10 of (value size, insertions, time) where key and value sizes are equal
pub fn filter_same_kv(samples: &[Sample]) -> Result<Series3> {
    collect3(
        samples,
        || "key_size == value_size".to_string(),
        |s| s.key_size == s.value_size,
        |s| (s.value_size as f64, s.insertions as f64, s.time),
    )
    .map(|series| series.log10())
}

/// log10 of (key size, value size, time) for one insertion count
pub fn filter_insertions_3d(samples: &[Sample], insertions: u64) -> Result<Series3> {
    collect3(
        samples,
        || format!("insertions == {insertions}"),
        |s| s.insertions == insertions,
        |s| (s.key_size as f64, s.value_size as f64, s.time),
    )
    .map(|series| series.log10())
}

/// log10 of (key size, insertions, time) for one value size
pub fn filter_value_size_3d(samples: &[Sample], value_size: u64) -> Result<Series3> {
    collect3(
        samples,
        || format!("value_size == {value_size}"),
        |s| s.value_size == value_size,
        |s| (s.key_size as f64, s.insertions as f64, s.time),
    )
    .map(|series| series.log10())
}

/// (key size, time) for 8-byte values and one insertion count
pub fn filter_insertions_2d(samples: &[Sample], insertions: u64) -> Result<Series2> {
    collect2(
        samples,
        || format!("value_size == {NARROW_VALUE_SIZE} and insertions == {insertions}"),
        |s| s.value_size == NARROW_VALUE_SIZE && s.insertions == insertions,
        |s| (s.key_size as f64, s.time),
    )
}
