use crate::error::{Result, ResultsError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `<prefix>char[1<<K], char[1<<V]>/I` and captures K, V and I
static BENCH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*char\[1<<(\d+)\], char\[1<<(\d+)\]>/(\d+)$")
        .expect("benchmark name pattern is valid")
});

/// Dimensions recovered from a templated benchmark label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BenchName {
    /// Key size in bytes (2^K)
    pub key_size: u64,
    /// Value size in bytes (2^V)
    pub value_size: u64,
    /// Number of insert operations in one run
    pub insertions: u64,
}

/// Parse `BM_HashmapInsert<char[1<<2], char[1<<8]>/4` into `(4, 256, 4)`
///
/// Labels that do not have the full `char[1<<K], char[1<<V]>/I` shape fail
/// with [`ResultsError::MalformedName`]; nothing is guessed from a partial
/// match.
pub fn parse_bench_name(name: &str) -> Result<BenchName> {
    let captures = BENCH_NAME
        .captures(name)
        .ok_or_else(|| ResultsError::malformed_name(name))?;

    let key_exp: u32 = parse_digits(name, &captures[1])?;
    let value_exp: u32 = parse_digits(name, &captures[2])?;
    let insertions: u64 = parse_digits(name, &captures[3])?;

    Ok(BenchName {
        key_size: power_of_two(name, key_exp)?,
        value_size: power_of_two(name, value_exp)?,
        insertions,
    })
}

fn parse_digits<T: std::str::FromStr>(name: &str, digits: &str) -> Result<T> {
    // \d+ only admits digits, so the only failure left is overflow
    digits
        .parse()
        .map_err(|_| ResultsError::malformed_name(name))
}

fn power_of_two(name: &str, exponent: u32) -> Result<u64> {
    1u64.checked_shl(exponent)
        .ok_or_else(|| ResultsError::ExponentOutOfRange {
            name: name.to_string(),
            exponent,
        })
}
