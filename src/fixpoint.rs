//! Fixpoint formulas computing the next iteration vector, as named by
//! Melnik et al., "Similarity Flooding" (ICDE 2002), Table 3.

use crate::error::Error;
use ndarray::Array1;
use std::fmt;
use std::str::FromStr;

/// Divides `v` by its maximum. An all-zero vector is returned unchanged.
pub fn normalize(mut v: Array1<f64>) -> Array1<f64> {
    let max = v.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if v.is_empty() || max == 0.0 {
        return v;
    }
    v.mapv_inplace(|x| x / max);
    v
}

/// Element-wise sum.
///
/// # Panics
///
/// If the vectors differ in length.
pub fn add(a: &Array1<f64>, b: &Array1<f64>) -> Array1<f64> {
    assert_eq!(a.len(), b.len(), "cannot add vectors of different length");
    a + b
}

/// Euclidean distance between two iteration vectors.
pub fn residuum(previous: &Array1<f64>, next: &Array1<f64>) -> f64 {
    assert_eq!(previous.len(), next.len());
    previous
        .iter()
        .zip(next.iter())
        .map(|(p, n)| (p - n) * (p - n))
        .sum::<f64>()
        .sqrt()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FixpointFormula {
    /// `normalize(previous + flood(previous))`
    Basic,
    /// `normalize(initial + flood(previous))`
    A,
    /// `normalize(flood(initial + previous))`
    B,
    /// `normalize(initial + previous + flood(initial + previous))`
    C,
}

impl FixpointFormula {
    /// Computes the next iteration vector. `flood` propagates a vector along
    /// the propagation graph.
    pub fn calculate<F>(&self, initial: &Array1<f64>, previous: &Array1<f64>, flood: F) -> Array1<f64>
    where
        F: Fn(&Array1<f64>) -> Array1<f64>,
    {
        let next = match *self {
            FixpointFormula::Basic => add(previous, &flood(previous)),
            FixpointFormula::A => add(initial, &flood(previous)),
            FixpointFormula::B => flood(&add(initial, previous)),
            FixpointFormula::C => {
                let sum = add(initial, previous);
                let flooded = flood(&sum);
                add(&sum, &flooded)
            }
        };
        normalize(next)
    }
}

impl Default for FixpointFormula {
    fn default() -> Self {
        FixpointFormula::C
    }
}

impl fmt::Display for FixpointFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FixpointFormula::Basic => "basic",
            FixpointFormula::A => "a",
            FixpointFormula::B => "b",
            FixpointFormula::C => "c",
        })
    }
}

impl FromStr for FixpointFormula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(FixpointFormula::Basic),
            "a" => Ok(FixpointFormula::A),
            "b" => Ok(FixpointFormula::B),
            "c" => Ok(FixpointFormula::C),
            _ => Err(Error::InvalidParameter {
                name: "fixpoint",
                value: s.to_owned(),
                reason: "expected one of `basic`, `a`, `b`, `c`",
            }),
        }
    }
}
