use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Weight of the propagation edges leaving a vertex pair for one label group
/// (the neighbors of `a` and the neighbors of `b` reached over edges with the
/// same label and direction).
///
/// The weight depends on the sizes of the neighbor sets only.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PropagationCoefficient {
    /// `2 / (|a| + |b|)`
    InverseAverage,

    /// `1 / (|a| * |b|)`, zero if either set is empty
    InverseProduct,
}

impl PropagationCoefficient {
    pub fn calculate<A, B>(&self, neighbors_a: &[A], neighbors_b: &[B]) -> f64 {
        let (n, m) = (neighbors_a.len(), neighbors_b.len());
        match *self {
            PropagationCoefficient::InverseAverage => {
                if n + m == 0 {
                    0.0
                } else {
                    2.0 / (n + m) as f64
                }
            }
            PropagationCoefficient::InverseProduct => {
                if n == 0 || m == 0 {
                    0.0
                } else {
                    1.0 / (n * m) as f64
                }
            }
        }
    }
}

impl fmt::Display for PropagationCoefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PropagationCoefficient::InverseAverage => "inverse-average",
            PropagationCoefficient::InverseProduct => "inverse-product",
        })
    }
}

impl FromStr for PropagationCoefficient {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "inverse-average" | "inverse_average" => Ok(PropagationCoefficient::InverseAverage),
            "inverse-product" | "inverse_product" => Ok(PropagationCoefficient::InverseProduct),
            _ => Err(Error::InvalidParameter {
                name: "coefficient",
                value: s.to_owned(),
                reason: "expected `inverse-average` or `inverse-product`",
            }),
        }
    }
}
