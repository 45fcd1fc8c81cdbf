use crate::coefficient::PropagationCoefficient;
use crate::error::{Error, Result};
use crate::fixpoint::FixpointFormula;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Parameters of [`SimilarityFlooding`](crate::SimilarityFlooding).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloodingConfig {
    /// Iteration stops once the residuum drops to or below `epsilon`.
    pub epsilon: f64,
    pub max_iterations: usize,
    pub coefficient: PropagationCoefficient,
    pub fixpoint: FixpointFormula,
}

impl Default for FloodingConfig {
    fn default() -> Self {
        FloodingConfig {
            epsilon: 1.0,
            max_iterations: 100,
            coefficient: PropagationCoefficient::InverseAverage,
            fixpoint: FixpointFormula::C,
        }
    }
}

impl FloodingConfig {
    /// Overrides fields from string values, keyed by field name. Either all
    /// overrides are applied or, on error, none.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<()> {
        let mut updated = *self;
        for (key, value) in overrides {
            match key.as_str() {
                "epsilon" => updated.epsilon = parse("epsilon", value, "expected a number")?,
                "max_iterations" => {
                    updated.max_iterations =
                        parse("max_iterations", value, "expected a non-negative integer")?
                }
                "coefficient" => updated.coefficient = value.parse()?,
                "fixpoint" => updated.fixpoint = value.parse()?,
                _ => return Err(Error::UnknownKey(key.clone())),
            }
            log::debug!("flooding config override: {} = {}", key, value);
        }
        *self = updated;
        Ok(())
    }
}

/// Parameters of the matching filters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FilterConfig {
    /// Pairs of the final mapping below this similarity are rejected.
    pub min_similarity: f64,
    /// Pairs of the initial mapping at or above this similarity are
    /// candidates on their own.
    pub initial_similarity_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            min_similarity: f64::NEG_INFINITY,
            initial_similarity_threshold: f64::NEG_INFINITY,
        }
    }
}

impl FilterConfig {
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<()> {
        let mut updated = *self;
        for (key, value) in overrides {
            match key.as_str() {
                "min_similarity" => {
                    updated.min_similarity = parse("min_similarity", value, "expected a number")?
                }
                "initial_similarity_threshold" => {
                    updated.initial_similarity_threshold =
                        parse("initial_similarity_threshold", value, "expected a number")?
                }
                _ => return Err(Error::UnknownKey(key.clone())),
            }
            log::debug!("filter config override: {} = {}", key, value);
        }
        *self = updated;
        Ok(())
    }
}

fn parse<T: FromStr>(name: &'static str, value: &str, reason: &'static str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::InvalidParameter {
        name,
        value: value.to_owned(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn flooding_overrides() {
        let mut config = FloodingConfig::default();
        config
            .apply_overrides(&overrides(&[
                ("epsilon", "0.01"),
                ("max_iterations", "25"),
                ("coefficient", "inverse-product"),
                ("fixpoint", "basic"),
            ]))
            .unwrap();

        assert_eq!(
            FloodingConfig {
                epsilon: 0.01,
                max_iterations: 25,
                coefficient: PropagationCoefficient::InverseProduct,
                fixpoint: FixpointFormula::Basic,
            },
            config
        );
    }

    #[test]
    fn negative_iterations_are_rejected() {
        let mut config = FloodingConfig::default();
        let err = config
            .apply_overrides(&overrides(&[("max_iterations", "-1")]))
            .unwrap_err();
        match err {
            Error::InvalidParameter { name, .. } => assert_eq!("max_iterations", name),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(100, config.max_iterations);
    }

    #[test]
    fn rejected_overrides_leave_config_unchanged() {
        let mut config = FloodingConfig::default();
        // keys apply in order, so `epsilon` parses before `max_iterations` fails
        assert!(config
            .apply_overrides(&overrides(&[("epsilon", "0.5"), ("max_iterations", "-3")]))
            .is_err());
        assert_eq!(FloodingConfig::default(), config);

        let mut filter = FilterConfig::default();
        assert!(filter
            .apply_overrides(&overrides(&[("min_similarity", "0.2"), ("unknown", "1")]))
            .is_err());
        assert_eq!(FilterConfig::default(), filter);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut config = FilterConfig::default();
        assert_eq!(
            Err(Error::UnknownKey("epsilon".to_owned())),
            config.apply_overrides(&overrides(&[("epsilon", "1")]))
        );
    }

    #[test]
    fn filter_overrides() {
        let mut config = FilterConfig::default();
        config
            .apply_overrides(&overrides(&[
                ("min_similarity", "0.06"),
                ("initial_similarity_threshold", "0.68"),
            ]))
            .unwrap();
        assert_eq!(0.06, config.min_similarity);
        assert_eq!(0.68, config.initial_similarity_threshold);
    }
}
