use serde::{Deserialize, Serialize};

/// Ceiling accepted for any stored or requested price, in whole dollars.
pub const MAX_PRICE: u32 = 1_000_000_000;

/// Validation errors for price input and price ranges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("'{raw}' is not a valid price")]
    Malformed { raw: String },
    #[error("price may not be negative")]
    Negative,
    #[error("price {value} exceeds the {ceiling} ceiling")]
    AboveCeiling { value: i64, ceiling: u32 },
    #[error("minimum price {min} exceeds maximum price {max}")]
    InvertedRange { min: u32, max: u32 },
}

/// Parse user-entered price text: optional `$`, thousands separators, and
/// surrounding whitespace are accepted; anything else is rejected.
pub fn parse_price(raw: &str) -> Result<u32, PriceError> {
    let cleaned: String = raw
        .trim()
        .strip_prefix('$')
        .unwrap_or_else(|| raw.trim())
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(PriceError::Malformed {
            raw: raw.to_string(),
        });
    }

    let value: i64 = cleaned.parse().map_err(|_| PriceError::Malformed {
        raw: raw.to_string(),
    })?;

    if value < 0 {
        return Err(PriceError::Negative);
    }
    if value > i64::from(MAX_PRICE) {
        return Err(PriceError::AboveCeiling {
            value,
            ceiling: MAX_PRICE,
        });
    }

    Ok(value as u32)
}

/// An agent's price-range interest.
///
/// The two override flags dominate the numeric bounds: `has_no_min` makes the
/// range unbounded below regardless of any stored minimum, and symmetrically
/// for `has_no_max`. Writing an explicit bound clears the matching override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangePreference {
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub has_no_min: bool,
    pub has_no_max: bool,
}

impl PriceRangePreference {
    /// Set the minimum bound; the explicit value wins over `has_no_min`.
    pub fn set_min_price(&mut self, value: u32) -> Result<(), PriceError> {
        if value > MAX_PRICE {
            return Err(PriceError::AboveCeiling {
                value: i64::from(value),
                ceiling: MAX_PRICE,
            });
        }
        if let Some(max) = self.max_price {
            if !self.has_no_max && value > max {
                return Err(PriceError::InvertedRange { min: value, max });
            }
        }
        self.min_price = Some(value);
        self.has_no_min = false;
        Ok(())
    }

    /// Set the maximum bound; the explicit value wins over `has_no_max`.
    pub fn set_max_price(&mut self, value: u32) -> Result<(), PriceError> {
        if value > MAX_PRICE {
            return Err(PriceError::AboveCeiling {
                value: i64::from(value),
                ceiling: MAX_PRICE,
            });
        }
        if let Some(min) = self.min_price {
            if !self.has_no_min && value < min {
                return Err(PriceError::InvertedRange { min, max: value });
            }
        }
        self.max_price = Some(value);
        self.has_no_max = false;
        Ok(())
    }

    pub fn clear_min_price(&mut self) {
        self.min_price = None;
    }

    pub fn clear_max_price(&mut self) {
        self.max_price = None;
    }

    pub fn set_no_min(&mut self, no_min: bool) {
        self.has_no_min = no_min;
    }

    pub fn set_no_max(&mut self, no_max: bool) {
        self.has_no_max = no_max;
    }

    /// Lower bound of the effective interval; `None` means unbounded below.
    /// An unset minimum without an override behaves as zero.
    pub fn effective_min(&self) -> Option<u32> {
        if self.has_no_min {
            None
        } else {
            Some(self.min_price.unwrap_or(0))
        }
    }

    /// Upper bound of the effective interval; `None` means unbounded above.
    pub fn effective_max(&self) -> Option<u32> {
        if self.has_no_max {
            None
        } else {
            self.max_price
        }
    }

    /// Interval-overlap test against a criteria range. Absent criteria bounds
    /// behave as zero (minimum) and unbounded (maximum).
    pub fn overlaps(&self, criteria_min: Option<u32>, criteria_max: Option<u32>) -> bool {
        let below_ok = match (self.effective_min(), criteria_max) {
            (Some(effective_min), Some(criteria_max)) => effective_min <= criteria_max,
            _ => true,
        };
        let above_ok = match (self.effective_max(), criteria_min) {
            (Some(effective_max), Some(criteria_min)) => effective_max >= criteria_min,
            _ => true,
        };
        below_ok && above_ok
    }

    /// Check the stored range as a whole, e.g. before an upsert.
    pub fn validate(&self) -> Result<(), PriceError> {
        for bound in [self.min_price, self.max_price].into_iter().flatten() {
            if bound > MAX_PRICE {
                return Err(PriceError::AboveCeiling {
                    value: i64::from(bound),
                    ceiling: MAX_PRICE,
                });
            }
        }

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if !self.has_no_min && !self.has_no_max && min > max {
                return Err(PriceError::InvertedRange { min, max });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: Option<u32>, max: Option<u32>) -> PriceRangePreference {
        PriceRangePreference {
            min_price: min,
            max_price: max,
            ..PriceRangePreference::default()
        }
    }

    #[test]
    fn overlap_is_reflexive_for_valid_ranges() {
        for (min, max) in [(0, 100_000), (250_000, 250_000), (400_000, 900_000)] {
            let preference = range(Some(min), Some(max));
            assert!(preference.overlaps(Some(min), Some(max)));
        }
    }

    #[test]
    fn no_min_override_dominates_stored_minimum() {
        let mut preference = range(Some(800_000), Some(900_000));
        preference.set_no_min(true);

        // Stored minimum of 800k would exclude this range; the override wins.
        assert!(preference.overlaps(None, Some(100_000)));
        assert!(preference.overlaps(Some(850_000), None));
    }

    #[test]
    fn no_max_override_dominates_stored_maximum() {
        let mut preference = range(Some(100_000), Some(200_000));
        preference.set_no_max(true);

        assert!(preference.overlaps(Some(5_000_000), None));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        let preference = range(Some(700_000), Some(900_000));
        assert!(!preference.overlaps(None, Some(600_000)));
        assert!(!range(Some(0), Some(100_000)).overlaps(Some(200_000), None));
    }

    #[test]
    fn empty_preference_is_unrestricted() {
        let preference = PriceRangePreference::default();
        assert!(preference.overlaps(Some(400_000), Some(600_000)));
        assert!(preference.overlaps(None, None));
        assert!(preference.overlaps(Some(MAX_PRICE), None));
    }

    #[test]
    fn unset_minimum_behaves_as_zero() {
        let preference = range(None, Some(300_000));
        assert!(preference.overlaps(None, Some(50_000)));
        assert!(!preference.overlaps(Some(400_000), None));
    }

    #[test]
    fn explicit_value_clears_the_override() {
        let mut preference = PriceRangePreference::default();
        preference.set_no_min(true);
        preference.set_no_max(true);

        preference.set_min_price(200_000).expect("valid minimum");
        assert!(!preference.has_no_min);
        assert!(preference.has_no_max);

        preference.set_max_price(400_000).expect("valid maximum");
        assert!(!preference.has_no_max);
    }

    #[test]
    fn inverted_explicit_range_is_rejected() {
        let mut preference = PriceRangePreference::default();
        preference.set_min_price(500_000).expect("valid minimum");
        assert_eq!(
            preference.set_max_price(400_000),
            Err(PriceError::InvertedRange {
                min: 500_000,
                max: 400_000
            })
        );

        let stored = range(Some(500_000), Some(400_000));
        assert!(stored.validate().is_err());
    }

    #[test]
    fn override_suspends_the_inversion_check() {
        let mut preference = range(Some(500_000), None);
        preference.set_no_min(true);
        preference.set_max_price(400_000).expect("override suspends check");

        let stored = PriceRangePreference {
            min_price: Some(500_000),
            max_price: Some(400_000),
            has_no_min: true,
            has_no_max: false,
        };
        assert!(stored.validate().is_ok());
    }

    #[test]
    fn parses_common_price_formats() {
        assert_eq!(parse_price("450000"), Ok(450_000));
        assert_eq!(parse_price("$450,000"), Ok(450_000));
        assert_eq!(parse_price("  1,250,000 "), Ok(1_250_000));
    }

    #[test]
    fn rejects_malformed_negative_and_oversized_prices() {
        assert!(matches!(
            parse_price("four hundred"),
            Err(PriceError::Malformed { .. })
        ));
        assert!(matches!(parse_price(""), Err(PriceError::Malformed { .. })));
        assert_eq!(parse_price("-5"), Err(PriceError::Negative));
        assert!(matches!(
            parse_price("2,000,000,000"),
            Err(PriceError::AboveCeiling { .. })
        ));
    }
}
