//! Price projections around an anchor price.
//!
//! Two projection methods are provided:
//! - [`percent_grid`]: symmetric percentage offsets above and below the anchor
//! - [`sqrt_ladder`]: rungs spaced evenly in square-root price
//!
//! [`cross_join`] pairs every timing event with every level.

pub mod error;
pub mod percent;
pub mod sqrt_ladder;

use std::fmt::{self, Display};

pub use error::LevelsError;
pub use percent::{DEFAULT_PERCENTS, parse_percents, percent_grid};
pub use sqrt_ladder::{DEFAULT_ROOT_STEP, DEFAULT_TURNS, sqrt_ladder};

/// Position of a level relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Above,
    Below,
    Anchor,
}

impl Side {
    pub const fn name(self) -> &'static str {
        match self {
            Side::Above => "Above",
            Side::Below => "Below",
            Side::Anchor => "Anchor",
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One projected price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLevel {
    pub label: String,
    pub level: f64,
    pub side: Side,
    /// Signed offset from the anchor in percent.
    pub delta_pct: f64,
}

impl PriceLevel {
    /// `(level / anchor − 1) · 100`.
    pub fn distance_pct(&self, anchor: f64) -> f64 {
        (self.level / anchor - 1.0) * 100.0
    }
}

/// Every event paired with every level: event order, then level order.
pub fn cross_join<'a, E>(events: &'a [E], levels: &'a [PriceLevel]) -> Vec<(&'a E, &'a PriceLevel)> {
    events
        .iter()
        .flat_map(|e| levels.iter().map(move |l| (e, l)))
        .collect()
}

pub(crate) fn validate_anchor(anchor: f64) -> Result<(), LevelsError> {
    if !anchor.is_finite() || anchor <= 0.0 {
        return Err(LevelsError::InvalidAnchor(anchor));
    }
    Ok(())
}

pub(crate) fn sort_by_level(levels: &mut [PriceLevel]) {
    levels.sort_by(|a, b| a.level.total_cmp(&b.level));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(value: f64) -> PriceLevel {
        PriceLevel {
            label: format!("{value}"),
            level: value,
            side: Side::Above,
            delta_pct: 0.0,
        }
    }

    #[test]
    fn cross_join_orders_events_then_levels() {
        let levels = [level(1.0), level(2.0)];
        let joined = cross_join(&["a", "b"], &levels);
        let flat: Vec<(&str, f64)> = joined.iter().map(|(e, l)| (**e, l.level)).collect();
        assert_eq!(flat, vec![("a", 1.0), ("a", 2.0), ("b", 1.0), ("b", 2.0)]);
    }

    #[test]
    fn cross_join_with_empty_side() {
        let empty: [u8; 0] = [];
        assert!(cross_join(&empty, &[level(1.0)]).is_empty());
        assert!(cross_join(&[1u8], &[]).is_empty());
    }

    #[test]
    fn distance_from_anchor() {
        assert_eq!(level(150.0).distance_pct(100.0), 50.0);
        assert_eq!(level(75.0).distance_pct(100.0), -25.0);
    }

    #[test]
    fn anchor_validation() {
        assert!(validate_anchor(1.0).is_ok());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(validate_anchor(bad).is_err());
        }
    }
}
