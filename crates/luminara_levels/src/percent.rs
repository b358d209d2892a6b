//! Symmetric percentage grid.

use crate::{LevelsError, PriceLevel, Side, sort_by_level, validate_anchor};

/// Default grid offsets in percent.
pub const DEFAULT_PERCENTS: [f64; 10] = [12.5, 25.0, 33.33, 37.5, 50.0, 62.5, 66.67, 75.0, 87.5, 100.0];

/// Levels at `anchor · (1 ± p/100)` for each `p`, sorted by level.
///
/// Levels below zero are dropped.
pub fn percent_grid(anchor: f64, percents: &[f64]) -> Result<Vec<PriceLevel>, LevelsError> {
    validate_anchor(anchor)?;
    let mut levels = Vec::with_capacity(2 * percents.len());
    for &p in percents {
        if !p.is_finite() || p < 0.0 {
            return Err(LevelsError::InvalidPercent {
                input: p.to_string(),
                reason: "must be a non-negative number",
            });
        }
        levels.push(PriceLevel {
            label: format!("+{p:.2}%"),
            level: anchor * (1.0 + p / 100.0),
            side: Side::Above,
            delta_pct: p,
        });
        let below = anchor * (1.0 - p / 100.0);
        if below >= 0.0 {
            levels.push(PriceLevel {
                label: format!("-{p:.2}%"),
                level: below,
                side: Side::Below,
                delta_pct: -p,
            });
        }
    }
    sort_by_level(&mut levels);
    Ok(levels)
}

/// Parse a comma-separated percent list such as `"12.5, 25,50"`.
///
/// Empty entries are skipped; an empty list is an error.
pub fn parse_percents(input: &str) -> Result<Vec<f64>, LevelsError> {
    let mut out = Vec::new();
    for raw in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let p: f64 = raw.parse().map_err(|_| LevelsError::InvalidPercent {
            input: raw.to_string(),
            reason: "not a number",
        })?;
        if !p.is_finite() || p < 0.0 {
            return Err(LevelsError::InvalidPercent {
                input: raw.to_string(),
                reason: "must be a non-negative number",
            });
        }
        out.push(p);
    }
    if out.is_empty() {
        return Err(LevelsError::InvalidPercent {
            input: input.to_string(),
            reason: "no percents given",
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_grid_around_2350() {
        let levels = percent_grid(2350.0, &DEFAULT_PERCENTS).unwrap();
        // 100% below lands on zero and is kept.
        assert_eq!(levels.len(), 20);
        assert_eq!(levels[0].level, 0.0);
        assert_eq!(levels[0].label, "-100.00%");
        assert_relative_eq!(levels[19].level, 4700.0);
        assert_eq!(levels[19].side, Side::Above);
        for pair in levels.windows(2) {
            assert!(pair[0].level <= pair[1].level);
        }
    }

    #[test]
    fn offsets_are_symmetric() {
        let levels = percent_grid(200.0, &[12.5]).unwrap();
        assert_eq!(levels.len(), 2);
        assert_relative_eq!(levels[0].level, 175.0);
        assert_eq!(levels[0].delta_pct, -12.5);
        assert_relative_eq!(levels[1].level, 225.0);
        assert_eq!(levels[1].label, "+12.50%");
        assert_relative_eq!(levels[1].distance_pct(200.0), levels[1].delta_pct, epsilon = 1e-12);
    }

    #[test]
    fn negative_levels_are_dropped() {
        let levels = percent_grid(10.0, &[150.0]).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].side, Side::Above);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(percent_grid(0.0, &[10.0]), Err(LevelsError::InvalidAnchor(_))));
        assert!(percent_grid(10.0, &[-5.0]).is_err());
        assert!(percent_grid(10.0, &[f64::NAN]).is_err());
    }

    #[test]
    fn parses_lists() {
        assert_eq!(parse_percents("12.5, 25,50").unwrap(), vec![12.5, 25.0, 50.0]);
        assert_eq!(parse_percents(" 10 ,, 20 ,").unwrap(), vec![10.0, 20.0]);
        assert!(matches!(
            parse_percents("10, abc"),
            Err(LevelsError::InvalidPercent { input, .. }) if input == "abc"
        ));
        assert!(parse_percents(" , ").is_err());
        assert!(parse_percents("-3").is_err());
    }
}
