//! Square-root price ladder.
//!
//! Rung `k` sits at `(√P ± k·step)²`, so rungs are evenly spaced in
//! square-root price and widen as price grows.

use crate::{LevelsError, PriceLevel, Side, sort_by_level, validate_anchor};

pub const DEFAULT_ROOT_STEP: f64 = 0.125;
pub const DEFAULT_TURNS: u32 = 5;

/// Anchor row plus `turns` rungs on each side, sorted by level.
///
/// Down rungs whose root would reach zero or below are dropped.
pub fn sqrt_ladder(anchor: f64, root_step: f64, turns: u32) -> Result<Vec<PriceLevel>, LevelsError> {
    validate_anchor(anchor)?;
    if !root_step.is_finite() || root_step <= 0.0 {
        return Err(LevelsError::InvalidLadder("root_step must be positive"));
    }
    if turns == 0 {
        return Err(LevelsError::InvalidLadder("turns must be at least 1"));
    }

    let root = anchor.sqrt();
    let delta = |level: f64| (level / anchor - 1.0) * 100.0;
    let mut levels = Vec::with_capacity(2 * turns as usize + 1);
    levels.push(PriceLevel {
        label: "Anchor".to_string(),
        level: anchor,
        side: Side::Anchor,
        delta_pct: 0.0,
    });
    for k in 1..=turns {
        let offset = f64::from(k) * root_step;
        let up = (root + offset).powi(2);
        levels.push(PriceLevel {
            label: format!("+{k}·√step"),
            level: up,
            side: Side::Above,
            delta_pct: delta(up),
        });
        if root - offset > 0.0 {
            let down = (root - offset).powi(2);
            levels.push(PriceLevel {
                label: format!("-{k}·√step"),
                level: down,
                side: Side::Below,
                delta_pct: delta(down),
            });
        }
    }
    sort_by_level(&mut levels);
    Ok(levels)
}
