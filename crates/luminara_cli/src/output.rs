//! Output rows for text tables and JSON.

use luminara_levels::PriceLevel;
use luminara_search::Hit;
use serde::Serialize;

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// One timing hit: UTC to the second, angle to 4 decimals, deviation in
/// arcminutes to 1 decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitRow {
    #[serde(rename = "UTC")]
    pub utc: String,
    #[serde(rename = "Pair")]
    pub pair: String,
    #[serde(rename = "AngleTarget")]
    pub angle_target: f64,
    #[serde(rename = "ExactAngle")]
    pub exact_angle: f64,
    #[serde(rename = "Diff(arcmin)")]
    pub diff_arcmin: f64,
}

impl From<&Hit> for HitRow {
    fn from(hit: &Hit) -> Self {
        Self {
            utc: hit.epoch.rounded_to_second().to_string(),
            pair: format!("{}-{}", hit.body_a, hit.body_b),
            angle_target: hit.target_deg,
            exact_angle: round_to(hit.actual_deg, 4),
            diff_arcmin: round_to(hit.deviation_arcmin(), 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRow {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Level")]
    pub level: f64,
    #[serde(rename = "Side")]
    pub side: String,
    #[serde(rename = "Δ%")]
    pub delta_pct: f64,
}

impl From<&PriceLevel> for LevelRow {
    fn from(level: &PriceLevel) -> Self {
        Self {
            label: level.label.clone(),
            level: round_to(level.level, 4),
            side: level.side.to_string(),
            delta_pct: round_to(level.delta_pct, 4),
        }
    }
}

/// A timing hit joined with one price level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    #[serde(flatten)]
    pub hit: HitRow,
    #[serde(flatten)]
    pub level: LevelRow,
    #[serde(rename = "Anchor")]
    pub anchor: f64,
    #[serde(rename = "Distance%")]
    pub distance_pct: f64,
}

impl ProjectionRow {
    pub fn new(hit: &Hit, level: &PriceLevel, anchor: f64) -> Self {
        Self {
            hit: hit.into(),
            level: level.into(),
            anchor,
            distance_pct: round_to(level.distance_pct(anchor), 4),
        }
    }
}

pub fn print_hits(rows: &[HitRow]) {
    println!(
        "{:<21} {:<16} {:>11} {:>11} {:>12}",
        "UTC", "Pair", "AngleTarget", "ExactAngle", "Diff(arcmin)"
    );
    for r in rows {
        println!(
            "{:<21} {:<16} {:>11.2} {:>11.4} {:>12.1}",
            r.utc, r.pair, r.angle_target, r.exact_angle, r.diff_arcmin
        );
    }
}

pub fn print_levels(rows: &[LevelRow]) {
    println!("{:<12} {:>14} {:<7} {:>10}", "Label", "Level", "Side", "Δ%");
    for r in rows {
        println!(
            "{:<12} {:>14.4} {:<7} {:>10.4}",
            r.label, r.level, r.side, r.delta_pct
        );
    }
}

pub fn print_projections(rows: &[ProjectionRow]) {
    println!(
        "{:<21} {:<16} {:>11} {:>11} {:>12} {:<12} {:<7} {:>14} {:>10}",
        "UTC", "Pair", "AngleTarget", "ExactAngle", "Diff(arcmin)", "Label", "Side", "Level", "Distance%"
    );
    for r in rows {
        println!(
            "{:<21} {:<16} {:>11.2} {:>11.4} {:>12.1} {:<12} {:<7} {:>14.4} {:>10.4}",
            r.hit.utc,
            r.hit.pair,
            r.hit.angle_target,
            r.hit.exact_angle,
            r.hit.diff_arcmin,
            r.level.label,
            r.level.side,
            r.level.level,
            r.distance_pct
        );
    }
}
