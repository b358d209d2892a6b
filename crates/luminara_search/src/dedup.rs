//! Hit deduplicator.
//!
//! Adjacent detections of the same target within a minimum gap usually
//! come from one physical event seen through neighbouring brackets.

use crate::harmonic_types::Hit;

/// Which member of a cluster of close hits survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Keep the earliest hit; a later one survives only if it is more than
    /// the gap after the last kept hit.
    #[default]
    KeepFirst,
    /// Split into clusters whose consecutive members are at most the gap
    /// apart and keep each cluster's smallest deviation (earliest on tie).
    KeepBest,
}

/// Collapse near-duplicate hits per target.
///
/// Output is ascending by epoch; hits at the same instant keep their
/// input order.
pub fn dedupe(hits: Vec<Hit>, min_gap_seconds: f64, policy: DedupPolicy) -> Vec<Hit> {
    let mut order: Vec<usize> = (0..hits.len()).collect();
    order.sort_by(|&i, &j| {
        let (a, b) = (hits[i].epoch.as_utc_seconds(), hits[j].epoch.as_utc_seconds());
        a.total_cmp(&b)
    });

    // Group indices per target, preserving time order within each group.
    let mut groups: Vec<(f64, Vec<usize>)> = Vec::new();
    for &i in &order {
        let target = hits[i].target_deg;
        match groups.iter_mut().find(|(t, _)| *t == target) {
            Some((_, members)) => members.push(i),
            None => groups.push((target, vec![i])),
        }
    }

    let mut keep = vec![false; hits.len()];
    for (_, members) in &groups {
        match policy {
            DedupPolicy::KeepFirst => keep_first(&hits, members, min_gap_seconds, &mut keep),
            DedupPolicy::KeepBest => keep_best(&hits, members, min_gap_seconds, &mut keep),
        }
    }

    order
        .into_iter()
        .filter(|&i| keep[i])
        .map(|i| hits[i])
        .collect()
}

fn keep_first(hits: &[Hit], members: &[usize], gap: f64, keep: &mut [bool]) {
    let mut last_kept: Option<usize> = None;
    for &i in members {
        let far_enough = match last_kept {
            None => true,
            Some(k) => hits[i].epoch - hits[k].epoch > gap,
        };
        if far_enough {
            keep[i] = true;
            last_kept = Some(i);
        }
    }
}

fn keep_best(hits: &[Hit], members: &[usize], gap: f64, keep: &mut [bool]) {
    let mut cluster_best: Option<usize> = None;
    let mut prev: Option<usize> = None;
    for &i in members {
        let joins = prev.is_some_and(|p| hits[i].epoch - hits[p].epoch <= gap);
        if !joins {
            if let Some(b) = cluster_best {
                keep[b] = true;
            }
            cluster_best = Some(i);
        } else if let Some(b) = cluster_best
            && hits[i].deviation_deg < hits[b].deviation_deg
        {
            cluster_best = Some(i);
        }
        prev = Some(i);
    }
    if let Some(b) = cluster_best {
        keep[b] = true;
    }
}
