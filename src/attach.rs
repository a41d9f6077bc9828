//! Nearest-anchor assignment.

use crate::geometry::Position;
use anyhow::{Result, bail};

/// Map each mobile position to the index of its nearest anchor.
///
/// Distances are compared squared, in the horizontal plane only. Anchors are
/// scanned in index order with a strict comparison, so the lowest index wins
/// exact ties; this must stay stable for runs to be reproducible.
pub fn assign_nearest(mobiles: &[Position], anchors: &[Position]) -> Result<Vec<usize>> {
    if anchors.is_empty() {
        bail!("at least one anchor is required to assign attachments");
    }

    let mut assignment = Vec::with_capacity(mobiles.len());
    for mobile in mobiles {
        let mut best_dist2 = f64::MAX;
        let mut i_best = 0;
        for (i_anchor, anchor) in anchors.iter().enumerate() {
            let dist2 = mobile.plane_dist2(anchor);
            if dist2 < best_dist2 {
                best_dist2 = dist2;
                i_best = i_anchor;
            }
        }
        assignment.push(i_best);
    }

    Ok(assignment)
}
