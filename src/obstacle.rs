//! Obstacle arena and scheduled relocation.

use crate::geometry::{Bounds, Position};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Horizontal step applied when nudging a relocated obstacle off an anchor.
const NUDGE_STEP: f64 = 20.0;

/// Iteration bound of the nudge loop.
const MAX_NUDGES: usize = 50;

/// Clearance kept between a relocated obstacle and the right field edge.
const EDGE_MARGIN: f64 = 1.0;

/// Vertical extent given to every relocated obstacle.
const RELOCATED_Z_MAX: f64 = 10.0;

/// Arena of scenario obstacles, addressed by creation index.
#[derive(Serialize, Deserialize)]
pub struct Obstacles {
    bounds_vec: Vec<Bounds>,
}

impl Obstacles {
    pub fn new() -> Self {
        Self {
            bounds_vec: Vec::new(),
        }
    }

    /// Add an obstacle and return its index.
    pub fn create(&mut self, bounds: Bounds) -> usize {
        self.bounds_vec.push(bounds);
        self.bounds_vec.len() - 1
    }

    /// Replace an obstacle's box wholesale.
    pub fn set_boundaries(&mut self, i_obs: usize, bounds: Bounds) -> Result<()> {
        let n_obs = self.bounds_vec.len();
        let Some(slot) = self.bounds_vec.get_mut(i_obs) else {
            bail!("obstacle index must be below {n_obs}, but is {i_obs}");
        };
        *slot = bounds;
        Ok(())
    }

    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds_vec
    }
}

impl Default for Obstacles {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot obstacle relocation scheduled on the scenario timeline.
///
/// A plain data record: the obstacle is named by index and the anchors are
/// read at fire time, so nothing here holds references into the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relocation {
    /// Time at which the relocation fires.
    pub time: f64,
    /// Index of the obstacle to move.
    pub obstacle: usize,
    /// Desired x origin of the new box.
    pub x: f64,
    /// Desired y origin of the new box.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Compute the box a relocation settles on.
///
/// The candidate built from the desired origin is nudged right in fixed
/// steps while it covers any anchor, clamped so it never crosses the right
/// field edge. The search gives up after a fixed number of nudges and
/// accepts the last candidate, so a pathological anchor layout reduces the
/// overlap instead of eliminating it.
///
/// Deterministic: fixed inputs always settle on the same box.
pub fn resolve_relocation(reloc: &Relocation, anchors: &[Position], field: f64) -> Result<Bounds> {
    let mut x = reloc.x;
    let mut candidate = relocated_box(x, reloc)?;

    let mut nudges = 0;
    while anchors.iter().any(|anchor| candidate.covers_plane(anchor)) && nudges < MAX_NUDGES {
        x = (x + NUDGE_STEP).min(field - reloc.width - EDGE_MARGIN);
        candidate = relocated_box(x, reloc)?;
        nudges += 1;
    }

    Ok(candidate)
}

fn relocated_box(x: f64, reloc: &Relocation) -> Result<Bounds> {
    Bounds::new(
        x,
        x + reloc.width,
        reloc.y,
        reloc.y + reloc.height,
        0.0,
        RELOCATED_Z_MAX,
    )
}
