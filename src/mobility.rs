//! Bounded random-walk mobility for the plain nodes.

use crate::geometry::Position;
use anyhow::Result;
use rand::prelude::*;
use rand_distr::Uniform;
use std::f64::consts::TAU;

/// Random walk at constant speed with a fresh heading every tick.
///
/// The walk reflects off the field edges, keeping positions inside the
/// square `[0, field]` on both axes. Heights are left untouched.
pub struct RandomWalk {
    field: f64,
    speed: f64,
    tick: f64,
    heading_dist: Uniform<f64>,
}

impl RandomWalk {
    pub fn new(field: f64, speed: f64, tick: f64) -> Result<Self> {
        let heading_dist = Uniform::new(0.0, TAU)?;
        Ok(Self {
            field,
            speed,
            tick,
            heading_dist,
        })
    }

    /// Move `pos` for one tick.
    pub fn step<R: Rng>(&self, pos: &mut Position, rng: &mut R) {
        let heading = self.heading_dist.sample(rng);
        let dist = self.speed * self.tick;
        pos.x = reflect(pos.x + dist * heading.cos(), self.field);
        pos.y = reflect(pos.y + dist * heading.sin(), self.field);
    }
}

fn reflect(coord: f64, field: f64) -> f64 {
    let mut coord = coord;
    if coord < 0.0 {
        coord = -coord;
    }
    if coord > field {
        coord = 2.0 * field - coord;
    }
    coord
}
