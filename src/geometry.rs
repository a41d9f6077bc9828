//! Scenario geometry primitives.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Point in continuous scenario space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Create a new position from its coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared distance to `other` in the horizontal plane.
    ///
    /// Heights are ignored: attachment decisions compare ground distances.
    pub fn plane_dist2(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned box with ordered bounds on every axis.
///
/// The ordering invariant (`min <= max` per axis) is established at
/// construction and cannot be broken afterwards: boxes are only ever
/// replaced wholesale, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    z_min: f64,
    z_max: f64,
}

impl Bounds {
    /// Create a new box, rejecting inverted bounds.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        z_min: f64,
        z_max: f64,
    ) -> Result<Self> {
        if x_min > x_max || y_min > y_max || z_min > z_max {
            bail!(
                "invalid geometry: box x[{x_min},{x_max}] y[{y_min},{y_max}] \
                 z[{z_min},{z_max}] has inverted bounds"
            );
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        })
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// Whether `pos` lies on the horizontal footprint of the box.
    ///
    /// The boundary counts as covered.
    pub fn covers_plane(&self, pos: &Position) -> bool {
        pos.x >= self.x_min && pos.x <= self.x_max && pos.y >= self.y_min && pos.y <= self.y_max
    }
}
