//! Scenario state shared by the engine and the renderer.

use crate::geometry::Position;
use crate::obstacle::Obstacles;
use serde::{Deserialize, Serialize};

/// Role of a node in the traffic pattern.
///
/// The two endpoints are tagged explicitly instead of being inferred from
/// their index, so the renderer does not depend on input order conventions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Source,
    Destination,
    Plain,
}

/// Node of the scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub role: Role,
    pub pos: Position,
}

/// Geometric state of the scenario at a given instant.
///
/// Anchors never move; node positions are updated by the mobility walk and
/// obstacle boxes by scheduled relocations.
#[derive(Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Vec<Node>,
    pub anchors: Vec<Position>,
    pub obstacles: Obstacles,
}
