use crate::geometry::Bounds;
use crate::obstacle::Relocation;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Scenario configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    pub field: FieldConfig,
    pub nodes: NodesConfig,
    pub layout: LayoutConfig,

    /// Obstacle relocations scheduled on the scenario timeline.
    #[serde(default)]
    pub moves: Vec<Relocation>,

    pub output: OutputConfig,
}

/// Field geometry parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Side length of the square field.
    pub size: f64,
    /// Cell size of the rendered map.
    pub cell: f64,
}

/// Node population parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NodesConfig {
    /// Number of nodes, endpoints included.
    pub count: usize,
    /// Height at which nodes are placed.
    pub height: f64,
    /// Speed of the mobile nodes.
    pub speed: f64,
    /// Seed of the mobility walk; drawn from the OS when absent.
    pub seed: Option<u64>,
}

/// Fixed entities of the scenario.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Anchor positions as (x, y, z) triples.
    pub anchors: Vec<[f64; 3]>,
    /// Initial obstacle boxes as (xMin, xMax, yMin, yMax, zMin, zMax).
    pub obstacles: Vec<[f64; 6]>,
}

/// Timeline granularity parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Scenario seconds covered by one advance.
    pub window: f64,
    /// Mobility update interval.
    pub tick: f64,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let text = fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&text)
    }

    /// Parse a [`Config`] from a TOML string and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_num(self.field.size, 1.0..100_000.0).context("invalid field size")?;
        check_num(self.field.cell, 0.1..self.field.size).context("invalid cell size")?;

        check_num(self.nodes.count, 2..100).context("invalid number of nodes")?;
        check_num(self.nodes.height, 0.0..100.0).context("invalid node height")?;
        check_num(self.nodes.speed, 0.0..1_000.0).context("invalid node speed")?;

        check_num(self.layout.anchors.len(), 1..10_000).context("invalid number of anchors")?;

        for (i_obs, &[x_min, x_max, y_min, y_max, z_min, z_max]) in
            self.layout.obstacles.iter().enumerate()
        {
            Bounds::new(x_min, x_max, y_min, y_max, z_min, z_max)
                .with_context(|| format!("invalid obstacle {i_obs}"))?;
        }

        let n_obs = self.layout.obstacles.len();
        for (i_move, reloc) in self.moves.iter().enumerate() {
            check_num(reloc.time, 0.0..1_000_000.0)
                .with_context(|| format!("invalid time of move {i_move}"))?;
            check_num(reloc.obstacle, 0..n_obs)
                .with_context(|| format!("invalid obstacle of move {i_move}"))?;
            check_num(reloc.width, 0.0..self.field.size)
                .with_context(|| format!("invalid width of move {i_move}"))?;
            check_num(reloc.height, 0.0..self.field.size)
                .with_context(|| format!("invalid height of move {i_move}"))?;
        }

        check_num(self.output.tick, 0.001..10_000.0).context("invalid tick length")?;
        check_num(self.output.window, self.output.tick..100_000.0)
            .context("invalid window length")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
