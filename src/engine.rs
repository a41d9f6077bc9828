use crate::attach;
use crate::config::Config;
use crate::geometry::{Bounds, Position};
use crate::grid;
use crate::mobility::RandomWalk;
use crate::obstacle::{Obstacles, Relocation, resolve_relocation};
use crate::scene::{Node, Role, Scene};
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rmp_serde::{decode, encode};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Scenario engine.
///
/// Holds the configuration, scene state, pending relocations and random
/// number generator, and provides methods to lay out, advance, inspect and
/// checkpoint scenarios.
#[derive(Serialize, Deserialize)]
pub struct Engine {
    cfg: Config,
    scene: Scene,
    pending: Vec<Relocation>,
    i_next: usize,
    clock: f64,
    rng: ChaCha12Rng,
}

impl Engine {
    /// Create a new `Engine` with the given configuration and the initial layout.
    ///
    /// The source and destination nodes are pinned to opposite corners of the
    /// field and the remaining nodes spread evenly along the diagonal between
    /// them. Scheduled relocations are queued in time order.
    pub fn generate_initial_layout(cfg: Config) -> Result<Self> {
        let rng = match cfg.nodes.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng()?,
        };

        let field = cfg.field.size;
        let n_nodes = cfg.nodes.count;
        let height = cfg.nodes.height;

        let mut nodes = Vec::with_capacity(n_nodes);
        nodes.push(Node {
            role: Role::Source,
            pos: Position::new(0.0, 0.0, height),
        });
        for i_node in 1..n_nodes - 1 {
            let frac = i_node as f64 / (n_nodes - 1) as f64;
            nodes.push(Node {
                role: Role::Plain,
                pos: Position::new(frac * field, frac * field, height),
            });
        }
        nodes.push(Node {
            role: Role::Destination,
            pos: Position::new(field, field, height),
        });

        let anchors = cfg
            .layout
            .anchors
            .iter()
            .map(|&[x, y, z]| Position::new(x, y, z))
            .collect();

        let mut obstacles = Obstacles::new();
        for (i_obs, &[x_min, x_max, y_min, y_max, z_min, z_max]) in
            cfg.layout.obstacles.iter().enumerate()
        {
            let bounds = Bounds::new(x_min, x_max, y_min, y_max, z_min, z_max)
                .with_context(|| format!("invalid obstacle {i_obs}"))?;
            obstacles.create(bounds);
        }

        let mut pending = cfg.moves.clone();
        pending.sort_by(|a, b| a.time.total_cmp(&b.time));

        let scene = Scene {
            nodes,
            anchors,
            obstacles,
        };

        Ok(Self {
            cfg,
            scene,
            pending,
            i_next: 0,
            clock: 0.0,
            rng,
        })
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current scenario time.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Advance the scenario clock by one window.
    ///
    /// Steps the mobile nodes every tick and fires every relocation that
    /// comes due, in time order.
    pub fn advance_window(&mut self) -> Result<()> {
        let window = self.cfg.output.window;
        let tick = self.cfg.output.tick;
        let n_ticks = (window / tick).round() as usize;

        let walk = RandomWalk::new(self.cfg.field.size, self.cfg.nodes.speed, tick)?;

        for i_tick in 0..n_ticks {
            self.clock += tick;

            self.fire_due_relocations()
                .context("failed to fire due relocations")?;

            self.step_mobility(&walk);

            let progress = 100.0 * (i_tick + 1) as f64 / n_ticks as f64;
            log::info!("advanced to {:.1} s ({progress:06.2}%)", self.clock);
        }

        Ok(())
    }

    /// Map every node to its nearest anchor.
    pub fn compute_attachments(&self) -> Result<Vec<usize>> {
        let positions: Vec<_> = self.scene.nodes.iter().map(|node| node.pos).collect();
        attach::assign_nearest(&positions, &self.scene.anchors)
    }

    /// Render the current scene to the textual map artifact.
    pub fn render_map(&self) -> String {
        grid::render_map(
            &self.scene.nodes,
            self.scene.obstacles.bounds(),
            self.cfg.field.size,
            self.cfg.field.cell,
        )
    }

    /// Save a checkpoint of the entire engine state.
    ///
    /// Can be used to resume the scenario later.
    pub fn save_checkpoint<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);
        encode::write(&mut writer, &self).context("failed to serialize engine")?;
        Ok(())
    }

    /// Load a previously saved engine checkpoint.
    pub fn load_checkpoint<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let mut reader = BufReader::new(file);
        let engine = decode::from_read(&mut reader).context("failed to deserialize engine")?;
        Ok(engine)
    }

    fn fire_due_relocations(&mut self) -> Result<()> {
        while self.i_next < self.pending.len() && self.pending[self.i_next].time <= self.clock {
            let reloc = self.pending[self.i_next].clone();

            let bounds = resolve_relocation(&reloc, &self.scene.anchors, self.cfg.field.size)
                .context("failed to resolve relocation")?;

            self.scene
                .obstacles
                .set_boundaries(reloc.obstacle, bounds)
                .context("failed to apply relocation")?;

            log::info!(
                "obstacle {} moved to ({}, {})",
                reloc.obstacle,
                bounds.x_min(),
                bounds.y_min()
            );

            self.i_next += 1;
        }
        Ok(())
    }

    fn step_mobility(&mut self, walk: &RandomWalk) {
        for node in &mut self.scene.nodes {
            if node.role == Role::Plain {
                walk.step(&mut node.pos, &mut self.rng);
            }
        }
    }
}
