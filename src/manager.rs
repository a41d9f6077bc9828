use crate::config::Config;
use crate::engine::Engine;
use anyhow::{Context, Result, bail};
use glob::glob;
use std::{
    fs,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub struct Manager {
    scenario_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(scenario_dir: P) -> Result<Self> {
        let scenario_dir = scenario_dir.as_ref().to_path_buf();

        let cfg = Config::from_file(scenario_dir.join("config.toml"))
            .context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { scenario_dir, cfg })
    }

    pub fn create_run(&self) -> Result<()> {
        let run_idx = self.count_run_dirs().context("failed to count run dirs")?;

        let run_dir = self.run_dir(run_idx);
        fs::create_dir_all(&run_dir).with_context(|| format!("failed to create {run_dir:?}"))?;
        log::info!("created {run_dir:?}");

        let engine = Engine::generate_initial_layout(self.cfg.clone())
            .context("failed to generate initial layout")?;

        self.write_grid(run_idx, &engine)?;

        engine
            .save_checkpoint(self.checkpoint_file(run_idx))
            .context("failed to save checkpoint")?;

        Ok(())
    }

    pub fn advance_run(&self, run_idx: usize) -> Result<()> {
        let mut engine = self.load_engine(run_idx)?;

        engine
            .advance_window()
            .context("failed to advance scenario")?;

        self.write_grid(run_idx, &engine)?;

        engine
            .save_checkpoint(self.checkpoint_file(run_idx))
            .context("failed to save checkpoint")?;

        Ok(())
    }

    pub fn attach_run(&self, run_idx: usize) -> Result<()> {
        let engine = self.load_engine(run_idx)?;

        let assignment = engine
            .compute_attachments()
            .context("failed to compute attachments")?;

        let file = self.attachments_file(run_idx);
        let file = File::create(&file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "Attachments (node -> nearest anchor):")?;
        for (i_node, &i_anchor) in assignment.iter().enumerate() {
            let node = &engine.scene().nodes[i_node];
            let anchor = &engine.scene().anchors[i_anchor];
            let dist = node.pos.plane_dist2(anchor).sqrt();
            writeln!(writer, " - node {i_node} -> anchor {i_anchor} ({dist:.2} m)")?;
        }
        writer.flush().context("failed to flush writer stream")?;

        Ok(())
    }

    pub fn render_run(&self, run_idx: usize) -> Result<()> {
        let engine = self.load_engine(run_idx)?;
        self.write_grid(run_idx, &engine)
    }

    pub fn clean_sim(&self) -> Result<()> {
        let pattern = self.scenario_dir.join("run-*");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        for entry in glob(pattern).context("failed to glob run dirs")? {
            let path = entry.context("failed to read glob entry")?;
            if path.is_dir() {
                fs::remove_dir_all(&path).with_context(|| format!("failed to remove {path:?}"))?;
                log::info!("removed {path:?}");
            }
        }
        Ok(())
    }

    fn load_engine(&self, run_idx: usize) -> Result<Engine> {
        let checkpoint_file = self.checkpoint_file(run_idx);
        let engine = Engine::load_checkpoint(&checkpoint_file)
            .with_context(|| format!("failed to load {checkpoint_file:?}"))?;
        if engine.cfg() != &self.cfg {
            bail!("checkpoint config differs from the current config");
        }
        log::info!("loaded {checkpoint_file:?}");
        Ok(engine)
    }

    fn write_grid(&self, run_idx: usize, engine: &Engine) -> Result<()> {
        let grid_idx = self
            .count_grid_files(run_idx)
            .context("failed to count grid files")?;
        let grid_file = self.grid_file(run_idx, grid_idx);
        fs::write(&grid_file, engine.render_map())
            .with_context(|| format!("failed to write {grid_file:?}"))?;
        log::info!("wrote {grid_file:?}");
        Ok(())
    }

    fn count_run_dirs(&self) -> Result<usize> {
        let pattern = self.scenario_dir.join("run-*");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let count = glob(pattern)
            .context("failed to glob run dirs")?
            .filter_map(Result::ok)
            .filter(|p| p.is_dir())
            .count();
        Ok(count)
    }

    fn count_grid_files(&self, run_idx: usize) -> Result<usize> {
        let pattern = self.run_dir(run_idx).join("grid-*.txt");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let count = glob(pattern)
            .context("failed to glob grid files")?
            .filter_map(Result::ok)
            .count();
        Ok(count)
    }

    fn run_dir(&self, run_idx: usize) -> PathBuf {
        self.scenario_dir.join(format!("run-{run_idx:04}"))
    }

    fn checkpoint_file(&self, run_idx: usize) -> PathBuf {
        self.run_dir(run_idx).join("checkpoint.msgpack")
    }

    fn grid_file(&self, run_idx: usize, grid_idx: usize) -> PathBuf {
        self.run_dir(run_idx).join(format!("grid-{grid_idx:04}.txt"))
    }

    fn attachments_file(&self, run_idx: usize) -> PathBuf {
        self.run_dir(run_idx).join("attachments.txt")
    }
}
