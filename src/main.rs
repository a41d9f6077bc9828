use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playfield::manager::Manager;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    scenario_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Create,

    Advance {
        #[arg(long)]
        run_idx: usize,
    },

    Attach {
        #[arg(long)]
        run_idx: usize,
    },

    Render {
        #[arg(long)]
        run_idx: usize,
    },

    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.scenario_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Create => mgr.create_run()?,
        Command::Advance { run_idx } => mgr.advance_run(run_idx)?,
        Command::Attach { run_idx } => mgr.attach_run(run_idx)?,
        Command::Render { run_idx } => mgr.render_run(run_idx)?,
        Command::Clean => mgr.clean_sim()?,
    }

    Ok(())
}
