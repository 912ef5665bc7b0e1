use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::load_config;
use crate::data::load_dataset;
use crate::layout::{compute_dual_layout, SortOrder};
use crate::layout_dump::write_layout_dump;

#[derive(Parser, Debug)]
#[command(
    name = "chordl",
    version,
    about = "Dual chord-diagram layout for department collaboration data"
)]
pub struct Args {
    /// Departments CSV (department,faculty)
    #[arg(short = 'd', long = "departments")]
    pub departments: PathBuf,

    /// Research links CSV (department1,department2,links)
    #[arg(short = 'r', long = "research")]
    pub research: PathBuf,

    /// Teaching links CSV (department1,department2,links)
    #[arg(short = 't', long = "teaching")]
    pub teaching: PathBuf,

    /// Arc sort order: department, faculty, links or emphasis
    #[arg(short = 's', long = "order", default_value = "department")]
    pub order: String,

    /// Config JSON file overriding layout knobs
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// Canvas height. Defaults to 0.7 times the width.
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Output JSON file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let order: SortOrder = args.order.parse().map_err(anyhow::Error::msg)?;
    let height = args.height.unwrap_or(args.width * 0.7);

    let dataset = load_dataset(&args.departments, &args.research, &args.teaching)?;
    let layout = compute_dual_layout(&dataset, order, args.width, height, &config)?;
    write_layout_dump(args.output.as_deref(), &layout, &dataset)?;
    Ok(())
}
