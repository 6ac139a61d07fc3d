use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use prettytable::{cell, row, Table};
use seg_dl::{
    config::Config,
    dataset::{registry, ADE20K_DIR_NAME, ADE20K_URL},
    download::{Fetcher, HttpFetcher},
    env::data_home,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
/// Inspect and fetch semantic segmentation datasets
enum Opts {
    /// Print the summary of a configured dataset
    Info {
        /// configuration file
        config_file: PathBuf,
    },
    /// Load one sample and print its shapes
    Inspect {
        /// configuration file
        config_file: PathBuf,
        /// sample index
        index: usize,
    },
    /// Download and extract the ADE20K archive
    Fetch {
        /// target directory, defaults to $SEG_HOME/dataset
        #[clap(long)]
        dir: Option<PathBuf>,
    },
    /// List the registered dataset names
    List,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    match Opts::parse() {
        Opts::Info { config_file } => {
            info(config_file)?;
        }
        Opts::Inspect { config_file, index } => {
            inspect(config_file, index)?;
        }
        Opts::Fetch { dir } => {
            fetch(dir)?;
        }
        Opts::List => {
            list()?;
        }
    }

    Ok(())
}

fn load_config(config_file: impl AsRef<Path>) -> Result<Config> {
    let config_file = config_file.as_ref();
    Config::open(config_file)
        .with_context(|| format!("failed to load config file '{}'", config_file.display()))
}

fn info(config_file: impl AsRef<Path>) -> Result<()> {
    let config = load_config(config_file)?;
    let dataset = config.dataset.build()?;

    let mut table = Table::new();
    table.add_row(row!["name", "mode", "root", "records", "classes", "ignore index"]);
    table.add_row(row![
        config.dataset.name,
        dataset.mode(),
        config
            .dataset
            .dataset_root
            .as_ref()
            .map(|root| format!("{}", root.display()))
            .unwrap_or_else(|| "(downloaded)".to_owned()),
        dataset.num_records(),
        dataset.num_classes(),
        dataset.ignore_index(),
    ]);
    table.printstd();

    Ok(())
}

fn inspect(config_file: impl AsRef<Path>, index: usize) -> Result<()> {
    let config = load_config(config_file)?;
    let dataset = config.dataset.build()?;
    let record = dataset.nth(index)?;
    let ignore_index = dataset.ignore_index();
    let num_ignored = record
        .label_values()
        .filter(|&value| value == ignore_index)
        .count();

    let mut table = Table::new();
    table.add_row(row!["index", "image shape", "label shape", "info", "ignored pixels"]);
    table.add_row(row![
        index,
        format!("{:?}", record.image_shape()),
        format!("{:?}", record.label_shape()),
        record
            .info()
            .map(|info| format!("{:?}", info))
            .unwrap_or_default(),
        num_ignored,
    ]);
    table.printstd();

    Ok(())
}

fn fetch(dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => data_home()?,
    };
    info!("fetching ADE20K into '{}'", dir.display());
    let path = HttpFetcher.fetch(ADE20K_URL, &dir, &dir, ADE20K_DIR_NAME)?;
    println!("{}", path.display());
    Ok(())
}

fn list() -> Result<()> {
    let registry = registry()?
        .read()
        .map_err(|_| anyhow::format_err!("the dataset registry is poisoned"))?;
    registry.names().for_each(|name| println!("{}", name));
    Ok(())
}
