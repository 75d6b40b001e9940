pub mod check;
pub mod checks;
pub mod cli;
pub mod error;
pub mod identifier;
pub mod io_utils;
pub mod keys;
pub mod model;
pub mod report;
pub mod rules;
pub mod scanner;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands, RulesArgs};
use crate::rules::RuleSet;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_compat", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => check::execute(&args),
        Commands::Rules(args) => handle_rules(&args),
    }
}

fn handle_rules(args: &RulesArgs) -> Result<()> {
    let rules = match &args.rules {
        Some(path) => RuleSet::load(path)?,
        None => RuleSet::default(),
    };
    match &args.output {
        Some(path) => {
            rules.save(path)?;
            info!("Rule set written to {path:?}");
        }
        None => print!("{}", rules.to_yaml()?),
    }
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
