use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use reducegen::replay::{parse_script, replay, ReplayOp};
use reducegen::reducer::UnknownActionPolicy;
use reducegen::config::Config;
use reducegen::{ActionFactory, Store};

#[derive(Parser, Debug)]
#[command(name = "reducegen", version, about = "Generated actions and reducers over JSON state")]
struct Cli {
    /// Config file (default: ~/.config/reducegen/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a JSON-lines script of operations to an initial state
    Replay {
        /// JSON file holding the initial state (default: {})
        #[arg(long)]
        state: Option<PathBuf>,
        /// JSON-lines file of operations
        #[arg(long)]
        ops: PathBuf,
        /// Fail on action types no reducer recognizes
        #[arg(long)]
        strict: bool,
    },
    /// Print the registered transitions. Without --ops only the configured
    /// init actions are registered
    Describe {
        /// JSON-lines file of operations to replay first, registering the
        /// transitions of every creator they call
        #[arg(long)]
        ops: Option<PathBuf>,
    },
}

fn main() {
    reducegen::logging::init_tracing();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading config")?;

    match cli.command {
        Command::Replay { state, ops, strict } => {
            if strict {
                config.dispatch.policy = UnknownActionPolicy::Strict;
            }
            let initial = match state {
                Some(path) => read_json(&path)?,
                None => Value::Object(Default::default()),
            };
            let ops = read_ops(&ops)?;
            let (store, factory) = build(&config, initial)?;
            let final_state = replay(&store, &factory, &ops)?;
            println!("{}", serde_json::to_string_pretty(&final_state)?);
        }
        Command::Describe { ops } => {
            let (store, factory) = build(&config, Value::Object(Default::default()))?;
            if let Some(path) = ops {
                replay(&store, &factory, &read_ops(&path)?)?;
            }
            let entries: serde_json::Map<String, Value> = store
                .reducer()
                .registry()
                .describe()
                .into_iter()
                .map(|(id, summary)| Ok((id, serde_json::to_value(summary)?)))
                .collect::<Result<_, serde_json::Error>>()?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

fn build(config: &Config, initial: Value) -> Result<(Store, ActionFactory)> {
    let registry = config.build_registry();
    let reducer = config.build_reducer(initial, registry.clone());
    let store = Store::with_init_action(reducer.into(), config.store_init_action())?;
    Ok((store, ActionFactory::new(registry)))
}

fn read_ops(path: &Path) -> Result<Vec<ReplayOp>> {
    let script = fs::read_to_string(path)
        .with_context(|| format!("reading ops file '{}'", path.display()))?;
    parse_script(&script).map_err(|(line, e)| anyhow!("ops line {}: {}", line, e))
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading state file '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing state file '{}'", path.display()))
}
