use anyhow::{anyhow, Context};
use clap::Parser;
use seqevolve::cli::CliArgs;
use seqevolve::config::ConfigManager;
use seqevolve::data::{Checkpoint, PopulationConnector};
use seqevolve::engines::generation::{EvolutionEngine, LogProgressCallback};
use seqevolve::engines::oracle::{CommandOracle, OracleAdapter};
use seqevolve::random::RandomContext;
use std::path::Path;

fn load_checkpoint(path: &Path) -> anyhow::Result<Checkpoint> {
    let file = if path.is_dir() {
        Checkpoint::latest_in(path)?
            .ok_or_else(|| anyhow!("no checkpoint found in {}", path.display()))?
    } else {
        path.to_path_buf()
    };
    log::info!("Resuming from {}", file.display());
    Ok(Checkpoint::load(&file)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();

    let mut manager = ConfigManager::new();
    manager.load_layered(args.config.as_ref())?;
    manager.update(|config| args.apply(config))?;
    let config = manager.get();

    let command = config
        .oracle
        .command
        .clone()
        .context("no oracle configured: set oracle.command or pass --oracle_command")?;
    let oracle = CommandOracle::new(command, &config.oracle.checkpoint, config.oracle.output_channels)
        .with_args(config.oracle.args.clone());
    let adapter = OracleAdapter::new(oracle, config.oracle.output_shape()?)
        .with_batch_size(config.oracle.batch_size);

    let mut engine = EvolutionEngine::new(
        config.engine_config()?,
        adapter,
        RandomContext::new(config.evolution.seed),
    )?;

    let outcome = match &args.resume {
        Some(path) => engine.resume(load_checkpoint(path)?, LogProgressCallback)?,
        None => {
            let initial = config
                .output
                .initial_population
                .as_ref()
                .map(|path| PopulationConnector::load(path))
                .transpose()?;
            engine.run(initial, LogProgressCallback)?
        }
    };

    outcome
        .history
        .export_csv(&config.output.output_file)
        .with_context(|| format!("writing {}", config.output.output_file.display()))?;

    log::info!("Top {} of the final population:", outcome.top.len());
    for (rank, individual) in outcome.top.iter().enumerate() {
        log::info!(
            "  #{:<2} {:.4}  {}",
            rank + 1,
            individual.fitness.unwrap_or(f64::NAN),
            individual.sequence_string()
        );
    }
    if let Some(best) = outcome.hall_of_fame.first() {
        log::info!(
            "Best sequence of the run: {:.4}  {}",
            best.fitness.unwrap_or(f64::NAN),
            best.sequence_string()
        );
    }

    Ok(())
}
