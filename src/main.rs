mod cli;

use clap::Parser;
use cta_ridership::config::Config;
use cta_ridership::error::{self, Result};
use cta_ridership::logging;
use log::info;
use std::path::Path;

/// Initialize simple console logging for init/completions commands
fn init_simple_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::opts::Cli::parse();

    match cli.command {
        Some(cli::opts::Commands::Init { output, force }) => {
            init_simple_logging(cli.verbose, cli.quiet);
            cli::init::handle_init(&output, force)
        }
        Some(cli::opts::Commands::Completions { shell }) => {
            cli::opts::Cli::generate_completions(shell);
            Ok(())
        }
        Some(cli::opts::Commands::Validate { config }) => {
            let cfg = prepare(&config, None, cli.verbose, cli.quiet)?;
            cli::validate::handle_validate(&cfg)
        }
        Some(cli::opts::Commands::Run { config, database }) => {
            let cfg = prepare(&config, database, cli.verbose, cli.quiet)?;
            cli::run::handle_run(&cfg)
        }
        None => {
            let cfg = prepare("config.toml", None, cli.verbose, cli.quiet)?;
            cli::run::handle_run(&cfg)
        }
    }
}

/// 加载并验证配置、应用命令行覆盖项、初始化日志
fn prepare(config_path: &str, database: Option<String>, verbose: bool, quiet: bool) -> Result<Config> {
    let mut cfg = load_config(config_path)?;

    if let Some(database) = database {
        cfg.database.path = database;
    }
    if verbose {
        cfg.logging.level = "debug".to_string();
    } else if quiet {
        cfg.logging.level = "error".to_string();
    }
    cfg.validate()?;

    logging::init_logging(&cfg.logging)?;
    info!("Application started");
    Ok(cfg)
}

fn load_config(config_path: &str) -> Result<Config> {
    let path = Path::new(config_path);
    match Config::from_file(path) {
        Ok(c) => {
            eprintln!("Loaded configuration file: {config_path}");
            Ok(c)
        }
        Err(e) => {
            if let error::Error::Config(error::ConfigError::NotFound(_)) = &e {
                eprintln!(
                    "Configuration file not found: {config_path}, using default configuration"
                );
                eprintln!("Tip: run 'cta-ridership init' to generate a configuration file");
                Ok(Config::default())
            } else {
                Err(e)
            }
        }
    }
}
