use clap::Parser;

use sg_cli::bootstrap;
use sg_cli::cli::{self, Cli, Command, ConfigCommand};
use sg_survey::Catalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match args.command {
        Command::Doctor => {
            let (config, config_path) = cli::load_config()?;
            bootstrap::init_tracing(&config.logging);
            let passed = cli::doctor::run(&config, &config_path)?;
            if !passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Validate) => {
            let (config, config_path) = cli::load_config()?;
            let valid = cli::config::validate(&config, &config_path);
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => {
            let (config, _config_path) = cli::load_config()?;
            cli::config::show(&config)
        }
        Command::Config(ConfigCommand::SetSecret) => {
            let (config, _config_path) = cli::load_config()?;
            bootstrap::init_tracing(&config.logging);
            cli::config::set_secret(&config)
        }
        Command::Version => {
            println!("strategos {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Register => {
            let mut rt = open_runtime()?;
            cli::vault::register(&mut rt.vault)
        }
        Command::Survey { section } => {
            let mut rt = open_runtime()?;
            bootstrap::unlock(&mut rt.vault)?;
            cli::survey::run(&mut rt.vault, &Catalog::standard(), section.as_deref())
        }
        Command::Answer { question_id, text } => {
            let mut rt = open_runtime()?;
            cli::vault::answer(&mut rt.vault, &Catalog::standard(), &question_id, &text.join(" "))
        }
        Command::Review => {
            let mut rt = open_runtime()?;
            cli::vault::review(&mut rt.vault, &Catalog::standard())
        }
        Command::Export { output } => {
            let mut rt = open_runtime()?;
            cli::vault::export(&mut rt.vault, output.as_deref())?;
            Ok(())
        }
        Command::Import { path } => {
            let mut rt = open_runtime()?;
            if !cli::vault::import(&mut rt.vault, &path)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Report { json, no_chat } => {
            let mut rt = open_runtime()?;
            if !cli::chat::report(&mut rt, &Catalog::standard(), json, no_chat).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Reset { yes } => {
            let mut rt = open_runtime()?;
            cli::vault::reset(&mut rt.vault, yes)?;
            Ok(())
        }
    }
}

/// Load config, start tracing, resolve the credential and open the vault.
fn open_runtime() -> anyhow::Result<bootstrap::Runtime> {
    let (config, _config_path) = cli::load_config()?;
    bootstrap::init_tracing(&config.logging);
    bootstrap::open(config)
}
