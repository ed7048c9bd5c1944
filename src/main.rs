//! CLI entry point for switch-critique.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use switch_critique::cli::{Cli, Command, OutputFormat};
use switch_critique::config::BindingsConfig;
use switch_critique::dispatch::{Sink, switch_dispatch};
use switch_critique::event::KeyEvent;
use switch_critique::is_anagram;
use switch_critique::listener::{Listener, ScriptedSource, TerminalSource};
use switch_critique::logging::init_logging;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "switch-critique", &mut std::io::stdout());
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Listening always logs; one-shot commands only when asked to.
    let _guard = (matches!(command, Command::Listen) || cli.log_file.is_some())
        .then(|| init_logging(cli.log_file.as_deref(), Some(&cli.log_level)));

    let config_path = cli.config.as_deref();

    match command {
        Command::Listen => listen(config_path),
        Command::Dispatch { codes, switch } => {
            let events = codes.into_iter().map(KeyEvent::from);
            if switch {
                for event in events {
                    if let Some(message) = switch_dispatch(&event) {
                        println!("{message}");
                    }
                }
                return Ok(());
            }

            let config = load_config(config_path)?;
            let table = config.action_table(Arc::new(|message: &str| println!("{message}")));
            let mut handle = Listener::register(ScriptedSource::new(events), table);
            let count = handle.run().wrap_err("Dispatch failed")?;
            info!(count, "dispatched key codes");
            Ok(())
        }
        Command::Anagram { left, right } => {
            println!("{}", is_anagram(&left, &right));
            Ok(())
        }
        Command::Bindings { format } => {
            let config = load_config(config_path)?;
            let effective = BindingsConfig {
                quit_key: config.quit_key,
                bindings: config.sorted_bindings(),
            };
            let output = match format {
                OutputFormat::Yaml => serde_yaml::to_string(&effective)
                    .wrap_err("Failed to serialize bindings to YAML")?,
                OutputFormat::Json => {
                    let mut json = serde_json::to_string_pretty(&effective)
                        .wrap_err("Failed to serialize bindings to JSON")?;
                    json.push('\n');
                    json
                }
            };
            print!("{output}");
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<BindingsConfig> {
    BindingsConfig::load(path).wrap_err("Failed to load key bindings")
}

fn listen(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    // Raw mode disables output post-processing, so lines end in \r\n.
    let sink: Sink = Arc::new(|message: &str| {
        info!(action = message, "key action");
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "{message}\r\n");
        let _ = stdout.flush();
    });
    let table = config.action_table(sink);

    eprintln!(
        "Listening for {} bindings; press key code {} to quit",
        table.len(),
        config.quit_key
    );

    let source = TerminalSource::open().wrap_err("Failed to enter raw mode")?;
    let mut handle = Listener::register(source, table).quit_on(config.quit_key);
    let result = handle.run();
    // Restores the terminal before anything else is printed.
    drop(handle.detach());

    let count = result.wrap_err("Listener failed")?;
    eprintln!("Dispatched {count} key presses");
    Ok(())
}
