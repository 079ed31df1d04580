//! Config command - show, locate or change settings

use crate::{
    MicrotagError,
    cli::ConfigCommand,
    config::{self, MicrotagConfig},
    output::{self, OutputMode},
};

type Result<T> = std::result::Result<T, MicrotagError>;

/// Execute a config subcommand
///
/// # Errors
/// Returns an error if the config file location cannot be determined, the
/// key or value is invalid, or the file cannot be written
pub fn execute(settings: &MicrotagConfig, command: &ConfigCommand, mode: OutputMode) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            if mode.is_json() {
                output::print_json(settings)?;
            } else {
                let rendered = toml::to_string_pretty(settings)
                    .map_err(|e| MicrotagError::InvalidInput(format!("Failed to render config: {e}")))?;
                print!("{rendered}");
            }
        }
        ConfigCommand::Path => println!("{}", MicrotagConfig::config_path()?.display()),
        ConfigCommand::Set { key, value } => {
            let mut updated = settings.clone();
            updated.set(key, value).map_err(|e| match e {
                ::config::ConfigError::NotFound(key) => MicrotagError::InvalidInput(format!(
                    "Unknown config key '{key}' (expected one of: {})",
                    config::KEYS.join(", ")
                )),
                other => other.into(),
            })?;
            updated.save()?;
            if mode.is_verbose() {
                println!("Set {key} = {value}");
            }
        }
    }
    Ok(())
}
