//! Config command - inspect configuration

use clap::{Parser, Subcommand};
use hoverscope::HoverscopeConfig;

use super::GlobalArgs;

/// Inspect configuration
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Action to perform (default: show)
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file location
    Path,
}

pub fn run(global: &GlobalArgs, args: ConfigArgs) -> Result<(), String> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let config = global.resolve_config()?;
            let text = config.to_toml_string().map_err(|e| e.to_string())?;
            print!("{}", text);
        }
        ConfigAction::Path => {
            let path = match &global.config {
                Some(path) => path.clone(),
                None => HoverscopeConfig::default_path()
                    .ok_or_else(|| "No config directory on this platform".to_string())?,
            };
            let state = if path.is_file() { "" } else { " (not found)" };
            println!("{}{}", path.display(), state);
        }
    }
    Ok(())
}
