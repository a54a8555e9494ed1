//! Command implementations. Each command exposes `run(&GlobalArgs, args)`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use hoverscope::{Engine, EngineHandle, HoverscopeConfig};
use is_terminal::IsTerminal;

pub mod annotate;
pub mod config;
pub mod list;
pub mod show;

/// Flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: <config dir>/hoverscope/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog files (overrides config and environment)
    #[arg(long, global = true, value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Effective configuration after file, environment and flag overrides.
    pub fn resolve_config(&self) -> Result<HoverscopeConfig, String> {
        let mut config = HoverscopeConfig::load(self.config.as_deref()).map_err(|e| e.to_string())?;
        if let Some(dir) = &self.catalog_dir {
            config.catalog_dir = dir.clone();
        }
        Ok(config)
    }

    /// Load the catalogs and build an engine.
    pub fn load_engine(&self) -> Result<Arc<Engine>, String> {
        let config = self.resolve_config()?;
        let handle = EngineHandle::empty();
        handle
            .refresh(&config.source())
            .map_err(|e| format!("Failed to load catalogs from {}: {}", config.catalog_dir.display(), e))
    }
}

/// Input text from `-t`, `-f`, positional words, or stdin, in that order.
pub fn get_input_text(
    text: &Option<String>,
    file: Option<&str>,
    positional: &[String],
) -> Result<String, String> {
    if let Some(t) = text {
        return Ok(t.clone());
    }

    if let Some(f) = file {
        return fs::read_to_string(f).map_err(|e| format!("Failed to read file: {}: {}", f, e));
    }

    if !positional.is_empty() {
        return Ok(positional.join(" "));
    }

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        if !buf.is_empty() {
            return Ok(buf);
        }
    }

    Err("No input text provided. Use -t 'text' or -f file or pipe via stdin".to_string())
}
