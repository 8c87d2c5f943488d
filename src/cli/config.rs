//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default clip destination folder
    #[arg(long, value_name = "DIR")]
    clip_folder: Option<PathBuf>,

    /// Default menu destination folder
    #[arg(long, value_name = "DIR")]
    menu_folder: Option<PathBuf>,

    /// Menu page name prefix
    #[arg(long, value_name = "NAME")]
    menu_prefix: Option<String>,

    /// Controls per menu page
    #[arg(long, value_name = "N")]
    page_capacity: Option<usize>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.clip_folder.is_none()
            && self.menu_folder.is_none()
            && self.menu_prefix.is_none()
            && self.page_capacity.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --clip-folder, --menu-folder, --menu-prefix, or --page-capacity",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(path) = &self.clip_folder {
            config.paths.clip_folder = Some(path.clone());
        }
        if let Some(path) = &self.menu_folder {
            config.paths.menu_folder = Some(path.clone());
        }
        if let Some(prefix) = &self.menu_prefix {
            config.generation.menu_prefix.clone_from(prefix);
        }
        if let Some(capacity) = self.page_capacity {
            config.generation.page_capacity = capacity;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(e.to_string()))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn output_human_readable(config: &Config) {
    let show = |p: &Option<PathBuf>| {
        p.as_ref()
            .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
    };

    println!("Paths:");
    println!("  Clip folder:   {}", show(&config.paths.clip_folder));
    println!("  Menu folder:   {}", show(&config.paths.menu_folder));
    println!("Generation:");
    println!("  Menu prefix:   {}", config.generation.menu_prefix);
    println!("  Page capacity: {}", config.generation.page_capacity);

    if let Ok(path) = Config::config_file_path() {
        println!("\nConfig file: {}", path.display());
    }
}
