//! Generate command for toggle layers, clips and menu pages.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::{GenerationRequest, SceneGraph};
use crate::services::{DocumentService, EntryOutcome, GenerationReport, ToggleGenerator};
use crate::store::FsAssetStore;
use clap::Args;
use std::path::{Path, PathBuf};

/// Inputs shared by `generate` and `validate`.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Scene tree as JSON
    #[arg(short, long, value_name = "FILE")]
    pub scene: PathBuf,

    /// Toggle sheet as TOML
    #[arg(short, long, value_name = "FILE")]
    pub toggles: PathBuf,

    /// Clip destination folder (overrides the sheet and config)
    #[arg(long, value_name = "DIR")]
    pub clip_dir: Option<PathBuf>,

    /// Menu destination folder (overrides the sheet and config)
    #[arg(long, value_name = "DIR")]
    pub menu_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Loads config, scene and toggle sheet and builds the request.
    ///
    /// Destination folders come from the flags first, then the sheet, then
    /// the config file.
    pub fn load(&self) -> CliResult<(Config, SceneGraph, GenerationRequest)> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let scene = DocumentService::load_scene(&self.scene)
            .map_err(|e| CliError::io(format!("Failed to load scene: {e:#}")))?;
        let sheet = DocumentService::load_toggle_sheet(&self.toggles)
            .map_err(|e| CliError::io(format!("Failed to load toggle sheet: {e:#}")))?;

        let mut request = sheet.resolve(&scene);
        request.clip_folder = self
            .clip_dir
            .clone()
            .or(request.clip_folder)
            .or_else(|| config.paths.clip_folder.clone());
        request.menu_folder = self
            .menu_dir
            .clone()
            .or(request.menu_folder)
            .or_else(|| config.paths.menu_folder.clone());

        Ok((config, scene, request))
    }
}

/// Generate toggle layers, clips and menu pages for a scene
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Animation controller JSON, created if missing and updated in place
    #[arg(short, long, value_name = "FILE")]
    pub controller: PathBuf,

    /// Exposed parameter list JSON, created if missing and updated in place
    #[arg(short, long, value_name = "FILE")]
    pub parameters: PathBuf,

    /// Base directory for relative destination folders
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let (config, scene, request) = self.source.load()?;

        let mut controller = DocumentService::load_controller_or_new(&self.controller)
            .map_err(|e| CliError::io(format!("Failed to load controller: {e:#}")))?;
        let mut exposed = DocumentService::load_exposed_or_new(&self.parameters)
            .map_err(|e| CliError::io(format!("Failed to load parameter list: {e:#}")))?;

        let mut store = FsAssetStore::new(self.base_dir.clone().unwrap_or_default());
        let generator = ToggleGenerator::new(&scene, &config.generation_options());

        let report = generator
            .generate(&request, &mut controller, &mut exposed, &mut store)
            .map_err(|e| {
                if e.is_structural() {
                    CliError::validation(e.to_string())
                } else {
                    CliError::io(e.to_string())
                }
            })?;

        DocumentService::save_controller(&controller, &self.controller)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        DocumentService::save_exposed(&exposed, &self.parameters)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        if self.json {
            print_json(&report)?;
        } else {
            print_report(&report, &self.controller, &self.parameters);
        }

        let failed = report.failures().count();
        if failed > 0 {
            return Err(CliError::validation(format!(
                "{failed} toggle(s) failed to generate"
            )));
        }

        Ok(())
    }
}

fn print_report(report: &GenerationReport, controller: &Path, parameters: &Path) {
    for outcome in &report.outcomes {
        match outcome {
            EntryOutcome::Generated {
                index,
                target,
                parameter,
                page,
                ..
            } => println!("✓ [{index}] {target} -> {parameter} (page {page})"),
            EntryOutcome::Skipped { index } => println!("- [{index}] empty slot, skipped"),
            EntryOutcome::Failed {
                index,
                target,
                error,
            } => println!("✗ [{index}] {target}: {error}"),
        }
    }

    println!();
    println!(
        "Generated {} toggle(s), {} skipped, {} menu page(s)",
        report.generated_count(),
        report.skipped_count(),
        report.pages.len()
    );
    println!(
        "Parameters added: {} controller, {} exposed ({} already present)",
        report.controller_parameters_added,
        report.exposed_parameters_added,
        report.parameters_existing
    );
    if !report.overwritten_clips.is_empty() {
        println!(
            "⚠ Same-named targets replaced clips: {}",
            report.overwritten_clips.join(", ")
        );
    }
    println!("Controller: {}", controller.display());
    println!("Parameters: {}", parameters.display());
}
