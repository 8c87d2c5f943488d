//! Validation command for toggle sheets.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::cli::generate::SourceArgs;
use crate::services::{page_count, EntryCheck, GenerationError, ToggleGenerator};
use clap::Args;
use serde::Serialize;

/// Check a toggle sheet against a scene without generating anything
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// A single finding.
#[derive(Debug, Clone, Serialize)]
struct ValidationMessage {
    severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    message: String,
}

/// JSON response for `validate --json`.
#[derive(Debug, Clone, Serialize)]
struct ValidationResponse {
    valid: bool,
    slots: usize,
    pages: usize,
    entries: Vec<EntryCheck>,
    messages: Vec<ValidationMessage>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let (config, scene, request) = self.source.load()?;
        let generator = ToggleGenerator::new(&scene, &config.generation_options());

        let mut messages = Vec::new();
        let entries = match generator.preflight(&request) {
            Ok(entries) => entries,
            Err(e) => {
                messages.push(ValidationMessage {
                    severity: "error",
                    index: None,
                    message: e.to_string(),
                });
                Vec::new()
            }
        };

        for check in &entries {
            if let (Some(first), Some(target)) = (check.duplicate_of, &check.target) {
                // both entries write the same clip files; the later one wins
                messages.push(ValidationMessage {
                    severity: "warning",
                    index: Some(check.index),
                    message: format!(
                        "'{target}' shares its name with entry {first}; its clips will replace {target}_On and {target}_Off"
                    ),
                });
            }

            let Some(error) = &check.error else { continue };
            // empty slots are skipped by generation, so they only warn
            let severity = if matches!(error, GenerationError::InvalidTarget { .. }) {
                "warning"
            } else {
                "error"
            };
            messages.push(ValidationMessage {
                severity,
                index: Some(check.index),
                message: error.to_string(),
            });
        }

        let response = ValidationResponse {
            valid: !messages.iter().any(|m| m.severity == "error"),
            slots: request.slot_count(),
            pages: page_count(request.slot_count(), config.generation.page_capacity),
            entries,
            messages,
        };

        if self.json {
            print_json(&response)?;
        } else {
            print_human_readable(&response);
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !response.messages.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

fn print_human_readable(response: &ValidationResponse) {
    if response.valid {
        println!("✓ Validation passed");
    } else {
        println!("✗ Validation failed");
    }

    println!("\n{} slot(s), {} menu page(s)", response.slots, response.pages);
    for check in &response.entries {
        if let (Some(target), Some(path)) = (&check.target, &check.owner_path) {
            println!("  [{}] {} -> {}", check.index, target, path);
        }
    }

    if !response.messages.is_empty() {
        println!("\nIssues:");
        for msg in &response.messages {
            let prefix = if msg.severity == "error" { "  ✗" } else { "  ⚠" };
            match msg.index {
                Some(index) => println!("{prefix} [{index}] {}", msg.message),
                None => println!("{prefix} {}", msg.message),
            }
        }
    }
}
