//! `docgen generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use docgen_core::{CliSettings, Config, GenerateConfig, Generator};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Template source directory (overrides config).
    #[arg(short, long)]
    template_dir: Option<PathBuf>,

    /// Output directory for generated markdown (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover docgen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl GenerateArgs {
    pub(crate) fn execute(self, program_version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            template_dir: self.template_dir.clone(),
            output_dir: self.output_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Templates: {}",
            config.docs_resolved.template_dir.display()
        ));
        output.info(&format!(
            "Output: {}",
            config.docs_resolved.output_dir.display()
        ));

        let generator = Generator::new(GenerateConfig::from_config(&config, program_version));
        let report = generator.generate_with_progress(|template, out_path| {
            output.progress(&format!("{template} -> {}", out_path.display()));
        })?;

        if report.failures.is_empty() {
            output.success(&format!("Generated {} file(s)", report.generated.len()));
            return Ok(());
        }

        for failure in &report.failures {
            output.error(&format!("{}: {}", failure.template, failure.error));
        }
        Err(CliError::Failures {
            count: report.failures.len(),
        })
    }
}
