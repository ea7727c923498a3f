//! Markdown generation from a template tree.
//!
//! One generation run is a single synchronous pass: wipe and recreate the
//! output root, build a fresh engine, walk the template tree, and render
//! each template into its mirrored `.md` destination. Re-running is always
//! safe because nothing from a previous run survives the wipe.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write as _};
use std::path::{Path, PathBuf};

use docgen_markdown::escape_source;
use minijinja::{context, path_loader, Environment};

use crate::config::Config;
use crate::scanner::{output_path_for, Scanner};
use crate::terms::Terms;

/// Configuration for one generation run.
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    /// Root directory of the template tree.
    pub template_dir: PathBuf,
    /// Output root; wiped and recreated on every run.
    pub output_dir: PathBuf,
    /// Literal, case-sensitive template file suffix.
    pub template_ext: String,
    /// Version string injected as the `program_version` term.
    pub program_version: String,
    /// Extra term entries merged over the built-in defaults.
    pub extra_terms: BTreeMap<String, String>,
}

impl GenerateConfig {
    /// Build a run configuration from loaded application config.
    #[must_use]
    pub fn from_config(config: &Config, program_version: &str) -> Self {
        Self {
            template_dir: config.docs_resolved.template_dir.clone(),
            output_dir: config.docs_resolved.output_dir.clone(),
            template_ext: config.docs_resolved.template_ext.clone(),
            program_version: program_version.to_owned(),
            extra_terms: config.terms.clone(),
        }
    }
}

/// One successfully generated file.
#[derive(Clone, Debug)]
pub struct GeneratedFile {
    /// Template name relative to the template root.
    pub template: String,
    /// Path of the written markdown file.
    pub output: PathBuf,
}

/// A template that failed to resolve or render.
#[derive(Debug)]
pub struct TemplateFailure {
    /// Template name relative to the template root.
    pub template: String,
    /// Underlying engine error.
    pub error: minijinja::Error,
}

/// Outcome of a generation run.
///
/// Template lookup and render failures are collected here instead of
/// aborting the run, so one invocation reports every broken template.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Files generated, in walk order.
    pub generated: Vec<GeneratedFile>,
    /// Per-template failures, in walk order.
    pub failures: Vec<TemplateFailure>,
}

/// Fatal filesystem error aborting a run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Output root could not be wiped and recreated.
    #[error("Failed to reset output directory {}: {source}", path.display())]
    ResetOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Parent directory for an output file could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Output file could not be opened or written.
    #[error("Failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Renders every template under the template root into the output tree.
pub struct Generator {
    config: GenerateConfig,
}

impl Generator {
    #[must_use]
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    /// Run a full generation pass.
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal filesystem failures; per-template
    /// errors are collected into the report.
    pub fn generate(&self) -> Result<GenerateReport, GenerateError> {
        self.generate_with_progress(|_, _| {})
    }

    /// Run a full generation pass, invoking `progress` once per written file
    /// with the template name and the output path.
    pub fn generate_with_progress<F>(
        &self,
        mut progress: F,
    ) -> Result<GenerateReport, GenerateError>
    where
        F: FnMut(&str, &Path),
    {
        self.reset_output_dir()?;

        let terms = Terms::with_extra(&self.config.program_version, &self.config.extra_terms);
        let env = self.build_environment(&terms);

        let scanner = Scanner::new(
            self.config.template_dir.clone(),
            self.config.template_ext.clone(),
        );
        let templates = scanner.scan();
        if templates.is_empty() {
            tracing::warn!(
                path = %self.config.template_dir.display(),
                "No templates found"
            );
        }

        let mut report = GenerateReport::default();
        for template in templates {
            let output = output_path_for(
                &self.config.output_dir,
                &template.name,
                &self.config.template_ext,
            );

            // Resolve and compile before touching the filesystem so a missing
            // or syntactically broken template never leaves an empty output
            // file behind.
            let compiled = match env.get_template(&template.name) {
                Ok(compiled) => compiled,
                Err(error) => {
                    tracing::warn!(template = %template.name, error = %error, "Template lookup failed");
                    report.failures.push(TemplateFailure {
                        template: template.name,
                        error,
                    });
                    continue;
                }
            };

            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent).map_err(|source| GenerateError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&output)
                .map_err(|source| GenerateError::WriteFile {
                    path: output.clone(),
                    source,
                })?;
            let mut writer = BufWriter::new(file);

            if let Err(error) = compiled.render_to_write(context! {}, &mut writer) {
                tracing::warn!(template = %template.name, error = %error, "Render failed");
                // Drop the partial file; the failure is reported instead.
                drop(writer);
                let _ = fs::remove_file(&output);
                report.failures.push(TemplateFailure {
                    template: template.name,
                    error,
                });
                continue;
            }
            writer.flush().map_err(|source| GenerateError::WriteFile {
                path: output.clone(),
                source,
            })?;

            tracing::info!(
                template = %template.name,
                source = %template.path.display(),
                output = %output.display(),
                "Generated markdown"
            );
            progress(&template.name, &output);
            report.generated.push(GeneratedFile {
                template: template.name,
                output,
            });
        }

        Ok(report)
    }

    /// Recursively delete the output root if present and recreate it empty.
    fn reset_output_dir(&self) -> Result<(), GenerateError> {
        let path = &self.config.output_dir;
        match fs::remove_dir_all(path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(GenerateError::ResetOutputDir {
                    path: path.clone(),
                    source,
                });
            }
        }
        fs::create_dir_all(path).map_err(|source| GenerateError::ResetOutputDir {
            path: path.clone(),
            source,
        })
    }

    /// Build the per-run engine.
    ///
    /// Template sources are loaded as UTF-8 from the template root with
    /// their static text pre-escaped, terms are visible to every template
    /// as globals, and markdown is the only active escaping mode. The
    /// environment lives for one run; nothing is shared across runs.
    fn build_environment(&self, terms: &Terms) -> Environment<'static> {
        let mut env = Environment::new();
        // Sources end with a newline; the generated files keep it.
        env.set_keep_trailing_newline(true);
        let loader = path_loader(&self.config.template_dir);
        env.set_loader(move |name| Ok(loader(name)?.map(|source| escape_source(&source))));
        docgen_markdown::install(&mut env);
        for (key, value) in terms.iter() {
            env.add_global(key.to_owned(), value.to_owned());
        }
        env
    }
}
