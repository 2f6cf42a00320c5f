//! CLI: JSON configuration → typed accessors (rust | csharp), or a dump of the records
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info};

use crate::options::{CollisionPolicy, GeneratorOptions, NullPolicy, Target};
use crate::render::rust::to_snake_case;

/// File looked up when an input is a directory.
pub const DEFAULT_INPUT_FILE: &str = "appsettings.json";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate strongly-typed configuration accessors from JSON settings files
#[derive(Parser, Debug)]
#[command(name = "json-settings-gen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// more logging (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// no logging
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate accessor source code
    Generate(GenerateOut),
    /// print the emitted declaration records and diagnostics as JSON
    Inspect(InspectOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to the object to treat as the root (e.g. /Production)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. Literal paths, quoted glob patterns, or directories
    /// (which resolve to their appsettings.json)
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OptionSettings {
    /// JSON options file; flags below override it
    #[arg(long)]
    options: Option<PathBuf>,

    /// output language
    #[arg(long, value_enum)]
    target: Option<Target>,

    /// namespace (C#) or module (Rust) wrapping the generated types
    #[arg(long)]
    namespace: Option<String>,

    /// name of the root type
    #[arg(long)]
    root_type: Option<String>,

    /// same-level identifier clashes
    #[arg(long, value_enum)]
    collisions: Option<CollisionPolicy>,

    /// null leaves
    #[arg(long, value_enum)]
    null_values: Option<NullPolicy>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    option_settings: OptionSettings,

    /// output file (stdout if omitted); single input only
    #[arg(short, long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// output directory, one file per input named after the input
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct InspectOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    option_settings: OptionSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// One parsed input document.
struct Document {
    source: PathBuf,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        source_paths
            .into_iter()
            .map(|source| {
                let text = std::fs::read_to_string(&source)
                    .with_context(|| format!("failed to read {}", source.display()))?;
                let value = serde_json::from_str::<Value>(&text)
                    .with_context(|| format!("failed to parse JSON source file {}", source.display()))?;
                let value = match self.json_pointer.as_deref() {
                    None => value,
                    Some(pointer) => value.pointer(pointer).cloned().ok_or_else(|| {
                        anyhow!("JSON pointer {pointer} matches nothing in {}", source.display())
                    })?,
                };
                debug!(source = %source.display(), "loaded input");
                Ok(Document { source, value })
            })
            .collect()
    }
}

impl OptionSettings {
    fn resolve(&self) -> Result<GeneratorOptions> {
        let mut options = match &self.options {
            Some(path) => GeneratorOptions::load(path)?,
            None => GeneratorOptions::default(),
        };
        if let Some(target) = self.target {
            options.target = target;
        }
        if let Some(namespace) = &self.namespace {
            options.namespace = namespace.clone();
        }
        if let Some(root_type) = &self.root_type {
            options.root_type = root_type.clone();
        }
        if let Some(collisions) = self.collisions {
            options.collisions = collisions;
        }
        if let Some(null_values) = self.null_values {
            options.null_values = null_values;
        }
        Ok(options)
    }
}

impl Document {
    fn render(&self, options: &GeneratorOptions) -> Result<String> {
        let generation = crate::generate_value(&self.value, options)
            .with_context(|| format!("failed to generate from {}", self.source.display()))?;
        Ok(crate::render(&generation, options))
    }

    /// `config/appsettings.Development.json` → `appsettings_development.rs` / `AppsettingsDevelopment.cs`
    fn output_file_name(&self, target: Target) -> String {
        let stem = self
            .source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ident = crate::naming::normalize(&stem);
        let base = match target {
            Target::Rust => to_snake_case(ident.as_str()),
            Target::Csharp => ident.to_string(),
        };
        format!("{base}.{}", target.file_extension())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let options = target.option_settings.resolve()?;
                let documents = target.input_settings.load()?;

                if let Some(out_dir) = target.out_dir.as_ref() {
                    return write_all(&documents, out_dir, &options);
                }
                let [document] = documents.as_slice() else {
                    bail!("{} inputs given; use --out-dir to generate more than one", documents.len());
                };
                let source = document.render(&options)?;
                match target.out.as_ref() {
                    Some(out) => {
                        write_output(out, &source)?;
                        report_written(&document.source, out);
                    }
                    None => print!("{source}"),
                }
                Ok(())
            }
            Command::Inspect(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let options = target.option_settings.resolve()?;
                let documents = target.input_settings.load()?;
                let mut reports = serde_json::Map::new();
                for document in &documents {
                    let generation = crate::generate_value(&document.value, &options)
                        .with_context(|| format!("failed to generate from {}", document.source.display()))?;
                    reports.insert(
                        document.source.display().to_string(),
                        serde_json::to_value(&generation)?,
                    );
                }
                let report_src = serde_json::to_string_pretty(&Value::Object(reports))?;
                match target.out.as_ref() {
                    Some(out) => write_output(out, &report_src)?,
                    None => println!("{report_src}"),
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Generate every document into `out_dir`, in parallel. Refuses to start if
/// two inputs would land on the same output file.
fn write_all(documents: &[Document], out_dir: &Path, options: &GeneratorOptions) -> Result<()> {
    let mut seen = HashSet::new();
    let planned: Vec<(&Document, PathBuf)> = documents
        .iter()
        .map(|doc| (doc, out_dir.join(doc.output_file_name(options.target))))
        .collect();
    for (doc, out) in &planned {
        if !seen.insert(out.clone()) {
            bail!(
                "{} would overwrite {} generated from another input",
                doc.source.display(),
                out.display()
            );
        }
    }

    planned
        .par_iter()
        .map(|(doc, out)| {
            let source = doc.render(options)?;
            write_output(out, &source)?;
            report_written(&doc.source, out);
            Ok(())
        })
        .collect::<Result<Vec<()>>>()?;
    Ok(())
}

fn write_output(out: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
}

fn report_written(source: &Path, out: &Path) {
    info!(source = %source.display(), out = %out.display(), "generated");
    eprintln!("{} {} → {}", "generated".green().bold(), source.display(), out.display());
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });
    // stdout carries generated source, so logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            let path = PathBuf::from(pattern);
            if path.is_dir() {
                out.push(path.join(DEFAULT_INPUT_FILE));
            } else {
                out.push(path);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(path: &str) -> Document {
        Document { source: PathBuf::from(path), value: Value::Null }
    }

    #[test]
    fn output_names_follow_input_stem() {
        assert_eq!(doc("cfg/appsettings.json").output_file_name(Target::Rust), "appsettings.rs");
        assert_eq!(
            doc("cfg/appsettings.Development.json").output_file_name(Target::Rust),
            "appsettings_development.rs"
        );
        assert_eq!(
            doc("appsettings.Development.json").output_file_name(Target::Csharp),
            "AppsettingsDevelopment.cs"
        );
    }

    #[test]
    fn directories_resolve_to_appsettings() {
        let dir = tempfile::tempdir().unwrap();
        let paths = resolve_file_path_patterns([dir.path().to_string_lossy()]).unwrap();
        assert_eq!(paths, vec![dir.path().join(DEFAULT_INPUT_FILE)]);
    }

    #[test]
    fn unmatched_glob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        assert!(resolve_file_path_patterns([pattern]).is_err());
    }

    #[test]
    fn flags_override_options_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("gen.json");
        std::fs::write(&file, r#"{"namespace": "FromFile", "target": "csharp"}"#).unwrap();
        let settings = OptionSettings {
            options: Some(file),
            target: None,
            namespace: Some("FromFlag".into()),
            root_type: None,
            collisions: Some(CollisionPolicy::Error),
            null_values: None,
        };
        let options = settings.resolve().unwrap();
        assert_eq!(options.namespace, "FromFlag");
        assert_eq!(options.target, Target::Csharp);
        assert_eq!(options.collisions, CollisionPolicy::Error);
    }
}
