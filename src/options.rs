//! Generator options.
//!
//! Every field has a default, so an options file only names what it changes:
//!
//! ```json
//! { "namespace": "Billing", "target": "csharp", "collisions": "error" }
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::path_de::{PathError, from_str_with_path};

pub const DEFAULT_NAMESPACE: &str = "AppSettings";
pub const DEFAULT_ROOT_TYPE: &str = "AppSettings";
pub const DEFAULT_PROVIDER_TRAIT: &str = "ConfigProvider";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Enclosing namespace (C#) or module (Rust). Cosmetic.
    pub namespace: String,
    /// Name of the root container type.
    pub root_type: String,
    pub target: Target,
    pub collisions: CollisionPolicy,
    pub null_values: NullPolicy,
    /// Provider trait declared by the Rust target.
    pub provider_trait: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            root_type: DEFAULT_ROOT_TYPE.to_string(),
            target: Target::default(),
            collisions: CollisionPolicy::default(),
            null_values: NullPolicy::default(),
            provider_trait: DEFAULT_PROVIDER_TRAIT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    #[default]
    Rust,
    #[serde(alias = "cs")]
    #[value(alias = "cs")]
    Csharp,
}

impl Target {
    pub fn file_extension(self) -> &'static str {
        match self {
            Target::Rust => "rs",
            Target::Csharp => "cs",
        }
    }
}

/// What to do when two keys at one level normalize to the same identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Later keys get the smallest free numeric suffix (`ApiKey2`).
    #[default]
    Suffix,
    /// Abort generation.
    Error,
}

/// What a `null` leaf turns into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Treat as an absent field: no accessor.
    #[default]
    Skip,
    /// Emit a string accessor.
    String,
    /// Abort generation.
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to read options file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: PathError,
    },
}

impl GeneratorOptions {
    pub fn from_json(src: &str) -> Result<Self, PathError> {
        from_str_with_path(src)
    }

    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let display = path.display().to_string();
        let src = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&src).map_err(|source| OptionsError::Parse { path: display, source })
    }
}
