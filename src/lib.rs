//! Strongly-typed accessors from a JSON configuration document.
//!
//! The document's shape is the schema. Each JSON object becomes a container
//! type and each leaf a read accessor bound to the leaf's colon-joined raw
//! key path (`Logging:LogLevel:Default`), which is what the generated code
//! hands to the configuration provider at runtime.
//!
//! Pipeline:
//! 1. [`node::ConfigNode::from_value`]: parsed JSON → closed node tree
//! 2. [`emit::generate`]: node tree → declaration records (+ diagnostics)
//! 3. [`render::render`]: records → Rust or C# source
//!
//! ```
//! use json_settings_gen::{GeneratorOptions, generate_source};
//!
//! let src = generate_source(
//!     r#"{"ApiSettings": {"BaseUrl": "http://x", "Timeout": 30}}"#,
//!     &GeneratorOptions::default(),
//! ).unwrap();
//! assert!(src.contains("pub fn timeout(&self) -> i32"));
//! ```
pub mod cli;
pub mod emit;
pub mod error;
pub mod infer;
pub mod naming;
pub mod node;
pub mod options;
pub mod path_de;
pub mod render;

pub use emit::{Accessor, AccessorKind, EmittedUnit, Generation, generate};
pub use error::{Diagnostic, GenerateError};
pub use infer::{ScalarKind, TypeCategory, infer};
pub use naming::{Identifier, is_complex, normalize};
pub use node::{ConfigNode, ConfigPath};
pub use options::{CollisionPolicy, GeneratorOptions, NullPolicy, Target};
pub use render::render;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

pub fn generate_value(
    value: &serde_json::Value,
    options: &GeneratorOptions,
) -> Result<Generation, GenerateError> {
    generate(&ConfigNode::from_value(value), options)
}

/// Parse, generate and render in one go.
pub fn generate_source(json: &str, options: &GeneratorOptions) -> Result<String, Error> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let generation = generate_value(&value, options)?;
    Ok(render(&generation, options))
}
