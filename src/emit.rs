//! Tree walk: `ConfigNode` → declaration records.
//!
//! The walk is pure. It produces an [`EmittedUnit`] per JSON object and never
//! touches output syntax; [`crate::render`] turns the records into text.
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Diagnostic, GenerateError};
use crate::infer::{ScalarKind, TypeCategory, infer};
use crate::naming::{Identifier, is_complex, normalize};
use crate::node::{ConfigNode, ConfigPath};
use crate::options::{CollisionPolicy, GeneratorOptions, NullPolicy};

/// One container: the root, or a nested JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedUnit {
    /// Raw path of the object this unit mirrors. Empty for the root.
    pub path: ConfigPath,
    /// Nesting level, 0 for the root.
    pub depth: usize,
    /// In source key order.
    pub accessors: Vec<Accessor>,
    /// Whether a raw-key lookup accessor is exposed at this level.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accessor {
    pub identifier: Identifier,
    pub raw_key: String,
    pub path: ConfigPath,
    pub kind: AccessorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    Scalar(ScalarKind),
    /// Ordered string values at the path; empty when unset.
    Sequence,
    Container(Box<EmittedUnit>),
}

/// Output of one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub root: EmittedUnit,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn generate(root: &ConfigNode, options: &GeneratorOptions) -> Result<Generation, GenerateError> {
    let mut emitter = Emitter { options, diagnostics: Vec::new() };
    let root = emitter.emit(root, &ConfigPath::root(), 0)?;
    Ok(Generation { root, diagnostics: emitter.diagnostics })
}

impl EmittedUnit {
    /// Depth-first over this unit and every nested container.
    pub fn walk(&self) -> Vec<&EmittedUnit> {
        let mut out = vec![self];
        for accessor in &self.accessors {
            if let AccessorKind::Container(unit) = &accessor.kind {
                out.extend(unit.walk());
            }
        }
        out
    }

    pub fn accessor(&self, identifier: &str) -> Option<&Accessor> {
        self.accessors.iter().find(|a| a.identifier.as_str() == identifier)
    }

    pub fn container(&self, identifier: &str) -> Option<&EmittedUnit> {
        match &self.accessor(identifier)?.kind {
            AccessorKind::Container(unit) => Some(unit),
            _ => None,
        }
    }
}

struct Emitter<'o> {
    options: &'o GeneratorOptions,
    diagnostics: Vec<Diagnostic>,
}

impl Emitter<'_> {
    fn emit(
        &mut self,
        node: &ConfigNode,
        path: &ConfigPath,
        depth: usize,
    ) -> Result<EmittedUnit, GenerateError> {
        let fields = node
            .as_object()
            .ok_or(GenerateError::RootNotObject { found: node.kind_name() })?;

        let mut names = LevelNames::default();
        let mut accessors = Vec::with_capacity(fields.len());

        for (raw_key, child) in fields {
            let child_path = path.child(raw_key);
            let kind = match infer(child) {
                TypeCategory::Scalar(scalar) => AccessorKind::Scalar(scalar),
                TypeCategory::StringArray => AccessorKind::Sequence,
                TypeCategory::Container => {
                    AccessorKind::Container(Box::new(self.emit(child, &child_path, depth + 1)?))
                }
                TypeCategory::Absent => match self.options.null_values {
                    NullPolicy::Skip => {
                        self.report(Diagnostic::NullSkipped { path: child_path.join() });
                        continue;
                    }
                    NullPolicy::String => {
                        self.report(Diagnostic::NullAsString { path: child_path.join() });
                        AccessorKind::Scalar(ScalarKind::String)
                    }
                    NullPolicy::Error => {
                        return Err(GenerateError::Unclassifiable { path: child_path.join() });
                    }
                },
            };
            let identifier = self.claim(&mut names, path, raw_key)?;
            accessors.push(Accessor {
                identifier,
                raw_key: raw_key.clone(),
                path: child_path,
                kind,
            });
        }

        let fallback = needs_fallback(fields);
        debug!(
            path = %path,
            depth,
            accessors = accessors.len(),
            fallback,
            "emitted unit"
        );
        Ok(EmittedUnit { path: path.clone(), depth, accessors, fallback })
    }

    /// Normalize `raw_key` and reserve the result at this level, resolving
    /// clashes with earlier siblings per the collision policy.
    fn claim(
        &mut self,
        names: &mut LevelNames,
        level: &ConfigPath,
        raw_key: &str,
    ) -> Result<Identifier, GenerateError> {
        let natural = normalize(raw_key);
        let Some(first) = names.owner(&natural) else {
            names.take(natural.clone(), raw_key);
            return Ok(natural);
        };
        let first = first.to_string();

        if self.options.collisions == CollisionPolicy::Error {
            return Err(GenerateError::NameCollision {
                level: level_name(level),
                first,
                second: raw_key.to_string(),
                identifier: natural,
            });
        }

        let resolved = (2..)
            .map(|n| natural.with_suffix(n))
            .find(|candidate| names.owner(candidate).is_none())
            .unwrap_or_else(|| unreachable!("suffix search is unbounded"));
        names.take(resolved.clone(), raw_key);
        self.report(Diagnostic::NameCollision {
            level: level_name(level),
            first,
            second: raw_key.to_string(),
            identifier: natural,
            resolved: resolved.clone(),
        });
        Ok(resolved)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// Identifiers already handed out at one object level, with the raw key that owns each.
#[derive(Default)]
struct LevelNames {
    owners: HashMap<Identifier, String>,
}

impl LevelNames {
    fn owner(&self, identifier: &Identifier) -> Option<&str> {
        self.owners.get(identifier).map(String::as_str)
    }

    fn take(&mut self, identifier: Identifier, raw_key: &str) {
        self.owners.insert(identifier, raw_key.to_string());
    }
}

fn needs_fallback(fields: &IndexMap<String, ConfigNode>) -> bool {
    fields.keys().any(|k| is_complex(k))
}

fn level_name(path: &ConfigPath) -> String {
    if path.is_root() { "<root>".to_string() } else { path.join() }
}
