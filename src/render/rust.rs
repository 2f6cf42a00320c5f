//! Rust target.
//!
//! Everything lands in one `pub mod <namespace>`: the provider trait the
//! accessors read through, the root struct, and one borrowed-provider struct
//! per nested object. Accessors are snake_case methods; every call goes to
//! the provider, nothing is cached.
use crate::emit::{Accessor, AccessorKind, EmittedUnit};
use crate::infer::ScalarKind;
use crate::naming::normalize;
use crate::options::GeneratorOptions;

use super::{Codegen, NameScope};

const HEADER: &str = "// @generated by json-settings-gen. Do not edit.\n";

/// Fallback accessor name. Reserved before field names so it never moves.
const FALLBACK_METHOD: &str = "get";

const STRICT_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "try", "type", "unsafe",
    "use", "where", "while", "abstract", "become", "box", "do", "final", "macro", "override",
    "priv", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const UNRAWABLE: &[&str] = &["crate", "self", "Self", "super"];

/// Prelude types named in accessor signatures; a generated type may not shadow them.
const PRELUDE_TYPES: &[&str] = &["String", "Vec", "Option"];

pub struct RustCodegen<'o> {
    options: &'o GeneratorOptions,
    out: String,
    types: NameScope,
    provider: String,
}

impl<'o> RustCodegen<'o> {
    pub fn new(options: &'o GeneratorOptions) -> Self {
        Self { options, out: String::new(), types: NameScope::new(""), provider: String::new() }
    }

    fn line(&mut self, indent: usize, text: &str) {
        if !text.is_empty() {
            for _ in 0..indent {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn emit_provider_trait(&mut self, name: &str) {
        self.line(1, "/// Colon-addressed configuration source the accessors read from.");
        self.line(1, &format!("pub trait {name} {{"));
        self.line(2, "/// Raw value at `path`, if set.");
        self.line(2, "fn get(&self, path: &str) -> Option<String>;");
        self.line(0, "");
        self.line(2, "/// Values of the direct children of `path`, in order. Empty if unset.");
        self.line(2, "fn children(&self, path: &str) -> Vec<String>;");
        self.line(1, "}");
    }

    fn emit_unit(&mut self, unit: &EmittedUnit, type_name: &str, chain: &str, is_root: bool) {
        let provider = self.provider.clone();

        self.line(0, "");
        if is_root {
            self.line(1, "/// Typed view over the whole configuration document.");
        } else {
            self.line(1, &format!("/// Accessors under {:?}.", unit.path.join()));
        }
        self.line(1, "#[derive(Clone, Copy)]");
        self.line(1, &format!("pub struct {type_name}<'a> {{"));
        self.line(2, &format!("provider: &'a dyn {provider},"));
        self.line(1, "}");
        self.line(0, "");
        self.line(1, &format!("impl<'a> {type_name}<'a> {{"));

        let mut methods = NameScope::new("_");
        if is_root {
            methods.reserve("new");
            self.line(2, &format!("pub fn new(provider: &'a dyn {provider}) -> Self {{"));
            self.line(3, "Self { provider }");
            self.line(2, "}");
        }
        if unit.fallback {
            methods.reserve(FALLBACK_METHOD);
        }

        let mut nested: Vec<(&EmittedUnit, String, String)> = Vec::new();
        for (i, accessor) in unit.accessors.iter().enumerate() {
            if is_root || i > 0 {
                self.line(0, "");
            }
            let method = rust_ident(&methods.claim(&to_snake_case(accessor.identifier.as_str())));
            if let AccessorKind::Container(child) = &accessor.kind {
                let child_chain = format!("{chain}{}", accessor.identifier);
                let child_type = self.types.claim(&format!("{child_chain}Settings"));
                self.emit_container_accessor(accessor, &method, &child_type);
                nested.push((child, child_type, child_chain));
            } else {
                self.emit_leaf_accessor(accessor, &method);
            }
        }

        if unit.fallback {
            if is_root || !unit.accessors.is_empty() {
                self.line(0, "");
            }
            self.emit_fallback(unit);
        }
        self.line(1, "}");

        for (child, child_type, child_chain) in nested {
            self.emit_unit(child, &child_type, &child_chain, false);
        }
    }

    fn emit_container_accessor(&mut self, accessor: &Accessor, method: &str, child_type: &str) {
        self.line(2, &format!("/// Configuration section: {:?}", accessor.path.join()));
        self.line(2, &format!("pub fn {method}(&self) -> {child_type}<'a> {{"));
        self.line(3, &format!("{child_type} {{ provider: self.provider }}"));
        self.line(2, "}");
    }

    fn emit_leaf_accessor(&mut self, accessor: &Accessor, method: &str) {
        let key = format!("{:?}", accessor.path.join());
        let (ret, body) = match &accessor.kind {
            AccessorKind::Scalar(ScalarKind::String) => (
                "String",
                format!("self.provider.get({key}).unwrap_or_default()"),
            ),
            AccessorKind::Scalar(ScalarKind::Integer) => (
                "i32",
                format!("self.provider.get({key}).and_then(|v| v.trim().parse().ok()).unwrap_or(0)"),
            ),
            AccessorKind::Scalar(ScalarKind::Float) => (
                "f64",
                format!("self.provider.get({key}).and_then(|v| v.trim().parse().ok()).unwrap_or(0.0)"),
            ),
            AccessorKind::Scalar(ScalarKind::Boolean) => (
                "bool",
                format!(
                    "self.provider.get({key}).is_some_and(|v| v.trim().eq_ignore_ascii_case(\"true\"))"
                ),
            ),
            AccessorKind::Sequence => ("Vec<String>", format!("self.provider.children({key})")),
            AccessorKind::Container(_) => unreachable!("containers are emitted separately"),
        };
        self.line(2, &format!("/// Configuration key: {key}"));
        self.line(2, &format!("pub fn {method}(&self) -> {ret} {{"));
        self.line(3, &body);
        self.line(2, "}");
    }

    fn emit_fallback(&mut self, unit: &EmittedUnit) {
        let prefix = unit.path.fallback_prefix();
        let lookup = if prefix.is_empty() {
            "self.provider.get(key)".to_string()
        } else {
            format!("self.provider.get(&[{prefix:?}, key].concat())")
        };
        self.line(2, "/// Value by exact key name, for keys whose accessor name differs from the key.");
        self.line(2, &format!("pub fn {FALLBACK_METHOD}(&self, key: &str) -> String {{"));
        self.line(3, &format!("{lookup}.unwrap_or_default()"));
        self.line(2, "}");
    }
}

impl Codegen for RustCodegen<'_> {
    fn emit(&mut self, root: &EmittedUnit) {
        let module = rust_ident(&to_snake_case(normalize(&self.options.namespace).as_str()));
        for name in PRELUDE_TYPES {
            self.types.reserve(name);
        }
        let provider = self.types.claim(&type_name(&self.options.provider_trait));
        self.provider = provider.clone();
        let root_type = self.types.claim(&type_name(&self.options.root_type));

        self.out.push_str(HEADER);
        self.line(0, "");
        self.line(0, &format!("pub mod {module} {{"));
        self.line(1, "#![allow(dead_code, non_camel_case_types, clippy::all)]");
        self.line(0, "");
        self.emit_provider_trait(&provider);
        self.emit_unit(root, &root_type, "", true);
        self.line(0, "}");
    }

    fn into_string(self) -> String {
        self.out
    }
}

/// Acronym-aware: `ApiSettings` → `api_settings`, `APIKey` → `api_key`.
pub fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_uppercase() {
            out.push(c);
            continue;
        }
        let boundary = match i.checked_sub(1).map(|j| chars[j]) {
            Some(prev) if prev.is_ascii_lowercase() || prev.is_ascii_digit() => true,
            Some(prev) if prev.is_ascii_uppercase() => {
                chars.get(i + 1).is_some_and(|next| next.is_ascii_lowercase())
            }
            _ => false,
        };
        if boundary {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Escapes keywords: `type` → `r#type`, `self` → `self_`.
pub fn rust_ident(name: &str) -> String {
    if UNRAWABLE.contains(&name) {
        format!("{name}_")
    } else if STRICT_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

fn type_name(raw: &str) -> String {
    let ident = normalize(raw);
    if UNRAWABLE.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident.to_string()
    }
}
