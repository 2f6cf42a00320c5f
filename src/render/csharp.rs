//! C# target: classes over `Microsoft.Extensions.Configuration.IConfiguration`.
//!
//! Nested JSON objects become nested `<Name>Settings` classes, mirroring the
//! document shape one class per object.
use crate::emit::{Accessor, AccessorKind, EmittedUnit};
use crate::infer::ScalarKind;
use crate::naming::{is_complex, normalize};
use crate::options::{DEFAULT_NAMESPACE, GeneratorOptions};

use super::{Codegen, NameScope};

const HEADER: &str = "\
// <auto-generated>
//     Generated by json-settings-gen. Do not edit.
// </auto-generated>
";

const USINGS: &[&str] = &[
    "using System;",
    "using System.Globalization;",
    "using System.Linq;",
    "using Microsoft.Extensions.Configuration;",
];

/// Implicit member name of `this[...]`.
const INDEXER_MEMBER: &str = "Item";

const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub struct CSharpCodegen<'o> {
    options: &'o GeneratorOptions,
    out: String,
}

impl<'o> CSharpCodegen<'o> {
    pub fn new(options: &'o GeneratorOptions) -> Self {
        Self { options, out: String::new() }
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

    /// Class declaration, constructor and members for one unit at `indent`.
    /// `class_name` is unescaped.
    fn emit_class(&mut self, unit: &EmittedUnit, class_name: &str, indent: usize) {
        let body = indent + 1;
        let class_ident = csharp_ident(class_name);
        self.line(indent, &format!("public class {class_ident}"));
        self.line(indent, "{");
        self.line(body, "private readonly IConfiguration _configuration;");
        self.line(0, "");
        self.line(body, &format!("public {class_ident}(IConfiguration configuration)"));
        self.line(body, "{");
        self.line(body + 1, "_configuration = configuration;");
        self.line(body, "}");
        self.line(0, "");

        // a member may not share its enclosing type's name
        let mut members = NameScope::new("");
        members.reserve(class_name);
        if unit.fallback {
            members.reserve(INDEXER_MEMBER);
        }

        for accessor in &unit.accessors {
            let name = members.claim(accessor.identifier.as_str());
            let ident = csharp_ident(&name);
            if is_complex(&accessor.raw_key) {
                self.line(
                    body,
                    &format!(
                        "/// <summary>Configuration key: \"{}\"</summary>",
                        xml_escape(&accessor.path.join())
                    ),
                );
            }
            match &accessor.kind {
                AccessorKind::Container(child) => {
                    let nested = members.claim(&format!("{name}Settings"));
                    self.line(body, &format!("public {nested} {ident} => new {nested}(_configuration);"));
                    self.line(0, "");
                    self.emit_class(child, &nested, body);
                }
                _ => self.emit_leaf(accessor, &ident, body),
            }
        }

        if unit.fallback {
            let lookup = if unit.path.is_root() {
                "_configuration[key]".to_string()
            } else {
                format!("_configuration[{} + key]", string_literal(&unit.path.fallback_prefix()))
            };
            self.line(0, "");
            self.line(
                body,
                "/// <summary>Access configuration values by exact key name (useful for keys with special characters)</summary>",
            );
            self.line(body, &format!("public string this[string key] => {lookup} ?? string.Empty;"));
        }

        self.line(indent, "}");
        if indent > 0 {
            self.line(0, "");
        }
    }

    fn emit_leaf(&mut self, accessor: &Accessor, name: &str, indent: usize) {
        let key = string_literal(&accessor.path.join());
        let decl = match &accessor.kind {
            AccessorKind::Scalar(ScalarKind::String) => {
                format!("public string {name} => _configuration[{key}] ?? string.Empty;")
            }
            AccessorKind::Scalar(ScalarKind::Integer) => format!(
                "public int {name} => int.TryParse(_configuration[{key}], NumberStyles.Integer, \
                 CultureInfo.InvariantCulture, out var value) ? value : 0;"
            ),
            AccessorKind::Scalar(ScalarKind::Float) => format!(
                "public double {name} => double.TryParse(_configuration[{key}], NumberStyles.Float, \
                 CultureInfo.InvariantCulture, out var value) ? value : 0.0;"
            ),
            AccessorKind::Scalar(ScalarKind::Boolean) => {
                format!("public bool {name} => bool.TryParse(_configuration[{key}], out var value) && value;")
            }
            AccessorKind::Sequence => format!(
                "public string[] {name} => _configuration.GetSection({key}).GetChildren()\
                 .Select(c => c.Value ?? string.Empty).ToArray();"
            ),
            AccessorKind::Container(_) => unreachable!("containers are emitted as nested classes"),
        };
        self.line(indent, &decl);
    }
}

impl Codegen for CSharpCodegen<'_> {
    fn emit(&mut self, root: &EmittedUnit) {
        let namespace = namespace_name(&self.options.namespace);
        let root_class = normalize(&self.options.root_type).to_string();

        self.out.push_str(HEADER);
        for using in USINGS {
            self.line(0, using);
        }
        self.line(0, "");
        self.line(0, &format!("namespace {namespace};"));
        self.line(0, "");
        self.emit_class(root, &root_class, 0);
    }

    fn into_string(self) -> String {
        self.out
    }
}

/// Dotted namespaces keep their dots; each segment is normalized.
fn namespace_name(raw: &str) -> String {
    let segments: Vec<String> = raw
        .split('.')
        .filter(|s| !s.is_empty())
        .map(|s| csharp_ident(normalize(s).as_str()))
        .collect();
    if segments.is_empty() {
        DEFAULT_NAMESPACE.to_string()
    } else {
        segments.join(".")
    }
}

/// Reserved words become verbatim identifiers: `int` → `@int`.
pub fn csharp_ident(name: &str) -> String {
    if RESERVED_WORDS.contains(&name) {
        format!("@{name}")
    } else {
        name.to_string()
    }
}

/// Regular C# string literal with the same value as `s`.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
