//! Property runner over a directory of JSON settings files.
//!
//! `cargo run -p dev-test-runner -- tests/fixtures`
//!
//! For every `*.json` it checks, for both targets: identifiers are valid,
//! every non-null leaf is reachable by its raw path, and two runs render
//! byte-identical output.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use json_settings_gen::{AccessorKind, EmittedUnit, GeneratorOptions, Target, generate_value, render};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

fn main() -> Result<()> {
    let dir = std::env::args().nth(1).unwrap_or_else(|| "tests/fixtures".to_string());
    let mut failures = 0usize;
    for path in json_files(Path::new(&dir))? {
        match check_file(&path) {
            Ok(()) => println!("ok    {}", path.display()),
            Err(error) => {
                failures += 1;
                println!("FAIL  {}: {error:#}", path.display());
            }
        }
    }
    if failures > 0 {
        bail!("{failures} file(s) failed");
    }
    Ok(())
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn check_file(path: &Path) -> Result<()> {
    let value: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    if !value.is_object() {
        // structural errors are covered by the crate's own tests
        return Ok(());
    }

    for target in [Target::Rust, Target::Csharp] {
        let options = GeneratorOptions { target, ..Default::default() };
        let generation = generate_value(&value, &options)?;

        for unit in generation.root.walk() {
            for accessor in &unit.accessors {
                let ident = accessor.identifier.as_str();
                if !IDENT_RE.is_match(ident) || ident.contains("__") || ident.ends_with('_') {
                    bail!("invalid identifier {ident:?} for key {:?}", accessor.raw_key);
                }
            }
        }

        let mut expected = Vec::new();
        leaf_paths(&value, &mut Vec::new(), &mut expected);
        let mut actual = Vec::new();
        accessor_paths(&generation.root, &mut actual);
        if expected != actual {
            bail!("path mismatch: expected {expected:?}, got {actual:?}");
        }

        let first = render(&generation, &options);
        let second = render(&generate_value(&value, &options)?, &options);
        if first != second {
            bail!("{target:?} output is not deterministic");
        }
    }
    Ok(())
}

fn leaf_paths(value: &Value, prefix: &mut Vec<String>, out: &mut Vec<String>) {
    if let Value::Object(map) = value {
        for (k, v) in map {
            prefix.push(k.clone());
            match v {
                Value::Object(_) => leaf_paths(v, prefix, out),
                Value::Null => {}
                _ => out.push(prefix.join(":")),
            }
            prefix.pop();
        }
    }
}

fn accessor_paths(unit: &EmittedUnit, out: &mut Vec<String>) {
    for accessor in &unit.accessors {
        match &accessor.kind {
            AccessorKind::Container(child) => accessor_paths(child, out),
            _ => out.push(accessor.path.join()),
        }
    }
}
