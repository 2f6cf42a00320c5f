//! Declaration records → source text.
//!
//! Each target implements [`Codegen`]. Renderers only decide syntax; which
//! accessors exist and which path each one reads is fixed by [`crate::emit`].
pub mod csharp;
pub mod rust;

use std::collections::HashSet;

use crate::emit::{EmittedUnit, Generation};
use crate::options::{GeneratorOptions, Target};

pub use csharp::CSharpCodegen;
pub use rust::RustCodegen;

pub trait Codegen {
    fn emit(&mut self, root: &EmittedUnit);
    fn into_string(self) -> String;
}

pub fn render(generation: &Generation, options: &GeneratorOptions) -> String {
    match options.target {
        Target::Rust => run(RustCodegen::new(options), &generation.root),
        Target::Csharp => run(CSharpCodegen::new(options), &generation.root),
    }
}

fn run<C: Codegen>(mut cg: C, root: &EmittedUnit) -> String {
    cg.emit(root);
    cg.into_string()
}

/// Names handed out within one target-language scope. Identifiers are unique
/// per JSON level already; this catches clashes the target introduces
/// (case folding, type-name suffixes, reserved member names).
#[derive(Debug, Default)]
pub(crate) struct NameScope {
    used: HashSet<String>,
    separator: &'static str,
}

impl NameScope {
    pub(crate) fn new(separator: &'static str) -> Self {
        Self { used: HashSet::new(), separator }
    }

    pub(crate) fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    /// `base` if free, else `base{sep}2`, `base{sep}3`, …
    pub(crate) fn claim(&mut self, base: &str) -> String {
        let name = if self.used.contains(base) {
            (2..)
                .map(|n| format!("{base}{}{n}", self.separator))
                .find(|candidate| !self.used.contains(candidate))
                .unwrap_or_else(|| unreachable!("suffix search is unbounded"))
        } else {
            base.to_string()
        };
        self.used.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_suffixes_taken_names() {
        let mut scope = NameScope::new("_");
        scope.reserve("get");
        assert_eq!(scope.claim("get"), "get_2");
        assert_eq!(scope.claim("get"), "get_3");
        assert_eq!(scope.claim("timeout"), "timeout");
        assert_eq!(scope.claim("timeout"), "timeout_2");
    }
}
