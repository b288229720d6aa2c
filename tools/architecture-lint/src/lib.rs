//! Repo-local architectural lint for the StackExchange client crate.
//!
//! The client keeps a small hexagon: `domain` holds the model, pure path and
//! hydration logic, and the transport port; `outbound` holds the reqwest
//! adapter; `config` and the binary compose them. This lint parses every
//! file under `client/src/domain` and `client/src/outbound` and reports:
//!
//! - `domain` code reaching into `outbound` or `config`, or naming a crate
//!   that performs I/O or process setup (`reqwest`, `tokio`, `ortho_config`,
//!   `clap`, `tracing_subscriber`);
//! - `outbound` code reaching into `config` or naming process-setup crates.
//!
//! Test modules are skipped: `#[cfg(test)]` items and `tests.rs` files may
//! use async test runtimes.
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Library crate name under which the client's modules are also reachable.
const CLIENT_CRATE: &str = "stackexchange_client";

/// Top-level modules of the client crate that carry a layer rule.
const LINTED_LAYERS: [&str; 2] = ["domain", "outbound"];

/// Top-level modules of the client crate.
const CLIENT_MODULES: [&str; 3] = ["config", "domain", "outbound"];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `client/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    Io(io::Error),
    /// Rust source parsing failed, or the file sits outside a linted layer.
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting architecture: {err}"),
            Self::Parse { file, message } => write!(
                f,
                "Failed to parse Rust source while linting architecture ({}): {message}",
                file.display()
            ),
            Self::Violations(violations) => {
                writeln!(f, "Architecture boundary violations:")?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `client/src`.
    pub file: PathBuf,
    pub contents: String,
}

/// Lint the client crate sources on disk.
///
/// `client_dir` must be the `client/` directory at the repository root.
pub fn lint_client_sources(client_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = client_dir.join("src");
    let mut sources = Vec::new();
    for layer in LINTED_LAYERS {
        let dir = src_dir.join(layer);
        if dir.exists() {
            collect_sources_under(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint the provided Rust sources. Intended for unit and behaviour tests.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let rule = LayerRule::for_path(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is not under a linted layer".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(rule.check(&source.file, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// Modules and crates a layer may not name.
#[derive(Debug, Clone, Copy)]
struct LayerRule {
    name: &'static str,
    forbidden_modules: &'static [&'static str],
    forbidden_crates: &'static [&'static str],
}

const DOMAIN_RULE: LayerRule = LayerRule {
    name: "domain",
    forbidden_modules: &["config", "outbound"],
    forbidden_crates: &[
        "clap",
        "hyper",
        "ortho_config",
        "reqwest",
        "tokio",
        "tracing_subscriber",
    ],
};

const OUTBOUND_RULE: LayerRule = LayerRule {
    name: "outbound",
    forbidden_modules: &["config"],
    forbidden_crates: &["clap", "ortho_config", "tracing_subscriber"],
};

impl LayerRule {
    fn for_path(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str();
        match first.to_str()? {
            "domain" => Some(DOMAIN_RULE),
            "outbound" => Some(OUTBOUND_RULE),
            _ => None,
        }
    }

    fn check(self, file: &Path, parsed: &syn::File) -> Vec<Violation> {
        let mut collector = PathCollector::default();
        collector.visit_file(parsed);

        let mut messages = BTreeSet::new();
        for segments in &collector.paths {
            match classify(segments) {
                Some(PathRoot::Module(root)) if self.forbidden_modules.contains(&root) => {
                    messages.insert(format!(
                        "{} module must not depend on crate::{root}",
                        self.name
                    ));
                }
                Some(PathRoot::Crate(root)) if self.forbidden_crates.contains(&root) => {
                    messages.insert(format!(
                        "{} module must not depend on external crate `{root}`",
                        self.name
                    ));
                }
                _ => {}
            }
        }

        messages
            .into_iter()
            .map(|message| Violation {
                file: file.to_path_buf(),
                message,
            })
            .collect()
    }
}

/// What the first meaningful segment of a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathRoot<'a> {
    Module(&'a str),
    Crate(&'a str),
}

fn is_relative_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn classify(segments: &[String]) -> Option<PathRoot<'_>> {
    let first = segments.first()?.as_str();
    if CLIENT_MODULES.contains(&first) {
        return Some(PathRoot::Module(first));
    }
    let module = if is_relative_segment(first) {
        segments
            .iter()
            .map(String::as_str)
            .find(|segment| !is_relative_segment(segment))?
    } else if first == CLIENT_CRATE {
        segments.get(1)?.as_str()
    } else {
        return Some(PathRoot::Crate(first));
    };
    CLIENT_MODULES
        .contains(&module)
        .then_some(PathRoot::Module(module))
}

/// Collects every path named in `use` trees and expressions.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                prefix.push(ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        if !is_test_only(&node.attrs) {
            syn::visit::visit_item_mod(self, node);
        }
    }
}

/// Whether `attrs` carry `#[cfg(test)]`.
fn is_test_only(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .parse_args::<syn::Ident>()
                .is_ok_and(|ident| ident == "test")
    })
}

/// Test modules split into their own files are only compiled under `cfg(test)`.
fn is_test_file(path: &Path) -> bool {
    path.file_stem().and_then(|stem| stem.to_str()) == Some("tests")
}

fn collect_sources_under(
    src_root: &Path,
    current: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources_under(src_root, &path, sources)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs")
            && !is_test_file(&path)
        {
            let file = path
                .strip_prefix(src_root)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource { file, contents });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
