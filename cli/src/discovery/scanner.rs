//! # Source Scanner
//!
//! File: cli/src/discovery/scanner.rs
//!
//! ## Overview
//!
//! Turns one profile directory into a `ScannedPackage`: the parsed form of
//! every Rust source file directly inside it.
//!
//! ## Architecture
//!
//! Discovery never looks at `syn` types. A `SourceParser` reduces each file to
//! a `ParsedFile`, which only exposes what discovery needs:
//!
//! - the function declarations found at the top of the file (free functions)
//!   and inside top-level `impl` blocks (associated functions, with or
//!   without a `self` receiver)
//! - every struct literal expression anywhere in the file, with its named
//!   fields and, where a field holds a sequence of string literals, those
//!   strings
//!
//! `SynParser` is the implementation used by the binary. Swapping it out does
//! not touch `discovery::factories` or `discovery::aliases`.
//!
//! Every file other than `mod.rs` (or a `lib.rs`/`main.rs` crate root) is a
//! child module of the profile, named after its file stem. `ParsedFile::module`
//! records that, so a factory declared in `deploy.rs` is reached as
//! `deploy::new_deploy_cmd` from the profile module.
//!
//! Files are visited in file-name order, so everything derived from a package
//! (in particular the alias list) is independent of directory enumeration
//! order. Test files (`tests.rs`, `*_test.rs`, `*_tests.rs`) and the previously
//! generated wiring file are skipped.
//!
use crate::common::fs::io;
use crate::core::error::{Result, WiregenError};
use crate::discovery::naming::module_segment;
use anyhow::anyhow;
use std::path::{Path, PathBuf};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::visit::{self, Visit};
use syn::{Expr, ImplItem, Item, Lit, Member, Token};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Where a function declaration sits in its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionScope {
    /// A free function at the top level of the file.
    Free,
    /// A function inside a top-level `impl` block.
    Associated { has_receiver: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub scope: FunctionScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// The string literals of an array, slice reference or `vec![]` value.
    StringList(Vec<String>),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    pub key: String,
    pub value: FieldValue,
}

/// One struct literal expression (`Name { field: value, .. }`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordLiteral {
    pub fields: Vec<RecordField>,
}

/// Parser-independent view of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub path: PathBuf,
    /// Child module the file declares, relative to the profile module;
    /// `None` for the profile module's own file.
    pub module: Option<String>,
    pub functions: Vec<FunctionDecl>,
    pub record_literals: Vec<RecordLiteral>,
}

/// A profile directory's sources, ordered by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedPackage {
    /// Module name of the directory.
    pub name: String,
    pub files: Vec<ParsedFile>,
}

/// Reduces source text to a `ParsedFile`.
pub trait SourceParser {
    /// # Errors
    ///
    /// Returns `WiregenError::Parse` when `source` is not syntactically valid.
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedFile>;
}

/// `SourceParser` backed by `syn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SynParser;

impl SourceParser for SynParser {
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedFile> {
        let file = syn::parse_file(source).map_err(|e| {
            let start = e.span().start();
            anyhow!(WiregenError::Parse {
                file: path.to_path_buf(),
                line: start.line,
                column: start.column + 1,
                message: e.to_string(),
            })
        })?;

        let mut functions = Vec::new();
        for item in &file.items {
            match item {
                Item::Fn(func) => functions.push(FunctionDecl {
                    name: func.sig.ident.unraw().to_string(),
                    scope: FunctionScope::Free,
                }),
                Item::Impl(block) => {
                    for impl_item in &block.items {
                        if let ImplItem::Fn(method) = impl_item {
                            functions.push(FunctionDecl {
                                name: method.sig.ident.unraw().to_string(),
                                scope: FunctionScope::Associated {
                                    has_receiver: method.sig.receiver().is_some(),
                                },
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        let mut collector = RecordCollector::default();
        collector.visit_file(&file);

        Ok(ParsedFile {
            path: path.to_path_buf(),
            module: declaring_module(path),
            functions,
            record_literals: collector.records,
        })
    }
}

#[derive(Default)]
struct RecordCollector {
    records: Vec<RecordLiteral>,
}

impl<'ast> Visit<'ast> for RecordCollector {
    fn visit_expr_struct(&mut self, node: &'ast syn::ExprStruct) {
        let fields = node
            .fields
            .iter()
            .filter_map(|field| match &field.member {
                Member::Named(ident) => Some(RecordField {
                    key: ident.unraw().to_string(),
                    value: string_list(&field.expr)
                        .map(FieldValue::StringList)
                        .unwrap_or(FieldValue::Other),
                }),
                Member::Unnamed(_) => None,
            })
            .collect();
        self.records.push(RecordLiteral { fields });
        // Struct literals nested inside this one are collected too.
        visit::visit_expr_struct(self, node);
    }
}

/// Strings of `["a", "b"]`, `&["a", "b"]` or `vec!["a", "b"]`; `None` for any other shape.
fn string_list(expr: &Expr) -> Option<Vec<String>> {
    let elements: Vec<Expr> = match expr {
        Expr::Array(array) => array.elems.iter().cloned().collect(),
        Expr::Reference(reference) => return string_list(&reference.expr),
        Expr::Paren(paren) => return string_list(&paren.expr),
        Expr::Group(group) => return string_list(&group.expr),
        Expr::Macro(mac) if mac.mac.path.is_ident("vec") => mac
            .mac
            .parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated)
            .ok()?
            .into_iter()
            .collect(),
        _ => return None,
    };
    Some(
        elements
            .iter()
            .filter_map(|element| match element {
                Expr::Lit(lit) => match &lit.lit {
                    Lit::Str(s) => Some(s.value()),
                    _ => None,
                },
                _ => None,
            })
            .collect(),
    )
}

/// Module segment of the file at `path` relative to its directory's module.
pub fn declaring_module(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    match stem.as_ref() {
        "mod" | "lib" | "main" => None,
        other => Some(module_segment(other)),
    }
}

/// True for `tests.rs`, `*_test.rs` and `*_tests.rs`.
pub fn is_test_file(file_name: &str) -> bool {
    match file_name.strip_suffix(".rs") {
        Some(stem) => stem == "tests" || stem.ends_with("_test") || stem.ends_with("_tests"),
        None => false,
    }
}

/// Parses the Rust sources directly inside `dir`.
///
/// # Arguments
///
/// * `dir` - The profile directory. Subdirectories are not descended into.
/// * `parser` - Parser used for every file.
/// * `generated_file` - Name of the wiring file a previous run wrote here; it is never re-ingested.
///
/// # Returns
///
/// * `Ok(None)` if the directory holds no eligible source file.
///
/// # Errors
///
/// - `WiregenError::DirectoryRead` if the directory cannot be listed.
/// - `WiregenError::Parse` for the first file (in name order) with a syntax error.
pub fn scan_directory(
    dir: &Path,
    parser: &dyn SourceParser,
    generated_file: &str,
) -> Result<Option<ScannedPackage>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            anyhow!(WiregenError::DirectoryRead {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            warn!("Skipping non UTF-8 file name in {}", dir.display());
            continue;
        };
        if !file_name.ends_with(".rs") || is_test_file(file_name) || file_name == generated_file {
            debug!("Not scanning {}", entry.path().display());
            continue;
        }

        let source = io::read_file_to_string(entry.path())?;
        files.push(parser.parse(entry.path(), &source)?);
    }

    if files.is_empty() {
        return Ok(None);
    }

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!("Scanned package '{}' ({} files)", name, files.len());
    Ok(Some(ScannedPackage { name, files }))
}
