//! Manifest scanning - extracting role declarations from source files
//!
//! A manifest is an ordinary Rust source file; its `impl <RoleTrait> for
//! <Type>` headers declare which role each type satisfies. Scanning is
//! purely textual: the file is never compiled or executed, and the
//! declared type names must be linked into the [`Registry`](crate::Registry)
//! to be usable.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::roles::Role;

/// A single role declaration found in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDecl {
    pub role: Role,
    pub type_name: String,
    /// 1-based line of the impl header
    pub line: usize,
}

/// Scan a manifest file for role declarations, in definition order
pub fn scan_file(path: &Path) -> Result<Vec<RoleDecl>> {
    let source = std::fs::read_to_string(path)?;
    let decls = scan_source(&source);
    debug!(path = %path.display(), count = decls.len(), "scanned manifest");
    Ok(decls)
}

/// Scan source text for `impl <RoleTrait> for <Type>` headers
pub fn scan_source(source: &str) -> Vec<RoleDecl> {
    let mut decls = Vec::new();
    let mut in_block_comment = false;

    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();

        if in_block_comment {
            if line.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }
        if line.starts_with("/*") && !line.contains("*/") {
            in_block_comment = true;
            continue;
        }
        if line.starts_with("//") {
            continue;
        }

        if let Some(decl) = parse_impl_header(line, index + 1) {
            decls.push(decl);
        }
    }

    decls
}

/// Parse one candidate line; returns None unless it is a role impl header
fn parse_impl_header(line: &str, line_number: usize) -> Option<RoleDecl> {
    let mut rest = line.strip_prefix("impl")?;

    // Generic parameter list on the impl itself
    if let Some(after) = rest.strip_prefix('<') {
        rest = skip_generics(after)?;
    } else if !rest.starts_with(char::is_whitespace) {
        // Something like `implementation`, not an impl item
        return None;
    }
    let rest = rest.trim_start();

    // Inherent impls have no ` for ` clause
    let (trait_part, type_part) = rest.split_once(" for ")?;

    let trait_name = final_segment(trait_part);
    let role = Role::from_trait_name(trait_name)?;
    let type_name = final_segment(type_part);
    if type_name.is_empty() {
        return None;
    }

    Some(RoleDecl {
        role,
        type_name: type_name.to_string(),
        line: line_number,
    })
}

/// Advance past a `<...>` list that was already entered, honoring nesting
fn skip_generics(rest: &str) -> Option<&str> {
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[i + 1..]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Last path segment of a trait or type reference, with generics and
/// trailing tokens stripped
fn final_segment(part: &str) -> &str {
    let part = part.trim();
    let end = part
        .find(|c: char| c == '<' || c == '{' || c == '(' || c.is_whitespace())
        .unwrap_or(part.len());
    let path = &part[..end];
    path.rsplit("::").next().unwrap_or(path)
}
