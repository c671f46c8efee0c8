//! Structured editing of Rust source files.
//!
//! [`SourceDocument`] parses a file with `syn` to learn where its top-level
//! module declarations are, then splices new declarations into the original
//! text. Nothing outside the inserted line is reformatted.

use proc_macro2::LineColumn;
use syn::spanned::Spanned;
use syn::{Item, UseTree};

const BOM: &str = "\u{feff}";

/// Error returned by [`SourceDocument`] operations.
#[derive(Debug)]
pub enum SourceError {
    /// The text is not valid Rust.
    Parse(syn::Error),
    /// The requested module name is not a Rust identifier.
    InvalidName(String),
    /// Another top-level item already uses the module's name.
    Conflict { name: String, item: &'static str },
    /// The inserted declaration did not end up at the top level.
    Misplaced(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Parse(err) => {
                let pos = err.span().start();
                write!(f, "{}:{}: {err}", pos.line, pos.column + 1)
            }
            SourceError::InvalidName(name) => write!(f, "'{name}' is not a valid module name"),
            SourceError::Conflict { name, item } => {
                write!(f, "name '{name}' is already used by a {item}")
            }
            SourceError::Misplaced(name) => {
                write!(f, "cannot place a declaration of '{name}' at the top level")
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// A top-level `mod name;` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDecl {
    pub name: String,
    pub public: bool,
}

/// A parsed Rust source file whose module list can be extended.
pub struct SourceDocument {
    source: String,
    file: syn::File,
}

impl SourceDocument {
    pub fn parse(source: impl Into<String>) -> Result<Self, SourceError> {
        let source = source.into();
        let file = syn::parse_file(&source).map_err(SourceError::Parse)?;
        Ok(SourceDocument { source, file })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn into_string(self) -> String {
        self.source
    }

    /// Top-level out-of-line module declarations, in file order.
    pub fn modules(&self) -> Vec<ModuleDecl> {
        self.file
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Mod(m) if m.content.is_none() => Some(ModuleDecl {
                    name: m.ident.to_string(),
                    public: !matches!(m.vis, syn::Visibility::Inherited),
                }),
                _ => None,
            })
            .collect()
    }

    /// Declare the module an import path refers to: `a/b/origin` becomes
    /// `mod origin;`.
    ///
    /// Returns `Ok(false)` when the module is already declared.
    pub fn add_import(&mut self, path: &str) -> Result<bool, SourceError> {
        let name = path.rsplit('/').next().unwrap_or_default();
        self.add_module(name, false)
    }

    /// Insert `mod name;` (or `pub mod name;`) among the top-level module
    /// declarations, keeping them in name order.
    ///
    /// Returns `Ok(true)` when the declaration was inserted and `Ok(false)`
    /// when a declaration of the same module already exists.
    pub fn add_module(&mut self, name: &str, public: bool) -> Result<bool, SourceError> {
        if !is_identifier(name) {
            return Err(SourceError::InvalidName(name.to_string()));
        }

        let mut conflict = None;
        for item in &self.file.items {
            if let Item::Mod(m) = item {
                if m.content.is_none() && m.ident == name {
                    return Ok(false);
                }
            }
            if conflict.is_none() {
                conflict = type_names(item)
                    .into_iter()
                    .find(|(existing, _)| existing == name)
                    .map(|(_, kind)| kind);
            }
        }
        if let Some(item) = conflict {
            return Err(SourceError::Conflict {
                name: name.to_string(),
                item,
            });
        }

        let decl = if public {
            format!("pub mod {name};")
        } else {
            format!("mod {name};")
        };
        let (offset, text) = self.insertion_point(name, &decl);
        let mut source = self.source.clone();
        source.insert_str(offset, &text);
        let file = syn::parse_file(&source).map_err(SourceError::Parse)?;
        let declared = file.items.iter().any(|item| {
            matches!(item, Item::Mod(m) if m.content.is_none() && m.ident == name)
        });
        if !declared {
            return Err(SourceError::Misplaced(name.to_string()));
        }

        self.source = source;
        self.file = file;
        Ok(true)
    }

    fn insertion_point(&self, name: &str, decl: &str) -> (usize, String) {
        let decls: Vec<&syn::ItemMod> = self
            .file
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Mod(m) if m.content.is_none() => Some(m),
                _ => None,
            })
            .collect();

        if let Some(next) = decls.iter().find(|m| m.ident.to_string().as_str() > name) {
            return (self.item_start(next.span().start()), format!("{decl}\n"));
        }

        if let Some(last) = decls.last() {
            let end = match &last.semi {
                Some(semi) => semi.spans[0].end(),
                None => last.span().end(),
            };
            let offset = self.offset(end);
            let rest = self.source[offset..].lines().next().unwrap_or_default();
            if !is_line_tail(rest) {
                // Something else starts on the same line: split it off.
                return (offset, format!("\n{decl}"));
            }
            return match self.source[offset..].find('\n') {
                Some(idx) => (offset + idx + 1, format!("{decl}\n")),
                None => (self.source.len(), format!("\n{decl}\n")),
            };
        }

        if let Some(first) = self.file.items.first() {
            return (self.item_start(first.span().start()), format!("{decl}\n\n"));
        }

        let mut text = String::new();
        if !self.source.is_empty() && !self.source.ends_with('\n') {
            text.push('\n');
        }
        if !self.source.trim().is_empty() {
            text.push('\n');
        }
        text.push_str(decl);
        text.push('\n');
        (self.source.len(), text)
    }

    /// Where to insert before an item starting at `pos`: the start of its
    /// line when only whitespace precedes it, else the item itself.
    fn item_start(&self, pos: LineColumn) -> usize {
        let line = self.line_start(pos.line);
        let offset = self.offset(pos);
        if self.source[line..offset].trim().is_empty() {
            line
        } else {
            offset
        }
    }

    /// Byte offset of the start of a 1-based line.
    fn line_start(&self, line: usize) -> usize {
        let base = if self.source.starts_with(BOM) { BOM.len() } else { 0 };
        if line <= 1 {
            return base;
        }
        self.source[base..]
            .match_indices('\n')
            .nth(line - 2)
            .map(|(idx, _)| base + idx + 1)
            .unwrap_or(self.source.len())
    }

    /// Byte offset of a span position (columns count characters).
    fn offset(&self, pos: LineColumn) -> usize {
        let start = self.line_start(pos.line);
        self.source[start..]
            .char_indices()
            .nth(pos.column)
            .map(|(idx, _)| start + idx)
            .unwrap_or(self.source.len())
    }
}

/// Whether the text after a declaration's `;` can stay on its line: blank or
/// a plain line comment. Doc comments belong to the next item.
fn is_line_tail(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || (rest.starts_with("//") && !rest.starts_with("///") && !rest.starts_with("//!"))
}

/// Whether `name` can be used as a module name.
pub fn is_identifier(name: &str) -> bool {
    !name.contains('#') && syn::parse_str::<syn::Ident>(name).is_ok()
}

/// Names a top-level item binds in the type namespace, the one `mod`
/// declarations live in.
fn type_names(item: &Item) -> Vec<(String, &'static str)> {
    match item {
        Item::Mod(m) if m.content.is_some() => vec![(m.ident.to_string(), "inline module")],
        Item::Struct(s) => vec![(s.ident.to_string(), "struct")],
        Item::Enum(e) => vec![(e.ident.to_string(), "enum")],
        Item::Union(u) => vec![(u.ident.to_string(), "union")],
        Item::Trait(t) => vec![(t.ident.to_string(), "trait")],
        Item::TraitAlias(t) => vec![(t.ident.to_string(), "trait alias")],
        Item::Type(t) => vec![(t.ident.to_string(), "type alias")],
        Item::ExternCrate(c) => {
            let ident = c.rename.as_ref().map(|(_, rename)| rename).unwrap_or(&c.ident);
            vec![(ident.to_string(), "extern crate")]
        }
        Item::Use(u) => {
            let mut names = Vec::new();
            use_names(&u.tree, None, &mut names);
            names.into_iter().map(|name| (name, "use declaration")).collect()
        }
        _ => Vec::new(),
    }
}

fn use_names(tree: &UseTree, parent: Option<&syn::Ident>, out: &mut Vec<String>) {
    match tree {
        UseTree::Path(path) => use_names(&path.tree, Some(&path.ident), out),
        UseTree::Name(name) if name.ident == "self" => {
            if let Some(parent) = parent {
                out.push(parent.to_string());
            }
        }
        UseTree::Name(name) => out.push(name.ident.to_string()),
        UseTree::Rename(rename) if rename.rename != "_" => out.push(rename.rename.to_string()),
        UseTree::Rename(_) | UseTree::Glob(_) => {}
        UseTree::Group(group) => {
            for tree in &group.items {
                use_names(tree, parent, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("origin"));
        assert!(is_identifier("list_all"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("fn"));
        assert!(!is_identifier("push-all"));
        assert!(!is_identifier("r#type"));
        assert!(!is_identifier("_"));
    }

    #[test]
    fn line_start_handles_bom() {
        let doc = SourceDocument::parse("\u{feff}fn a() {}\nfn b() {}\n").unwrap();
        assert_eq!(doc.line_start(1), 3);
        assert_eq!(&doc.as_str()[doc.line_start(2)..], "fn b() {}\n");
    }

    #[test]
    fn line_tails() {
        assert!(is_line_tail(""));
        assert!(is_line_tail("  // note"));
        assert!(!is_line_tail(" /// doc for the next item"));
        assert!(!is_line_tail(" /* open"));
        assert!(!is_line_tail(" fn main() {"));
    }

    #[test]
    fn use_tree_names() {
        let file = syn::parse_file("use a::{b, c as d, e::{self}, f::*, g as _};").unwrap();
        let names: Vec<String> = type_names(&file.items[0]).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "d", "e"]);
    }
}
