//! Loaded compilation units and their top-level symbol tables

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// What a top-level item declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclKind {
    Struct,
    Enum,
    Union,
    /// `type Name = ...;`
    TypeAlias,
    Trait,
    Function,
    Static,
    Constant,
    /// `mod name;` or an inline `mod name { ... }`
    Module,
    /// A name bound by a `use` item
    Import,
    ExternCrate,
    Macro,
}

impl DeclKind {
    /// Whether the item declares a named type that can be instantiated by path
    pub fn is_named_type(self) -> bool {
        matches!(
            self,
            DeclKind::Struct | DeclKind::Enum | DeclKind::Union | DeclKind::TypeAlias
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Struct => "struct",
            DeclKind::Enum => "enum",
            DeclKind::Union => "union",
            DeclKind::TypeAlias => "type alias",
            DeclKind::Trait => "trait",
            DeclKind::Function => "function",
            DeclKind::Static => "static",
            DeclKind::Constant => "constant",
            DeclKind::Module => "module",
            DeclKind::Import => "import",
            DeclKind::ExternCrate => "extern crate",
            DeclKind::Macro => "macro",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared top-level entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub kind: DeclKind,
    /// Identifier with its generic parameter list, as printed from tokens
    /// (e.g. `Widget < T = u8 >`). Equal to the bare name for non-generic items.
    pub ident_form: String,
}

impl Symbol {
    pub fn new(kind: DeclKind, ident_form: impl Into<String>) -> Self {
        Self {
            kind,
            ident_form: ident_form.into(),
        }
    }
}

/// Top-level names of one unit
///
/// Rust keeps types and values in separate namespaces, so one name can be
/// both a `struct` and a `fn`. The table keeps a single entry per name and
/// lets a named-type declaration displace anything else; among equals the
/// first declaration wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: BTreeMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol) {
        let name = name.into();
        match self.entries.get(&name) {
            Some(existing) if existing.kind.is_named_type() || !symbol.kind.is_named_type() => {}
            _ => {
                self.entries.insert(name, symbol);
            }
        }
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single comment, delimiters included (`//`, `///`, `/* */`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    /// 1-based line the comment starts on
    pub line: usize,
}

/// A run of comments with nothing but whitespace (and no blank line) between them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub comments: Vec<CommentGroup>,
}

/// One loaded Rust module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Import path of the module (e.g. `widgets::shapes`)
    pub id: String,
    pub files: Vec<SourceFile>,
    pub symbols: SymbolTable,
    /// Paths named by the module's top-level `use` items
    pub imports: Vec<String>,
}

impl CompilationUnit {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            files: Vec::new(),
            symbols: SymbolTable::new(),
            imports: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_symbol(mut self, name: &str, kind: DeclKind) -> Self {
        self.symbols.insert(name, Symbol::new(kind, name));
        self
    }

    /// Every comment of every file, in file order
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.files
            .iter()
            .flat_map(|file| file.comments.iter())
            .flat_map(|group| group.comments.iter())
    }
}
