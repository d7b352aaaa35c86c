//! Top-level item collection from a parsed source file

use quote::quote;
use syn::{Generics, Ident, Item, ItemMod, UseTree};

use typereg_core::{DeclKind, Symbol};

/// A `mod` item found at the top level of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDecl {
    pub name: String,
    /// Value of a `#[path = "..."]` attribute, if any
    pub path_attr: Option<String>,
    /// `mod name { ... }` rather than `mod name;`
    pub inline: bool,
}

/// What a file contributes to its module's scope
#[derive(Debug, Clone, Default)]
pub struct FileSummary {
    pub symbols: Vec<(String, Symbol)>,
    pub imports: Vec<String>,
    pub modules: Vec<ModuleDecl>,
}

impl FileSummary {
    fn declare(&mut self, ident: &Ident, kind: DeclKind) {
        let name = ident.to_string();
        if name != "_" {
            self.symbols.push((name.clone(), Symbol::new(kind, name)));
        }
    }

    fn declare_generic(&mut self, ident: &Ident, generics: &Generics, kind: DeclKind) {
        let ident_form = if generics.params.is_empty() {
            ident.to_string()
        } else {
            quote!(#ident #generics).to_string()
        };
        self.symbols.push((ident.to_string(), Symbol::new(kind, ident_form)));
    }
}

/// Collect the names a file declares at its top level.
///
/// Items nested in functions, impls or inline modules are not part of the
/// result; an inline module contributes only its own name.
pub fn summarize(file: &syn::File) -> FileSummary {
    let mut summary = FileSummary::default();

    for item in &file.items {
        match item {
            Item::Struct(item) => {
                summary.declare_generic(&item.ident, &item.generics, DeclKind::Struct)
            }
            Item::Enum(item) => {
                summary.declare_generic(&item.ident, &item.generics, DeclKind::Enum)
            }
            Item::Union(item) => {
                summary.declare_generic(&item.ident, &item.generics, DeclKind::Union)
            }
            Item::Type(item) => {
                summary.declare_generic(&item.ident, &item.generics, DeclKind::TypeAlias)
            }
            Item::Trait(item) => summary.declare(&item.ident, DeclKind::Trait),
            Item::TraitAlias(item) => summary.declare(&item.ident, DeclKind::Trait),
            Item::Fn(item) => summary.declare(&item.sig.ident, DeclKind::Function),
            Item::Static(item) => summary.declare(&item.ident, DeclKind::Static),
            Item::Const(item) => summary.declare(&item.ident, DeclKind::Constant),
            Item::Macro(item) => {
                if let Some(ident) = &item.ident {
                    summary.declare(ident, DeclKind::Macro);
                }
            }
            Item::ExternCrate(item) => {
                let ident = item.rename.as_ref().map_or(&item.ident, |(_, rename)| rename);
                summary.declare(ident, DeclKind::ExternCrate);
            }
            Item::ForeignMod(foreign) => {
                for foreign_item in &foreign.items {
                    match foreign_item {
                        syn::ForeignItem::Fn(f) => {
                            summary.declare(&f.sig.ident, DeclKind::Function)
                        }
                        syn::ForeignItem::Static(s) => summary.declare(&s.ident, DeclKind::Static),
                        _ => {}
                    }
                }
            }
            Item::Mod(item) => {
                summary.declare(&item.ident, DeclKind::Module);
                summary.modules.push(module_decl(item));
            }
            Item::Use(item) => {
                let root = if item.leading_colon.is_some() {
                    vec![String::new()]
                } else {
                    Vec::new()
                };
                collect_use(&item.tree, root, &mut summary);
            }
            _ => {}
        }
    }

    summary
}

fn module_decl(item: &ItemMod) -> ModuleDecl {
    let path_attr = item.attrs.iter().find_map(|attr| {
        if !attr.path().is_ident("path") {
            return None;
        }
        match &attr.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(value),
                        ..
                    }),
                ..
            }) => Some(value.value()),
            _ => None,
        }
    });

    ModuleDecl {
        name: item.ident.to_string(),
        path_attr,
        inline: item.content.is_some(),
    }
}

fn collect_use(tree: &UseTree, prefix: Vec<String>, summary: &mut FileSummary) {
    let joined = |last: &str| {
        let mut segments = prefix.clone();
        segments.push(last.to_string());
        segments.join("::")
    };

    match tree {
        UseTree::Path(path) => {
            let mut next = prefix.clone();
            next.push(path.ident.to_string());
            collect_use(&path.tree, next, summary);
        }
        UseTree::Name(name) if name.ident == "self" => {
            // `use a::b::{self}` binds `b`
            if let Some(last) = prefix.last().filter(|s| !s.is_empty()) {
                summary
                    .symbols
                    .push((last.clone(), Symbol::new(DeclKind::Import, last.clone())));
                summary.imports.push(prefix.join("::"));
            }
        }
        UseTree::Name(name) => {
            summary.declare(&name.ident, DeclKind::Import);
            summary.imports.push(joined(&name.ident.to_string()));
        }
        UseTree::Rename(rename) => {
            summary.declare(&rename.rename, DeclKind::Import);
            summary.imports.push(joined(&rename.ident.to_string()));
        }
        UseTree::Glob(_) => summary.imports.push(joined("*")),
        UseTree::Group(group) => {
            for item in &group.items {
                collect_use(item, prefix.clone(), summary);
            }
        }
    }
}
