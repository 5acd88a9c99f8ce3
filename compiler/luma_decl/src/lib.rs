//! Declarations of Luma source files and the persistent table that
//! aggregates them across a compilation.
//!
//! ```text
//! SyntaxTree --DeclarationBuilder--> RootDeclaration --> DeclarationTable
//! ```
//!
//! A file declares one module (or script, or submission) nested in the
//! namespaces of its dotted root name. The [`DeclarationTable`] keeps one
//! root declaration per file and answers merged name queries; it is an
//! immutable value, published to other threads through
//! [`SharedDeclarationTable`].

mod builder;
mod declaration;
mod shared;
mod table;

pub use builder::DeclarationBuilder;
pub use declaration::{
    Declaration, DeclarationKind, ModuleDeclaration, NamespaceDeclaration, RootDeclaration,
    SyntaxReference,
};
pub use shared::SharedDeclarationTable;
pub use table::{DeclarationTable, LazyRootDeclaration, NameSet};
