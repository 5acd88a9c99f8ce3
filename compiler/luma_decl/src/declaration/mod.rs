//! Declaration trees.
//!
//! A source file contributes one [`RootDeclaration`]: the global namespace,
//! the namespaces named by the dotted root name, and the file's
//! [`ModuleDeclaration`] at the bottom. Declarations are immutable; a changed
//! file gets a new tree.

use std::fmt;
use std::sync::Arc;

use luma_diagnostic::{Diagnostic, DiagnosticSink};
use luma_ir::Span;
use luma_parse::TreeId;

/// What a declaration declares.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeclarationKind {
    Namespace,
    /// A regular source file.
    Module,
    /// A source parsed as a script (may start with `#!`).
    Script,
    /// An interactive submission.
    Submission,
}

impl DeclarationKind {
    /// Module, script and submission declarations are the type-like ones.
    #[inline]
    pub fn is_type(self) -> bool {
        !matches!(self, DeclarationKind::Namespace)
    }
}

/// Where a declaration came from, without keeping the tree alive.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SyntaxReference {
    pub tree: TreeId,
    pub span: Span,
}

/// The declaration of one source file.
///
/// It has no child declarations: the unit of declaration is the whole file.
/// The global names it assigns are kept as `member_names`.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleDeclaration {
    pub(crate) name: Box<str>,
    pub(crate) kind: DeclarationKind,
    pub(crate) syntax: SyntaxReference,
    pub(crate) member_names: Box<[Box<str>]>,
    pub(crate) diagnostics: Arc<[Diagnostic]>,
}

impl ModuleDeclaration {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    #[inline]
    pub fn syntax(&self) -> SyntaxReference {
        self.syntax
    }

    /// Global names assigned at the top level, first occurrence first.
    #[inline]
    pub fn member_names(&self) -> &[Box<str>] {
        &self.member_names
    }

    /// Diagnostics of the tree the declaration was built from.
    #[inline]
    pub fn diagnostics(&self) -> &Arc<[Diagnostic]> {
        &self.diagnostics
    }

    /// Append this module's diagnostics to `sink`.
    pub fn report_diagnostics(&self, sink: &mut impl DiagnosticSink) {
        sink.report_all(self.diagnostics.iter().cloned());
    }
}

/// A namespace named by one segment of a dotted root name.
#[derive(Clone, Debug, PartialEq)]
pub struct NamespaceDeclaration {
    pub(crate) name: Box<str>,
    pub(crate) children: Box<[Declaration]>,
}

/// Any declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    Namespace(Arc<NamespaceDeclaration>),
    Module(Arc<ModuleDeclaration>),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Namespace(ns) => &ns.name,
            Declaration::Module(module) => &module.name,
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Namespace(_) => DeclarationKind::Namespace,
            Declaration::Module(module) => module.kind,
        }
    }

    pub fn children(&self) -> &[Declaration] {
        match self {
            Declaration::Namespace(ns) => &ns.children,
            Declaration::Module(_) => &[],
        }
    }

    /// Pre-order walk of this declaration and everything below it.
    pub fn descendants(&self) -> Vec<&Declaration> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(decl) = stack.pop() {
            out.push(decl);
            stack.extend(decl.children().iter().rev());
        }
        out
    }
}

/// Everything one source file declares.
#[derive(Clone, Debug, PartialEq)]
pub struct RootDeclaration {
    global: Declaration,
    module: Arc<ModuleDeclaration>,
}

impl RootDeclaration {
    /// Wrap `module` in the namespaces of `namespaces`, outermost first, and
    /// the unnamed global namespace.
    pub(crate) fn new(namespaces: &[&str], module: ModuleDeclaration) -> Self {
        let module = Arc::new(module);
        let mut decl = Declaration::Module(Arc::clone(&module));
        for name in namespaces.iter().rev().chain(std::iter::once(&"")) {
            decl = Declaration::Namespace(Arc::new(NamespaceDeclaration {
                name: (*name).into(),
                children: Box::new([decl]),
            }));
        }
        RootDeclaration {
            global: decl,
            module,
        }
    }

    /// The global namespace.
    #[inline]
    pub fn global(&self) -> &Declaration {
        &self.global
    }

    #[inline]
    pub fn module(&self) -> &Arc<ModuleDeclaration> {
        &self.module
    }

    /// Names of the named namespaces, outermost first.
    pub fn namespace_names(&self) -> impl Iterator<Item = &str> {
        self.global
            .descendants()
            .into_iter()
            .filter(|d| d.kind() == DeclarationKind::Namespace && !d.name().is_empty())
            .map(Declaration::name)
    }

    /// Names of the type-like declarations.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.global
            .descendants()
            .into_iter()
            .filter(|d| d.kind().is_type())
            .map(Declaration::name)
    }
}

impl fmt::Display for RootDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for name in self.namespace_names().chain(std::iter::once(self.module.name())) {
            if !first {
                f.write_str(".")?;
            }
            first = false;
            f.write_str(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
