//! Declared definitions and the references that point at them.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::ids::{NodeRef, ScopeId};
use super::signature::Signature;
use super::types::{ClassType, Symbol};
use crate::base::Occurrence;

/// A resolved use site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// Where the name was written.
    pub occurrence: Occurrence,
    /// The name token, when the reference comes from a tree node.
    pub node: Option<NodeRef>,
    /// What the name resolved to.
    pub target: Symbol,
}

/// Imports visible to a class.
#[derive(Clone, Debug, Default)]
pub struct Imports {
    /// Single-type imports, keyed by simple name.
    pub classes: IndexMap<SmolStr, ClassType>,
    /// On-demand imports, by qualified package name. Implicit imports first.
    pub packages: Vec<SmolStr>,
}

/// Class-specific data.
#[derive(Clone, Debug)]
pub struct ClassData {
    /// The class body scope.
    pub scope: ScopeId,
    pub is_interface: bool,
    pub is_anonymous: bool,
    /// `None` until the finish pass runs.
    pub superclass: Option<ClassType>,
    pub interfaces: Vec<ClassType>,
    /// Back-references only.
    pub subclasses: Vec<super::ids::DefId>,
    /// Back-references only.
    pub implementors: Vec<super::ids::DefId>,
    pub imports: Imports,
    /// Import nodes of the declaring file, processed by the finish pass.
    pub(crate) pending_imports: Vec<NodeRef>,
    /// The synthesized no-argument constructor while no explicit one exists.
    pub default_ctor: Option<super::ids::DefId>,
}

/// Method and constructor data.
#[derive(Clone, Debug)]
pub struct MethodData {
    /// Body scope; `None` for the synthesized default constructor.
    pub scope: Option<ScopeId>,
    pub is_constructor: bool,
    pub is_synthetic: bool,
    pub params: Vec<super::ids::DefId>,
    pub signature: Signature,
    /// Declared return type; the enclosing class for constructors.
    pub return_type: Option<ClassType>,
    pub exceptions: Vec<ClassType>,
}

/// Variable data (fields, locals, parameters).
#[derive(Clone, Debug, Default)]
pub struct VariableData {
    /// `None` until the finish pass runs.
    pub ty: Option<ClassType>,
    pub is_parameter: bool,
}

/// What a definition declares.
#[derive(Clone, Debug)]
pub enum DefKind {
    Package(ScopeId),
    Class(ClassData),
    Method(MethodData),
    Variable(VariableData),
    Label,
}

/// A named declaration in the analysed source.
#[derive(Clone, Debug)]
pub struct Definition {
    pub(crate) name: SmolStr,
    pub(crate) kind: DefKind,
    /// The scope this definition is registered in.
    pub(crate) parent: Option<ScopeId>,
    /// The declaring node (class, method, variable, label or package node).
    pub(crate) node: Option<NodeRef>,
    /// The name token of the declaration.
    pub(crate) name_node: Option<NodeRef>,
    pub(crate) occurrence: Option<Occurrence>,
    pub(crate) references: Vec<Reference>,
}

impl Definition {
    pub(crate) fn new(name: impl Into<SmolStr>, kind: DefKind, parent: Option<ScopeId>) -> Self {
        Self {
            name: name.into(),
            kind,
            parent,
            node: None,
            name_node: None,
            occurrence: None,
            references: Vec::new(),
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn kind(&self) -> &DefKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn node(&self) -> Option<NodeRef> {
        self.node
    }

    pub fn name_node(&self) -> Option<NodeRef> {
        self.name_node
    }

    /// Position of the declaring name token.
    pub fn occurrence(&self) -> Option<Occurrence> {
        self.occurrence
    }

    /// Use sites resolved to this definition, in resolution order.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    pub fn as_class(&self) -> Option<&ClassData> {
        match &self.kind {
            DefKind::Class(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodData> {
        match &self.kind {
            DefKind::Method(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableData> {
        match &self.kind {
            DefKind::Variable(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn as_class_mut(&mut self) -> Option<&mut ClassData> {
        match &mut self.kind {
            DefKind::Class(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn as_method_mut(&mut self) -> Option<&mut MethodData> {
        match &mut self.kind {
            DefKind::Method(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn as_variable_mut(&mut self) -> Option<&mut VariableData> {
        match &mut self.kind {
            DefKind::Variable(data) => Some(data),
            _ => None,
        }
    }

    /// The scope this definition opens, if any.
    pub fn own_scope(&self) -> Option<ScopeId> {
        match &self.kind {
            DefKind::Package(scope) => Some(*scope),
            DefKind::Class(data) => Some(data.scope),
            DefKind::Method(data) => data.scope,
            DefKind::Variable(_) | DefKind::Label => None,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, DefKind::Class(_))
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, DefKind::Method(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind, DefKind::Variable(_))
    }

    /// Synthesized default constructors and anonymous classes have no name
    /// in source.
    pub fn is_synthetic(&self) -> bool {
        match &self.kind {
            DefKind::Method(data) => data.is_synthetic,
            DefKind::Class(data) => data.is_anonymous,
            _ => false,
        }
    }
}
