//! The finish pass: imports, hierarchy and member types.
//!
//! Runs once every file has been walked, so a class may name any class of
//! the forest regardless of file order. Classes are finished first (imports,
//! then superclass and interfaces), then variables, then methods, whose
//! signatures are read off their already typed parameters.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use super::definition::{DefKind, Imports};
use super::ids::{DefId, NodeRef, ScopeId};
use super::maker::name_child;
use super::primitive::Primitive;
use super::table::SymbolTable;
use super::types::ClassType;
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};

impl SymbolTable {
    pub(crate) fn finish_definitions(&mut self) {
        let ids: Vec<DefId> = (0..self.defs.len()).map(|i| DefId(i as u32)).collect();
        let classes: Vec<DefId> = ids
            .iter()
            .copied()
            .filter(|&def| self.definition(def).is_class())
            .collect();

        for &class in &classes {
            self.finish_imports(class);
        }
        for &class in &classes {
            self.finish_hierarchy(class);
        }
        for &def in &ids {
            if self.definition(def).is_variable() {
                self.finish_variable(def);
            }
        }
        for &def in &ids {
            if self.definition(def).is_method() {
                self.finish_method(def);
            }
        }
    }

    // ========================================================================
    // IMPORTS
    // ========================================================================

    fn finish_imports(&mut self, class: DefId) {
        let pending = match self.definition_mut(class).as_class_mut() {
            Some(data) => std::mem::take(&mut data.pending_imports),
            None => return,
        };
        let mut imports = Imports {
            classes: IndexMap::new(),
            packages: self.config().implicit_imports.clone(),
        };

        for import in pending {
            let Some(tree) = self.tree(import.file).cloned() else {
                continue;
            };
            let Some(name) = name_child(&tree, import.node) else {
                continue;
            };
            let mut segments: Vec<&str> = tree
                .dotted_segments(name)
                .into_iter()
                .map(|s| tree.text(s))
                .collect();
            let on_demand = segments.last() == Some(&"*");
            if on_demand {
                segments.pop();
            }

            match (self.imported_type(&segments), on_demand) {
                (Some(ty), true) => {
                    for (simple, member) in self.member_classes(&ty) {
                        imports.classes.insert(simple, member);
                    }
                }
                (Some(ty), false) => {
                    if let Some(simple) = segments.last() {
                        imports.classes.insert(SmolStr::new(simple), ty.clone());
                    }
                    self.import_targets.insert(import, ty);
                }
                (None, true) => imports.packages.push(SmolStr::new(segments.join("."))),
                (None, false) => trace!(import = %segments.join("."), "unresolved import"),
            }
        }

        if let Some(data) = self.definition_mut(class).as_class_mut() {
            data.imports = imports;
        }
    }

    /// The class named by an import: the first prefix that is a class, with
    /// the remaining segments as member classes.
    fn imported_type(&self, segments: &[&str]) -> Option<ClassType> {
        for i in 0..segments.len() {
            if let Some(mut ty) = self.class_by_qualified_name(&segments[..=i].join(".")) {
                for segment in &segments[i + 1..] {
                    ty = self.member_class(&ty, segment)?;
                }
                return Some(ty);
            }
        }
        None
    }

    fn member_classes(&self, ty: &ClassType) -> Vec<(SmolStr, ClassType)> {
        match ty {
            ClassType::Declared(def) => self
                .definition(*def)
                .as_class()
                .map(|data| {
                    self.scope(data.scope)
                        .classes()
                        .map(|(name, class)| (name.clone(), ClassType::Declared(class)))
                        .collect()
                })
                .unwrap_or_default(),
            ClassType::External(class) => class
                .inner_classes()
                .iter()
                .filter_map(|inner| {
                    let loaded = self.cache().load(inner)?;
                    Some((SmolStr::new(loaded.simple_name()), ClassType::External(loaded)))
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    // ========================================================================
    // HIERARCHY
    // ========================================================================

    fn finish_hierarchy(&mut self, class: DefId) {
        let def = self.definition(class);
        let (Some(data), Some(node)) = (def.as_class(), def.node) else {
            return;
        };
        let Some(tree) = self.tree(node.file).cloned() else {
            return;
        };
        let scope = data.scope;
        let object = self.cache().object_type();

        let (superclass, interfaces) = if data.is_anonymous {
            let lookup_scope = def.parent.unwrap_or(scope);
            self.anonymous_supertypes(lookup_scope, &tree, node.node)
        } else {
            let extends = self.clause_types(scope, &tree, node.node, SyntaxKind::ExtendsClause);
            let implements = self.clause_types(scope, &tree, node.node, SyntaxKind::ImplementsClause);
            if data.is_interface {
                (object, resolved_only(extends))
            } else {
                let superclass = match extends.into_iter().next() {
                    Some((name, ty)) => ty.unwrap_or_else(|| ClassType::unknown(name)),
                    None => object,
                };
                (superclass, resolved_only(implements))
            }
        };

        if let ClassType::Declared(parent) = superclass {
            if let Some(parent) = self.definition_mut(parent).as_class_mut() {
                parent.subclasses.push(class);
            }
        }
        for iface in &interfaces {
            if let ClassType::Declared(iface) = iface {
                if let Some(iface) = self.definition_mut(*iface).as_class_mut() {
                    iface.implementors.push(class);
                }
            }
        }
        if let Some(data) = self.definition_mut(class).as_class_mut() {
            data.superclass = Some(superclass);
            data.interfaces = interfaces;
        }
    }

    /// `new T(..) { .. }` extends `T`, or implements it when `T` is an
    /// interface.
    fn anonymous_supertypes(
        &self,
        scope: ScopeId,
        tree: &SyntaxTree,
        new_node: NodeId,
    ) -> (ClassType, Vec<ClassType>) {
        let Some(type_node) = tree.significant_children(new_node).next() else {
            return (self.cache().object_type(), Vec::new());
        };
        let name = tree.dotted_name(type_node);
        match self.lookup_class(scope, &name) {
            Some(ty) if self.is_interface(&ty) => (self.cache().object_type(), vec![ty]),
            Some(ty) => (ty, Vec::new()),
            None => {
                trace!(%name, "anonymous supertype resolved to unknown");
                (ClassType::unknown(name), Vec::new())
            }
        }
    }

    /// Names listed in an `extends`, `implements` or `throws` clause, each
    /// with its resolution.
    fn clause_types(
        &self,
        scope: ScopeId,
        tree: &SyntaxTree,
        node: NodeId,
        clause: SyntaxKind,
    ) -> Vec<(String, Option<ClassType>)> {
        let Some(clause) = tree.child_of_kind(node, clause) else {
            return Vec::new();
        };
        tree.significant_children(clause)
            .filter(|&c| matches!(tree.kind(c), SyntaxKind::Ident | SyntaxKind::Dot))
            .map(|c| {
                let name = tree.dotted_name(c);
                let ty = self.lookup_class(scope, &name);
                (name, ty)
            })
            .collect()
    }

    // ========================================================================
    // MEMBERS
    // ========================================================================

    fn finish_variable(&mut self, var: DefId) {
        let def = self.definition(var);
        let ty = match (def.parent, def.node) {
            (Some(scope), Some(node)) => self.declared_type(scope, node),
            _ => None,
        }
        .unwrap_or_else(|| ClassType::unknown(def.name.clone()));

        if let Some(data) = self.definition_mut(var).as_variable_mut() {
            data.ty = Some(ty);
        }
    }

    fn finish_method(&mut self, method: DefId) {
        let def = self.definition(method);
        let DefKind::Method(data) = &def.kind else {
            return;
        };
        let owner = def
            .parent
            .and_then(|scope| self.scope(scope).owner)
            .map(ClassType::Declared);

        let return_type = if data.is_constructor {
            owner.unwrap_or_else(|| ClassType::unknown(def.name.clone()))
        } else {
            let scope = data.scope.or(def.parent);
            match (scope, def.node) {
                (Some(scope), Some(node)) => self.declared_type(scope, node),
                _ => None,
            }
            .unwrap_or_else(|| ClassType::unknown(def.name.clone()))
        };

        let signature = data
            .params
            .iter()
            .map(|&param| {
                let param = self.definition(param);
                param
                    .as_variable()
                    .and_then(|v| v.ty.clone())
                    .unwrap_or_else(|| ClassType::unknown(param.name.clone()))
            })
            .collect();

        let exceptions = match (data.scope, def.node) {
            (Some(scope), Some(node)) => self
                .tree(node.file)
                .map(|tree| {
                    self.clause_types(scope, tree, node.node, SyntaxKind::ThrowsClause)
                        .into_iter()
                        .map(|(name, ty)| ty.unwrap_or_else(|| ClassType::unknown(name)))
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        if let Some(data) = self.definition_mut(method).as_method_mut() {
            data.return_type = Some(return_type);
            data.signature = signature;
            data.exceptions = exceptions;
        }
    }

    /// The type written in the `Type` child of a declaration.
    fn declared_type(&self, scope: ScopeId, node: NodeRef) -> Option<ClassType> {
        let tree = self.tree(node.file)?;
        let type_node = tree.child_of_kind(node.node, SyntaxKind::Type)?;
        Some(self.type_of(scope, tree, type_node))
    }

    /// Resolve a type expression without recording references.
    pub(crate) fn type_of(&self, scope: ScopeId, tree: &SyntaxTree, node: NodeId) -> ClassType {
        match tree.kind(node) {
            SyntaxKind::Type => match type_name(tree, node) {
                Some(inner) => self.type_of(scope, tree, inner),
                None => ClassType::unknown(tree.text(node)),
            },
            SyntaxKind::ArrayDeclarator => match type_name(tree, node) {
                Some(inner) => ClassType::array_of(self.type_of(scope, tree, inner)),
                None => ClassType::unknown(tree.text(node)),
            },
            SyntaxKind::Ident | SyntaxKind::Dot => {
                let name = tree.dotted_name(node);
                self.lookup_class(scope, &name).unwrap_or_else(|| {
                    trace!(%name, "type resolved to unknown");
                    ClassType::unknown(name)
                })
            }
            kind => match Primitive::from_keyword(kind) {
                Some(primitive) => ClassType::Primitive(primitive),
                None => ClassType::unknown(tree.text(node)),
            },
        }
    }
}

/// The element or name child of a `Type` or `ArrayDeclarator`, skipping
/// type arguments and annotations.
pub(crate) fn type_name(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.significant_children(node).find(|&c| {
        !matches!(
            tree.kind(c),
            SyntaxKind::TypeArguments | SyntaxKind::Annotation
        )
    })
}

fn resolved_only(types: Vec<(String, Option<ClassType>)>) -> Vec<ClassType> {
    types
        .into_iter()
        .filter_map(|(name, ty)| {
            if ty.is_none() {
                trace!(%name, "unresolved interface skipped");
            }
            ty
        })
        .collect()
}
