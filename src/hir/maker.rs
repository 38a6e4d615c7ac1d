//! The definition walk.
//!
//! One pass per file creates packages, classes, methods, variables, labels
//! and block scopes. Nothing is resolved here: types, hierarchy and imports
//! are filled in by the finish pass once every file has been walked.

use std::sync::Arc;

use smol_str::SmolStr;

use super::definition::{ClassData, DefKind, Definition, Imports, MethodData, VariableData};
use super::ids::{DefId, NodeRef, ScopeId};
use super::scope::{Scope, ScopeKind};
use super::signature::Signature;
use super::table::{Entity, SymbolTable};
use crate::base::{FileId, Occurrence};
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};

pub(crate) struct TableMaker<'t> {
    table: &'t mut SymbolTable,
    file: FileId,
    tree: Arc<SyntaxTree>,
    stack: Vec<ScopeId>,
}

impl<'t> TableMaker<'t> {
    pub(crate) fn new(table: &'t mut SymbolTable, file: FileId, tree: Arc<SyntaxTree>) -> Self {
        Self {
            table,
            file,
            tree,
            stack: Vec::new(),
        }
    }

    fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::ROOT)
    }

    fn node_ref(&self, node: NodeId) -> NodeRef {
        NodeRef::new(self.file, node)
    }

    pub(crate) fn walk_file(mut self) {
        let tree = Arc::clone(&self.tree);
        let root = tree.root();

        let imports = tree
            .children(root)
            .filter(|&c| tree.kind(c) == SyntaxKind::Import)
            .collect();
        self.table.file_imports.insert(self.file, imports);

        let package = match tree.child_of_kind(root, SyntaxKind::PackageDef) {
            Some(node) => {
                let mut segments: Vec<SmolStr> = name_child(&tree, node)
                    .map(|name| {
                        tree.dotted_segments(name)
                            .into_iter()
                            .map(|s| SmolStr::new(tree.text(s)))
                            .collect()
                    })
                    .unwrap_or_default();
                if segments.is_empty() {
                    segments.push(SmolStr::default());
                }
                self.package_scope(&segments, Some(node))
            }
            // Files without a package declaration share a package named
            // after their directory.
            None => self.package_scope(&[SmolStr::new(tree.parent_dir())], None),
        };
        self.table.file_packages.insert(self.file, package);

        self.stack.push(package);
        for child in tree.children(root) {
            if tree.kind(child).is_type_decl() {
                self.walk(child, false);
            }
        }
        self.stack.pop();
    }

    /// Find or create the nested package scopes for `segments`.
    fn package_scope(&mut self, segments: &[SmolStr], node: Option<NodeId>) -> ScopeId {
        let mut scope = ScopeId::ROOT;
        let mut qualified: Vec<&str> = Vec::new();
        let mut last = None;

        for segment in segments {
            qualified.push(segment);
            let existing = self
                .table
                .scope(scope)
                .package(segment)
                .map(|def| (def, self.table.definition(def).own_scope()));
            (scope, last) = match existing {
                Some((def, Some(inner))) => (inner, Some(def)),
                _ => {
                    let inner = self
                        .table
                        .alloc_scope(Scope::new(ScopeKind::Package, None, Some(scope)));
                    let def = self.table.alloc_def(Definition::new(
                        segment.clone(),
                        DefKind::Package(inner),
                        Some(scope),
                    ));
                    self.table.scope_mut(inner).owner = Some(def);
                    self.table.scope_mut(scope).packages.insert(segment.clone(), def);
                    self.table.packages.insert(SmolStr::new(qualified.join(".")), def);
                    (inner, Some(def))
                }
            };
        }

        if let (Some(def), Some(node)) = (last, node) {
            let node = self.node_ref(node);
            self.table.definition_mut(def).node.get_or_insert(node);
        }
        scope
    }

    fn walk(&mut self, node: NodeId, in_slist: bool) {
        let tree = Arc::clone(&self.tree);
        match tree.kind(node) {
            SyntaxKind::ClassDef | SyntaxKind::InterfaceDef => self.class(node),
            SyntaxKind::MethodDef | SyntaxKind::CtorDef => self.method(node),
            SyntaxKind::VariableDef => {
                self.variable(node, false);
                if let Some(init) = tree.child_of_kind(node, SyntaxKind::Assign) {
                    self.walk_children(init, false);
                }
            }
            SyntaxKind::New => self.new_expr(node),
            SyntaxKind::Labeled => self.labeled(node),
            SyntaxKind::Slist if in_slist => {
                self.enter_block(node);
                self.walk_children(node, true);
                self.leave();
            }
            SyntaxKind::Slist => self.walk_children(node, true),
            SyntaxKind::If => self.if_statement(node),
            SyntaxKind::Try => {
                self.enter_block(node);
                if let Some(body) = tree.child_of_kind(node, SyntaxKind::Slist) {
                    self.walk(body, false);
                }
                self.leave();
                for child in tree.children(node) {
                    if matches!(tree.kind(child), SyntaxKind::Catch | SyntaxKind::Finally) {
                        self.walk(child, false);
                    }
                }
            }
            SyntaxKind::Catch => {
                self.enter_block(node);
                if let Some(param) = tree.child_of_kind(node, SyntaxKind::ParameterDef) {
                    self.variable(param, true);
                }
                if let Some(body) = tree.child_of_kind(node, SyntaxKind::Slist) {
                    self.walk(body, false);
                }
                self.leave();
            }
            SyntaxKind::For
            | SyntaxKind::While
            | SyntaxKind::Do
            | SyntaxKind::Switch
            | SyntaxKind::Synchronized
            | SyntaxKind::Finally
            | SyntaxKind::StaticInit
            | SyntaxKind::InstanceInit
            | SyntaxKind::Assert => {
                self.enter_block(node);
                self.walk_children(node, false);
                self.leave();
            }
            SyntaxKind::Import | SyntaxKind::PackageDef | SyntaxKind::ParameterDef => {}
            _ => self.walk_children(node, false),
        }
    }

    fn walk_children(&mut self, node: NodeId, in_slist: bool) {
        let tree = Arc::clone(&self.tree);
        for child in tree.children(node) {
            self.walk(child, in_slist);
        }
    }

    // ========================================================================
    // SCOPES
    // ========================================================================

    fn open_scope(&mut self, kind: ScopeKind, owner: Option<DefId>, node: NodeId) -> ScopeId {
        let span = self.table.node_table(self.file).and_then(|t| t.span(node));
        let mut scope = Scope::new(kind, owner, Some(self.current()));
        scope.file = Some(self.file);
        scope.node = Some(self.node_ref(node));
        scope.span = span;

        let id = self.table.alloc_scope(scope);
        if let Some(span) = span {
            self.table.scope_index.register(self.file, span, id);
        }
        id
    }

    fn enter_block(&mut self, node: NodeId) {
        let scope = self.open_scope(ScopeKind::Block, None, node);
        self.table.entities.push(Entity::Block(scope));
        self.stack.push(scope);
    }

    fn leave(&mut self) {
        self.stack.pop();
    }

    /// The then-branch shares a block with the condition; `else` gets its
    /// own, and `else if` chains recurse at the same level.
    fn if_statement(&mut self, node: NodeId) {
        let tree = Arc::clone(&self.tree);
        let else_branch = tree.child_of_kind(node, SyntaxKind::Else);

        self.enter_block(node);
        for child in tree.children(node).filter(|&c| Some(c) != else_branch) {
            self.walk(child, false);
        }
        self.leave();

        let Some(else_branch) = else_branch else {
            return;
        };
        match tree.significant_children(else_branch).next() {
            Some(inner) if tree.kind(inner) == SyntaxKind::If => self.if_statement(inner),
            _ => {
                self.enter_block(else_branch);
                self.walk_children(else_branch, false);
                self.leave();
            }
        }
    }

    // ========================================================================
    // DEFINITIONS
    // ========================================================================

    fn define(&mut self, name: SmolStr, kind: DefKind, node: NodeId, name_node: Option<NodeId>) -> DefId {
        let mut def = Definition::new(name, kind, Some(self.current()));
        def.node = Some(self.node_ref(node));
        if let Some(name_node) = name_node {
            def.name_node = Some(self.node_ref(name_node));
            def.occurrence = Some(Occurrence::new(self.file, self.tree.position(name_node)));
        }
        self.table.alloc_def(def)
    }

    fn class(&mut self, node: NodeId) {
        let tree = Arc::clone(&self.tree);
        let Some(name_node) = tree.child_of_kind(node, SyntaxKind::Ident) else {
            return;
        };
        let name = SmolStr::new(tree.text(name_node));
        let is_interface = tree.kind(node) == SyntaxKind::InterfaceDef;
        let enclosing = self.current();

        let data = self.class_data(is_interface, false);
        let def = self.define(name.clone(), DefKind::Class(data), node, Some(name_node));
        let scope = self.open_scope(ScopeKind::Class, Some(def), node);
        if let Some(data) = self.table.definition_mut(def).as_class_mut() {
            data.scope = scope;
        }
        self.table.scope_mut(enclosing).classes.insert(name.clone(), def);
        let qualified = self.table.qualified_name(def);
        self.table.class_index.insert(SmolStr::new(qualified), def);
        self.table.entities.push(Entity::Class(def));

        self.stack.push(scope);
        if !is_interface {
            self.default_constructor(def, scope, name, node);
        }
        if let Some(body) = tree.child_of_kind(node, SyntaxKind::ObjBlock) {
            self.walk_children(body, false);
        }
        self.stack.pop();
    }

    fn class_data(&self, is_interface: bool, is_anonymous: bool) -> ClassData {
        let pending_imports = self
            .table
            .file_imports
            .get(&self.file)
            .map(|imports| imports.iter().map(|&n| self.node_ref(n)).collect())
            .unwrap_or_default();
        ClassData {
            scope: ScopeId::ROOT,
            is_interface,
            is_anonymous,
            superclass: None,
            interfaces: Vec::new(),
            subclasses: Vec::new(),
            implementors: Vec::new(),
            imports: Imports::default(),
            pending_imports,
            default_ctor: None,
        }
    }

    /// The implicit no-argument constructor, present until an explicit
    /// constructor is declared.
    fn default_constructor(&mut self, class: DefId, scope: ScopeId, name: SmolStr, node: NodeId) {
        let mut ctor = Definition::new(name.clone(), DefKind::Method(method_data(true, true)), Some(scope));
        ctor.node = Some(self.node_ref(node));
        let ctor = self.table.alloc_def(ctor);
        self.table.scope_mut(scope).add_method(name, ctor);
        if let Some(data) = self.table.definition_mut(class).as_class_mut() {
            data.default_ctor = Some(ctor);
        }
    }

    fn anonymous_class(&mut self, new_node: NodeId, body: NodeId) {
        self.table.anonymous_classes += 1;
        let name = SmolStr::new(format!("${}", self.table.anonymous_classes));

        let data = self.class_data(false, true);
        let def = self.define(name, DefKind::Class(data), new_node, None);
        let scope = self.open_scope(ScopeKind::Class, Some(def), body);
        if let Some(data) = self.table.definition_mut(def).as_class_mut() {
            data.scope = scope;
        }
        self.table.entities.push(Entity::Class(def));

        self.stack.push(scope);
        self.walk_children(body, false);
        self.stack.pop();
    }

    fn method(&mut self, node: NodeId) {
        let tree = Arc::clone(&self.tree);
        let Some(name_node) = tree.child_of_kind(node, SyntaxKind::Ident) else {
            return;
        };
        let name = SmolStr::new(tree.text(name_node));
        let is_constructor = tree.kind(node) == SyntaxKind::CtorDef;
        let class_scope = self.current();

        let def = self.define(
            name.clone(),
            DefKind::Method(method_data(is_constructor, false)),
            node,
            Some(name_node),
        );
        self.drop_default_constructor(class_scope, &name);
        self.table.scope_mut(class_scope).add_method(name, def);
        self.table.entities.push(Entity::Method(def));

        let scope = self.open_scope(ScopeKind::Method, Some(def), node);
        self.stack.push(scope);

        let mut params = Vec::new();
        if let Some(list) = tree.child_of_kind(node, SyntaxKind::Parameters) {
            for param in tree.children(list) {
                if tree.kind(param) == SyntaxKind::ParameterDef {
                    params.extend(self.variable(param, true));
                }
            }
        }
        if let Some(data) = self.table.definition_mut(def).as_method_mut() {
            data.scope = Some(scope);
            data.params = params;
        }

        if let Some(body) = tree.child_of_kind(node, SyntaxKind::Slist) {
            self.walk(body, false);
        }
        self.stack.pop();
    }

    fn drop_default_constructor(&mut self, class_scope: ScopeId, name: &str) {
        let Some(class) = self.table.scope(class_scope).owner else {
            return;
        };
        if self.table.definition(class).name() != name {
            return;
        }
        let ctor = self
            .table
            .definition_mut(class)
            .as_class_mut()
            .and_then(|data| data.default_ctor.take());
        if let Some(ctor) = ctor {
            self.table.scope_mut(class_scope).remove_method(name, ctor);
        }
    }

    fn variable(&mut self, node: NodeId, is_parameter: bool) -> Option<DefId> {
        let name_node = self.tree.child_of_kind(node, SyntaxKind::Ident)?;
        let name = SmolStr::new(self.tree.text(name_node));
        let data = VariableData {
            ty: None,
            is_parameter,
        };
        let def = self.define(name.clone(), DefKind::Variable(data), node, Some(name_node));
        let scope = self.current();
        self.table.scope_mut(scope).variables.insert(name, def);
        self.table.entities.push(Entity::Variable(def));
        Some(def)
    }

    fn labeled(&mut self, node: NodeId) {
        let tree = Arc::clone(&self.tree);
        let Some(name_node) = tree.child_of_kind(node, SyntaxKind::Ident) else {
            return;
        };
        let name = SmolStr::new(tree.text(name_node));
        let def = self.define(name.clone(), DefKind::Label, node, Some(name_node));
        let scope = self.current();
        self.table.scope_mut(scope).labels.insert(name, def);
        self.table.entities.push(Entity::Label(def));

        if let Some(body) = tree.next_significant_sibling(name_node) {
            self.walk(body, true);
        }
    }

    /// Arguments are walked in place; a class body becomes an anonymous
    /// class scope.
    fn new_expr(&mut self, node: NodeId) {
        let tree = Arc::clone(&self.tree);
        let body = tree.child_of_kind(node, SyntaxKind::ObjBlock);
        let type_name = tree.significant_children(node).next();
        for child in tree.children(node) {
            if Some(child) != body && Some(child) != type_name {
                self.walk(child, false);
            }
        }
        if let Some(body) = body {
            self.anonymous_class(node, body);
        }
    }
}

/// The `Ident` or `Dot` naming a package or import.
pub(crate) fn name_child(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.significant_children(node)
        .find(|&c| matches!(tree.kind(c), SyntaxKind::Ident | SyntaxKind::Dot))
}

fn method_data(is_constructor: bool, is_synthetic: bool) -> MethodData {
    MethodData {
        scope: None,
        is_constructor,
        is_synthetic,
        params: Vec::new(),
        signature: Signature::empty(),
        return_type: None,
        exceptions: Vec::new(),
    }
}
