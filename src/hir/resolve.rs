//! The reference walk.
//!
//! Visits every definition and block recorded by the table maker, in
//! discovery order, and binds each name token to what it denotes. Binding a
//! meaningful token to a resolved symbol records one [`Reference`]; a token
//! is referenced at most once, and declaration names never are.
//!
//! Expressions are typed along the way, since method overloads are chosen by
//! the types of their arguments.

use std::sync::Arc;

use tracing::trace;

use super::definition::Reference;
use super::external::CLASS;
use super::finish::type_name;
use super::ids::{DefId, NodeRef, ScopeId};
use super::maker::name_child;
use super::primitive::Primitive;
use super::signature::Signature;
use super::table::{Entity, SymbolTable};
use super::types::{ClassType, Symbol};
use crate::base::FileId;
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};

/// Where an expression is resolved.
struct Site {
    file: FileId,
    tree: Arc<SyntaxTree>,
    scope: ScopeId,
}

/// A partially resolved dotted name.
enum Qualifier {
    /// An expression of the given type.
    Value(ClassType),
    /// A class name.
    Type(ClassType),
    /// Leading segments that did not resolve yet, presumably a package.
    Pending(String, Vec<NodeId>),
}

pub(crate) struct Resolver<'t> {
    table: &'t mut SymbolTable,
}

impl<'t> Resolver<'t> {
    pub(crate) fn new(table: &'t mut SymbolTable) -> Self {
        Self { table }
    }

    pub(crate) fn resolve(mut self) {
        self.bind_imports();

        let entities = std::mem::take(&mut self.table.entities);
        for entity in &entities {
            match *entity {
                Entity::Class(def) => self.class(def),
                Entity::Method(def) => self.method(def),
                Entity::Variable(def) => self.variable(def),
                Entity::Label(def) => self.label(def),
                Entity::Block(scope) => self.block(scope),
            }
        }
        self.table.entities = entities;
    }

    // ========================================================================
    // BINDING
    // ========================================================================

    fn bind(&mut self, file: FileId, node: NodeId, symbol: Symbol) {
        let Some(nodes) = self.table.node_table_mut(file) else {
            return;
        };
        let info = nodes.info_mut(node);
        let record = info.meaningful && !info.declares && !info.referenced && !symbol.is_unknown();
        if info.symbol.is_none() {
            info.symbol = Some(symbol.clone());
        }
        if !record {
            return;
        }
        info.referenced = true;
        let occurrence = nodes.occurrence(node);
        self.table.add_reference(Reference {
            occurrence,
            node: Some(NodeRef::new(file, node)),
            target: symbol,
        });
    }

    fn bind_unknown(&mut self, site: &Site, node: NodeId, name: &str) -> ClassType {
        trace!(name, file = ?site.file, "name resolved to unknown");
        self.bind(site.file, node, Symbol::unknown(name));
        ClassType::unknown(name)
    }

    /// Bind a declaration's own name token. Never a reference.
    fn declare(&mut self, def: DefId) {
        let Some(name) = self.table.definition(def).name_node() else {
            return;
        };
        let symbol = Symbol::of_definition(self.table, def);
        if let Some(nodes) = self.table.node_table_mut(name.file) {
            let info = nodes.info_mut(name.node);
            info.declares = true;
            info.symbol = Some(symbol);
        }
    }

    fn set_meaningful(&mut self, file: FileId, node: NodeId, meaningful: bool) {
        if let Some(nodes) = self.table.node_table_mut(file) {
            nodes.info_mut(node).meaningful = meaningful;
        }
    }

    /// An import's final segment names a class even though the rest of the
    /// import is not a name use.
    fn bind_imports(&mut self) {
        let mut targets: Vec<(NodeRef, ClassType)> = self
            .table
            .import_targets
            .iter()
            .map(|(node, ty)| (*node, ty.clone()))
            .collect();
        targets.sort_by_key(|(node, _)| *node);

        for (import, ty) in targets {
            let Some(tree) = self.table.tree(import.file).cloned() else {
                continue;
            };
            let Some(last) = name_child(&tree, import.node)
                .and_then(|name| tree.dotted_segments(name).last().copied())
            else {
                continue;
            };
            self.set_meaningful(import.file, last, true);
            self.bind(import.file, last, Symbol::Class(ty));
        }
    }

    fn site_of(&self, def: DefId, scope: Option<ScopeId>) -> Option<Site> {
        let d = self.table.definition(def);
        let node = d.node()?;
        let scope = scope.or(d.parent())?;
        Some(Site {
            file: node.file,
            tree: Arc::clone(self.table.tree(node.file)?),
            scope,
        })
    }

    // ========================================================================
    // ENTITIES
    // ========================================================================

    fn class(&mut self, def: DefId) {
        let Some(data) = self.table.definition(def).as_class() else {
            return;
        };
        if data.is_anonymous {
            return;
        }
        let scope = data.scope;
        self.declare(def);

        let (Some(site), Some(node)) = (self.site_of(def, Some(scope)), self.table.definition(def).node())
        else {
            return;
        };
        let tree = Arc::clone(&site.tree);
        for clause in [SyntaxKind::ExtendsClause, SyntaxKind::ImplementsClause] {
            let Some(clause) = tree.child_of_kind(node.node, clause) else {
                continue;
            };
            for name in tree.significant_children(clause) {
                self.class_path(&site, name);
            }
        }
    }

    fn method(&mut self, def: DefId) {
        let Some(data) = self.table.definition(def).as_method() else {
            return;
        };
        if data.is_synthetic {
            return;
        }
        let scope = data.scope;
        self.declare(def);

        let (Some(site), Some(node)) = (self.site_of(def, scope), self.table.definition(def).node()) else {
            return;
        };
        let tree = Arc::clone(&site.tree);
        if let Some(ty) = tree.child_of_kind(node.node, SyntaxKind::Type) {
            self.resolve_type(&site, ty);
        }
        if let Some(throws) = tree.child_of_kind(node.node, SyntaxKind::ThrowsClause) {
            for name in tree.significant_children(throws) {
                self.class_path(&site, name);
            }
        }
        if let Some(body) = tree.child_of_kind(node.node, SyntaxKind::Slist) {
            self.statements(&site, body);
        }
    }

    fn variable(&mut self, def: DefId) {
        self.declare(def);
        let (Some(site), Some(node)) = (self.site_of(def, None), self.table.definition(def).node()) else {
            return;
        };
        let tree = Arc::clone(&site.tree);
        if let Some(ty) = tree.child_of_kind(node.node, SyntaxKind::Type) {
            self.resolve_type(&site, ty);
        }
        if let Some(init) = tree.child_of_kind(node.node, SyntaxKind::Assign) {
            for value in tree.significant_children(init) {
                self.expr(&site, value);
            }
        }
    }

    fn label(&mut self, def: DefId) {
        self.declare(def);
    }

    fn block(&mut self, scope: ScopeId) {
        let s = self.table.scope(scope);
        let (Some(file), Some(node)) = (s.file(), s.node()) else {
            return;
        };
        let Some(tree) = self.table.tree(file).cloned() else {
            return;
        };
        let site = Site { file, tree, scope };
        let tree = Arc::clone(&site.tree);

        if tree.kind(node.node) == SyntaxKind::Slist {
            self.statements(&site, node.node);
            return;
        }
        for child in tree.significant_children(node.node) {
            match tree.kind(child) {
                SyntaxKind::Slist => self.statements(&site, child),
                SyntaxKind::Expr => {
                    self.expr(&site, child);
                }
                SyntaxKind::CaseGroup => {
                    for part in tree.significant_children(child) {
                        match tree.kind(part) {
                            SyntaxKind::Case => self.operands(&site, part),
                            SyntaxKind::Slist => self.statements(&site, part),
                            _ => {}
                        }
                    }
                }
                SyntaxKind::ForInit | SyntaxKind::ForCondition | SyntaxKind::ForIterator => {
                    for part in tree.significant_children(child) {
                        if !tree.kind(part).is_structural_statement() {
                            self.expr(&site, part);
                        }
                    }
                }
                SyntaxKind::ForEachClause => {
                    if let Some(iterable) = tree.child_of_kind(child, SyntaxKind::Expr) {
                        self.expr(&site, iterable);
                    }
                }
                SyntaxKind::ParameterDef | SyntaxKind::Else => {}
                _ => self.statement(&site, child),
            }
        }
    }

    fn statements(&mut self, site: &Site, list: NodeId) {
        let tree = Arc::clone(&site.tree);
        for child in tree.significant_children(list) {
            self.statement(site, child);
        }
    }

    /// Declarations and compound statements are entities of their own.
    fn statement(&mut self, site: &Site, node: NodeId) {
        let tree = Arc::clone(&site.tree);
        match tree.kind(node) {
            SyntaxKind::Labeled => {
                let body = tree
                    .child_of_kind(node, SyntaxKind::Ident)
                    .and_then(|label| tree.next_significant_sibling(label));
                if let Some(body) = body {
                    self.statement(site, body);
                }
            }
            kind if kind.is_structural_statement() => {}
            _ => {
                self.expr(site, node);
            }
        }
    }

    // ========================================================================
    // EXPRESSIONS
    // ========================================================================

    /// Resolve every name under `node` and return the expression's type, if
    /// it has a known one.
    fn expr(&mut self, site: &Site, node: NodeId) -> Option<ClassType> {
        let tree = Arc::clone(&site.tree);
        let kind = tree.kind(node);
        let operands: Vec<NodeId> = tree.significant_children(node).collect();

        match kind {
            SyntaxKind::Expr | SyntaxKind::Return | SyntaxKind::Throw => {
                let inner = *operands.first()?;
                self.expr(site, inner)
            }
            SyntaxKind::Ident => Some(self.identifier(site, node)),
            SyntaxKind::Type => Some(self.resolve_type(site, node)),
            SyntaxKind::Dot => Some(self.dotted(site, node)),
            SyntaxKind::MethodCall => Some(self.method_call(site, node)),
            SyntaxKind::New => Some(self.new_expr(site, node)),
            SyntaxKind::This => self.this_type(site),
            SyntaxKind::Super => self.super_type(site),
            SyntaxKind::Break | SyntaxKind::Continue => {
                if let Some(label) = tree.child_of_kind(node, SyntaxKind::Ident) {
                    let name = tree.text(label);
                    match self.table.lookup_label(site.scope, name) {
                        Some(def) => self.bind(site.file, label, Symbol::Label(def)),
                        None => {
                            self.bind_unknown(site, label, name);
                        }
                    }
                }
                None
            }

            SyntaxKind::NumInt => Some(ClassType::Primitive(Primitive::Int)),
            SyntaxKind::NumLong => Some(ClassType::Primitive(Primitive::Long)),
            SyntaxKind::NumFloat => Some(ClassType::Primitive(Primitive::Float)),
            SyntaxKind::NumDouble => Some(ClassType::Primitive(Primitive::Double)),
            SyntaxKind::CharLiteral => Some(ClassType::Primitive(Primitive::Char)),
            SyntaxKind::True | SyntaxKind::False => Some(ClassType::Primitive(Primitive::Boolean)),
            SyntaxKind::StringLiteral => Some(self.table.cache().string_type()),
            SyntaxKind::Null => Some(ClassType::Null),
            SyntaxKind::ClassKw => Some(self.table.cache().type_named(CLASS)),

            kind if kind.is_assignment() => {
                let target = operands.first().and_then(|&lhs| self.expr(site, lhs));
                for &rhs in operands.iter().skip(1) {
                    self.expr(site, rhs);
                }
                target
            }
            kind if kind.is_comparison() || matches!(kind, SyntaxKind::InstanceOf | SyntaxKind::Lnot) => {
                self.operands(site, node);
                Some(ClassType::Primitive(Primitive::Boolean))
            }
            kind if kind.is_unary() => {
                let inner = *operands.first()?;
                self.expr(site, inner)
            }
            kind if kind.is_arithmetic() => self.arithmetic(site, &operands),
            kind if kind.is_shift() || kind == SyntaxKind::Bnot => {
                let lhs = operands.first().and_then(|&lhs| self.expr(site, lhs));
                for &rhs in operands.iter().skip(1) {
                    self.expr(site, rhs);
                }
                lhs.map(|ty| match ty.as_primitive() {
                    Some(p) => ClassType::Primitive(p.unary_promote()),
                    None => ty,
                })
            }
            SyntaxKind::IndexOp => {
                let array = operands.first().and_then(|&array| self.expr(site, array));
                for &index in operands.iter().skip(1) {
                    self.expr(site, index);
                }
                match array? {
                    ClassType::Array(element) => Some(*element),
                    _ => None,
                }
            }
            SyntaxKind::Question => {
                let types: Vec<Option<ClassType>> =
                    operands.iter().map(|&part| self.expr(site, part)).collect();
                match (types.get(1).cloned().flatten(), types.get(2).cloned().flatten()) {
                    (Some(a), Some(b)) => Some(self.table.more_general(a, b)),
                    (a, b) => a.or(b),
                }
            }
            SyntaxKind::TypeCast => {
                let target = tree
                    .child_of_kind(node, SyntaxKind::Type)
                    .map(|ty| self.resolve_type(site, ty));
                if let Some(&operand) = operands.last() {
                    if tree.kind(operand) != SyntaxKind::Type {
                        self.expr(site, operand);
                    }
                }
                target
            }
            kind => match Primitive::from_keyword(kind) {
                Some(primitive) => Some(ClassType::Primitive(primitive)),
                None => {
                    // Elist, ArrayInit, CtorCall and anything else: names only.
                    self.operands(site, node);
                    None
                }
            },
        }
    }

    fn operands(&mut self, site: &Site, node: NodeId) {
        let tree = Arc::clone(&site.tree);
        for child in tree.significant_children(node) {
            self.expr(site, child);
        }
    }

    /// String concatenation, boolean logic, otherwise binary promotion.
    fn arithmetic(&mut self, site: &Site, operands: &[NodeId]) -> Option<ClassType> {
        let types: Vec<Option<ClassType>> = operands.iter().map(|&op| self.expr(site, op)).collect();
        let a = types.first().cloned().flatten();
        let b = types.get(1).cloned().flatten();

        let string = self.table.cache().string_type();
        if a.as_ref() == Some(&string) || b.as_ref() == Some(&string) {
            return Some(string);
        }
        let a = a?;
        match (a.as_primitive(), b.as_ref().and_then(ClassType::as_primitive)) {
            (Some(Primitive::Boolean), _) => Some(a),
            (Some(x), Some(y)) => Primitive::binary_promote(x, y).map(ClassType::Primitive),
            _ => Some(a),
        }
    }

    fn this_type(&self, site: &Site) -> Option<ClassType> {
        self.table
            .enclosing_class(site.scope)
            .map(ClassType::Declared)
    }

    fn super_type(&self, site: &Site) -> Option<ClassType> {
        let this = self.this_type(site)?;
        self.table.superclass_of(&this)
    }

    fn identifier(&mut self, site: &Site, node: NodeId) -> ClassType {
        let name = site.tree.text(node);
        if let Some(var) = self.table.lookup_variable(site.scope, name) {
            let ty = self.table.variable_type(&var);
            self.bind(site.file, node, Symbol::Variable(var));
            return ty;
        }
        if let Some(class) = self.table.lookup_class(site.scope, name) {
            self.bind(site.file, node, Symbol::Class(class.clone()));
            return class;
        }
        self.bind_unknown(site, node, name)
    }

    // ========================================================================
    // DOTTED NAMES
    // ========================================================================

    fn dotted(&mut self, site: &Site, node: NodeId) -> ClassType {
        let qualifier = self.qualifier(site, node);
        self.settle(site, qualifier)
    }

    /// Type of a qualifier; a still pending package prefix becomes unknown,
    /// bound at its first segment.
    fn settle(&mut self, site: &Site, qualifier: Qualifier) -> ClassType {
        match qualifier {
            Qualifier::Value(ty) | Qualifier::Type(ty) => ty,
            Qualifier::Pending(name, nodes) => {
                if let Some((&first, rest)) = nodes.split_first() {
                    for &node in rest {
                        self.set_meaningful(site.file, node, false);
                    }
                    self.bind(site.file, first, Symbol::unknown(name.as_str()));
                }
                trace!(%name, "dotted name resolved to unknown");
                ClassType::unknown(name)
            }
        }
    }

    fn qualifier(&mut self, site: &Site, node: NodeId) -> Qualifier {
        let tree = Arc::clone(&site.tree);
        match tree.kind(node) {
            SyntaxKind::Ident => {
                let name = tree.text(node);
                if let Some(var) = self.table.lookup_variable(site.scope, name) {
                    let ty = self.table.variable_type(&var);
                    self.bind(site.file, node, Symbol::Variable(var));
                    return Qualifier::Value(ty);
                }
                if let Some(class) = self.table.lookup_class(site.scope, name) {
                    self.bind(site.file, node, Symbol::Class(class.clone()));
                    return Qualifier::Type(class);
                }
                Qualifier::Pending(name.to_string(), vec![node])
            }
            SyntaxKind::Dot => {
                let parts: Vec<NodeId> = tree.significant_children(node).collect();
                let (Some(&lhs), Some(&rhs)) = (parts.first(), parts.get(1)) else {
                    self.operands(site, node);
                    return Qualifier::Value(ClassType::unknown(tree.text(node)));
                };
                match tree.kind(rhs) {
                    SyntaxKind::Ident => {}
                    SyntaxKind::ClassKw => {
                        self.class_path(site, lhs);
                        return Qualifier::Value(self.table.cache().type_named(CLASS));
                    }
                    SyntaxKind::This => {
                        return Qualifier::Value(self.class_path(site, lhs));
                    }
                    _ => {
                        self.expr(site, lhs);
                        let ty = self.expr(site, rhs).unwrap_or_else(|| ClassType::unknown(""));
                        return Qualifier::Value(ty);
                    }
                }

                let name = tree.text(rhs);
                match self.qualifier(site, lhs) {
                    Qualifier::Value(ty) | Qualifier::Type(ty) => Qualifier::Value(self.member(site, &ty, rhs, name)),
                    Qualifier::Pending(prefix, mut nodes) => {
                        let candidate = format!("{prefix}.{name}");
                        match self.table.class_by_qualified_name(&candidate) {
                            Some(class) => {
                                for &package in &nodes {
                                    self.set_meaningful(site.file, package, false);
                                }
                                self.bind(site.file, rhs, Symbol::Class(class.clone()));
                                Qualifier::Type(class)
                            }
                            None => {
                                nodes.push(rhs);
                                Qualifier::Pending(candidate, nodes)
                            }
                        }
                    }
                }
            }
            _ => Qualifier::Value(self.expr(site, node).unwrap_or_else(|| ClassType::unknown(""))),
        }
    }

    /// A field or member class of `ty`.
    fn member(&mut self, site: &Site, ty: &ClassType, node: NodeId, name: &str) -> ClassType {
        if ty.is_unknown() {
            return self.bind_unknown(site, node, name);
        }
        if let Some(var) = self.table.member_variable(ty, name) {
            let var_ty = self.table.variable_type(&var);
            self.bind(site.file, node, Symbol::Variable(var));
            return var_ty;
        }
        if let Some(class) = self.table.member_class(ty, name) {
            self.bind(site.file, node, Symbol::Class(class.clone()));
            return class;
        }
        self.bind_unknown(site, node, name)
    }

    // ========================================================================
    // CALLS AND CONSTRUCTION
    // ========================================================================

    fn arguments(&mut self, site: &Site, node: NodeId) -> Signature {
        let tree = Arc::clone(&site.tree);
        let Some(list) = tree.child_of_kind(node, SyntaxKind::Elist) else {
            return Signature::empty();
        };
        tree.significant_children(list)
            .collect::<Vec<_>>()
            .into_iter()
            .map(|arg| {
                self.expr(site, arg)
                    .unwrap_or_else(|| ClassType::unknown(tree.text(arg)))
            })
            .collect()
    }

    fn method_call(&mut self, site: &Site, node: NodeId) -> ClassType {
        let tree = Arc::clone(&site.tree);
        let args = self.arguments(site, node);
        let Some(callee) = tree.significant_children(node).next() else {
            return ClassType::unknown("");
        };

        let (found, name_node) = match tree.kind(callee) {
            SyntaxKind::Ident => (
                self.table.lookup_method(site.scope, tree.text(callee), &args),
                callee,
            ),
            SyntaxKind::Dot => {
                let parts: Vec<NodeId> = tree.significant_children(callee).collect();
                let (Some(&lhs), Some(&rhs)) = (parts.first(), parts.get(1)) else {
                    return ClassType::unknown(tree.text(callee));
                };
                let qualifier = self.qualifier(site, lhs);
                let owner = self.settle(site, qualifier);
                if owner.is_unknown() {
                    return self.bind_unknown(site, rhs, tree.text(rhs));
                }
                (self.table.member_method(&owner, tree.text(rhs), &args), rhs)
            }
            _ => {
                self.expr(site, callee);
                return ClassType::unknown("");
            }
        };

        match found {
            Some(method) => {
                let ty = self.table.method_type(&method);
                self.bind(site.file, name_node, Symbol::Method(method));
                ty
            }
            None => self.bind_unknown(site, name_node, tree.text(name_node)),
        }
    }

    fn new_expr(&mut self, site: &Site, node: NodeId) -> ClassType {
        let tree = Arc::clone(&site.tree);
        let Some(type_node) = tree.significant_children(node).next() else {
            return ClassType::unknown("");
        };

        if tree.child_of_kind(node, SyntaxKind::Elist).is_none() {
            return self.new_array(site, node, type_node);
        }

        let args = self.arguments(site, node);
        let segments = tree.dotted_segments(type_node);
        let Some((&last, prefix)) = segments.split_last() else {
            return ClassType::unknown("");
        };
        for &segment in prefix {
            self.set_meaningful(site.file, segment, false);
        }

        let name = tree.dotted_name(type_node);
        match self.table.lookup_class(site.scope, &name) {
            Some(class) => {
                let symbol = match self.table.lookup_constructor(&class, &args) {
                    Some(ctor) => Symbol::Method(ctor),
                    None => Symbol::Class(class.clone()),
                };
                self.bind(site.file, last, symbol);
                class
            }
            None => self.bind_unknown(site, last, &name),
        }
    }

    /// `new T[n][..] { .. }`
    fn new_array(&mut self, site: &Site, node: NodeId, type_node: NodeId) -> ClassType {
        let tree = Arc::clone(&site.tree);
        let mut ty = match Primitive::from_keyword(tree.kind(type_node)) {
            Some(primitive) => ClassType::Primitive(primitive),
            None => self.class_path(site, type_node),
        };
        for child in tree.significant_children(node).skip(1) {
            match tree.kind(child) {
                SyntaxKind::ArrayDeclarator => {
                    self.operands(site, child);
                    ty = ClassType::array_of(ty);
                }
                _ => {
                    self.expr(site, child);
                }
            }
        }
        ty
    }

    // ========================================================================
    // TYPE NAMES
    // ========================================================================

    /// Resolve a type expression, binding its class names.
    fn resolve_type(&mut self, site: &Site, node: NodeId) -> ClassType {
        let tree = Arc::clone(&site.tree);
        match tree.kind(node) {
            SyntaxKind::Type => {
                if let Some(args) = tree.child_of_kind(node, SyntaxKind::TypeArguments) {
                    for arg in tree.significant_children(args) {
                        if tree.kind(arg) == SyntaxKind::Type {
                            self.resolve_type(site, arg);
                        }
                    }
                }
                match type_name(&tree, node) {
                    Some(inner) => self.resolve_type(site, inner),
                    None => ClassType::unknown(tree.text(node)),
                }
            }
            SyntaxKind::ArrayDeclarator => match type_name(&tree, node) {
                Some(inner) => ClassType::array_of(self.resolve_type(site, inner)),
                None => ClassType::unknown(tree.text(node)),
            },
            SyntaxKind::Ident | SyntaxKind::Dot => self.class_path(site, node),
            kind => match Primitive::from_keyword(kind) {
                Some(primitive) => ClassType::Primitive(primitive),
                None => ClassType::unknown(tree.text(node)),
            },
        }
    }

    /// Resolve a possibly qualified class name.
    ///
    /// The shortest prefix naming a class is bound; the segments before it
    /// are a package and not name uses, the segments after it member classes.
    fn class_path(&mut self, site: &Site, node: NodeId) -> ClassType {
        let tree = Arc::clone(&site.tree);
        let segments = tree.dotted_segments(node);
        let texts: Vec<&str> = segments.iter().map(|&s| tree.text(s)).collect();

        for i in 0..segments.len() {
            let Some(mut ty) = self.table.lookup_class(site.scope, &texts[..=i].join(".")) else {
                continue;
            };
            for &package in &segments[..i] {
                self.set_meaningful(site.file, package, false);
            }
            self.bind(site.file, segments[i], Symbol::Class(ty.clone()));

            for (j, &segment) in segments.iter().enumerate().skip(i + 1) {
                match self.table.member_class(&ty, texts[j]) {
                    Some(member) => {
                        self.bind(site.file, segment, Symbol::Class(member.clone()));
                        ty = member;
                    }
                    None => return self.bind_unknown(site, segment, &texts.join(".")),
                }
            }
            return ty;
        }

        let name = texts.join(".");
        for &rest in segments.iter().skip(1) {
            self.set_meaningful(site.file, rest, false);
        }
        match segments.first() {
            Some(&first) => self.bind_unknown(site, first, &name),
            None => ClassType::unknown(name),
        }
    }
}
