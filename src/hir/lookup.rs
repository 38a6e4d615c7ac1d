//! Name lookup over scopes and types.
//!
//! Scope lookups search, in order: the scope's own namespace, then for class
//! scopes the inherited members, then the lexically enclosing scope. Class
//! names additionally fall back to the imports of the enclosing class and the
//! class loader. Member lookups on a type never leave the type hierarchy.
//!
//! Every walk over the hierarchy carries a visited set, so cyclic `extends`
//! chains in broken source terminate.

use rustc_hash::FxHashSet;

use super::external::OBJECT;
use super::ids::{DefId, ScopeId};
use super::primitive::Primitive;
use super::scope::ScopeKind;
use super::signature::Signature;
use super::table::SymbolTable;
use super::types::{ClassType, MethodRef, MethodSlot, Symbol, VariableRef};

type Visited = FxHashSet<ClassType>;

impl SymbolTable {
    // ========================================================================
    // HIERARCHY
    // ========================================================================

    /// Direct superclass. Interfaces report the top type.
    pub fn superclass_of(&self, ty: &ClassType) -> Option<ClassType> {
        match ty {
            ClassType::Declared(def) => self
                .definition(*def)
                .as_class()
                .and_then(|data| data.superclass.clone()),
            ClassType::External(class) => self.cache().superclass_of(class),
            ClassType::Array(_) => Some(self.cache().object_type()),
            _ => None,
        }
    }

    /// Directly implemented (or, for interfaces, extended) interfaces.
    pub fn interfaces_of(&self, ty: &ClassType) -> Vec<ClassType> {
        match ty {
            ClassType::Declared(def) => self
                .definition(*def)
                .as_class()
                .map(|data| data.interfaces.clone())
                .unwrap_or_default(),
            ClassType::External(class) => self.cache().interfaces_of(class),
            _ => Vec::new(),
        }
    }

    pub fn is_object(&self, ty: &ClassType) -> bool {
        matches!(ty, ClassType::External(class) if class.qualified_name() == OBJECT)
    }

    pub fn is_interface(&self, ty: &ClassType) -> bool {
        match ty {
            ClassType::Declared(def) => self
                .definition(*def)
                .as_class()
                .is_some_and(|data| data.is_interface),
            ClassType::External(class) => class.is_interface(),
            _ => false,
        }
    }

    /// Whether a value of type `from` may be used where `to` is expected.
    ///
    /// Unknown types are compatible with nothing. `null` fits every
    /// reference type. Primitives follow widening. Arrays are compatible
    /// with arrays of compatible elements and with the top type.
    pub fn is_compatible(&self, from: &ClassType, to: &ClassType) -> bool {
        self.assignable(from, to, &mut Visited::default())
    }

    fn assignable(&self, from: &ClassType, to: &ClassType, visited: &mut Visited) -> bool {
        match (from, to) {
            (ClassType::Unknown(_), _) | (_, ClassType::Unknown(_)) => false,
            (ClassType::Null, to) => !to.is_primitive(),
            (_, ClassType::Null) => false,
            (ClassType::Primitive(a), ClassType::Primitive(b)) => a.widens_to(*b),
            (ClassType::Primitive(_), _) | (_, ClassType::Primitive(_)) => false,
            (ClassType::Array(a), ClassType::Array(b)) => self.assignable(a, b, visited),
            (ClassType::Array(_), to) => self.is_object(to),
            (from, to) if from == to => true,
            (from, to) => {
                if !visited.insert(from.clone()) {
                    return false;
                }
                self.supertypes(from)
                    .iter()
                    .any(|sup| self.assignable(sup, to, visited))
            }
        }
    }

    fn supertypes(&self, ty: &ClassType) -> Vec<ClassType> {
        let mut out: Vec<ClassType> = self.superclass_of(ty).into_iter().collect();
        out.extend(self.interfaces_of(ty));
        out
    }

    /// The more general of two branch types: `b` when `a` fits into it.
    pub fn more_general(&self, a: ClassType, b: ClassType) -> ClassType {
        if self.is_compatible(&a, &b) { b } else { a }
    }

    // ========================================================================
    // CLASSES
    // ========================================================================

    /// Class visible from `scope` under a simple or dotted name.
    pub fn lookup_class(&self, scope: ScopeId, name: &str) -> Option<ClassType> {
        if !name.contains('.') {
            return self.class_in_scope(scope, name);
        }

        let segments: Vec<&str> = name.split('.').collect();
        if let Some(first) = self.class_in_scope(scope, segments[0]) {
            if let Some(found) = self.member_class_path(first, &segments[1..]) {
                return Some(found);
            }
        }
        (1..segments.len()).find_map(|i| {
            let class = self.class_by_qualified_name(&segments[..=i].join("."))?;
            self.member_class_path(class, &segments[i + 1..])
        })
    }

    /// Declared or loadable class by fully qualified name.
    pub fn class_by_qualified_name(&self, qualified_name: &str) -> Option<ClassType> {
        match self.class_named(qualified_name) {
            Some(def) => Some(ClassType::Declared(def)),
            None => self.cache().load(qualified_name).map(ClassType::External),
        }
    }

    fn member_class_path(&self, mut ty: ClassType, rest: &[&str]) -> Option<ClassType> {
        for segment in rest {
            ty = self.member_class(&ty, segment)?;
        }
        Some(ty)
    }

    fn class_in_scope(&self, scope_id: ScopeId, name: &str) -> Option<ClassType> {
        let scope = self.scope(scope_id);
        if let Some(def) = scope.class(name) {
            return Some(ClassType::Declared(def));
        }

        let class = scope.owner.filter(|_| scope.kind == ScopeKind::Class);
        if let Some(owner) = class {
            let found = self.inherited_class(&ClassType::Declared(owner), name, &mut Visited::default());
            if found.is_some() {
                return found;
            }
        }
        if let Some(found) = scope.parent.and_then(|parent| self.class_in_scope(parent, name)) {
            return Some(found);
        }
        class.and_then(|owner| self.imported_class(owner, scope_id, name))
    }

    /// Member class of a type, searching inherited member classes.
    pub fn member_class(&self, ty: &ClassType, name: &str) -> Option<ClassType> {
        self.member_class_guarded(ty, name, &mut Visited::default())
    }

    fn member_class_guarded(&self, ty: &ClassType, name: &str, visited: &mut Visited) -> Option<ClassType> {
        if !visited.insert(ty.clone()) {
            return None;
        }
        let own = match ty {
            ClassType::Declared(def) => self
                .definition(*def)
                .as_class()
                .and_then(|data| self.scope(data.scope).class(name))
                .map(ClassType::Declared),
            ClassType::External(class) => {
                self.cache().inner_class(class, name).map(ClassType::External)
            }
            ClassType::Array(_) => {
                return self.member_class_guarded(&self.cache().object_type(), name, visited);
            }
            _ => return None,
        };
        own.or_else(|| self.inherited_class(ty, name, visited))
    }

    fn inherited_class(&self, ty: &ClassType, name: &str, visited: &mut Visited) -> Option<ClassType> {
        for iface in self.interfaces_of(ty) {
            if let Some(found) = self.member_class_guarded(&iface, name, visited) {
                return Some(found);
            }
        }
        let superclass = self.superclass_of(ty)?;
        self.member_class_guarded(&superclass, name, visited)
    }

    /// Imports of a class, then the loader within its package, then the
    /// loader by the bare name.
    fn imported_class(&self, class: DefId, scope: ScopeId, name: &str) -> Option<ClassType> {
        let data = self.definition(class).as_class()?;
        if let Some(ty) = data.imports.classes.get(name) {
            return Some(ty.clone());
        }
        for package in &data.imports.packages {
            if let Some(found) = self.class_in_package(package, name) {
                return Some(found);
            }
        }
        let package = self.package_name_of(scope);
        if !package.is_empty() {
            if let Some(class) = self.cache().load(&format!("{package}.{name}")) {
                return Some(ClassType::External(class));
            }
        }
        self.cache().load(name).map(ClassType::External)
    }

    /// A class directly inside a package, declared or loadable.
    pub fn class_in_package(&self, package: &str, name: &str) -> Option<ClassType> {
        let declared = self
            .package(package)
            .and_then(|def| self.definition(def).own_scope())
            .and_then(|scope| self.scope(scope).class(name));
        match declared {
            Some(def) => Some(ClassType::Declared(def)),
            None => self
                .cache()
                .load(&format!("{package}.{name}"))
                .map(ClassType::External),
        }
    }

    /// Qualified name of the package enclosing `scope`, or `""`.
    pub fn package_name_of(&self, scope: ScopeId) -> String {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            let s = self.scope(id);
            if s.kind == ScopeKind::Package {
                return s.owner.map(|def| self.qualified_name(def)).unwrap_or_default();
            }
            cur = s.parent;
        }
        String::new()
    }

    // ========================================================================
    // VARIABLES
    // ========================================================================

    /// Variable visible from `scope`.
    pub fn lookup_variable(&self, scope: ScopeId, name: &str) -> Option<VariableRef> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            let s = self.scope(id);
            if let Some(def) = s.variable(name) {
                return Some(VariableRef::Declared(def));
            }
            if let Some(owner) = s.owner.filter(|_| s.kind == ScopeKind::Class) {
                let ty = ClassType::Declared(owner);
                let mut visited = Visited::default();
                visited.insert(ty.clone());
                if let Some(found) = self.inherited_variable(&ty, name, &mut visited) {
                    return Some(found);
                }
            }
            cur = s.parent;
        }
        None
    }

    /// Field of a type, searching inherited fields. Arrays expose `length`.
    pub fn member_variable(&self, ty: &ClassType, name: &str) -> Option<VariableRef> {
        self.member_variable_guarded(ty, name, &mut Visited::default())
    }

    fn member_variable_guarded(&self, ty: &ClassType, name: &str, visited: &mut Visited) -> Option<VariableRef> {
        if let ClassType::Array(element) = ty {
            if name == "length" {
                return Some(VariableRef::ArrayLength(element.clone()));
            }
            return self.member_variable_guarded(&self.cache().object_type(), name, visited);
        }
        if !visited.insert(ty.clone()) {
            return None;
        }
        let own = match ty {
            ClassType::Declared(def) => self
                .definition(*def)
                .as_class()
                .and_then(|data| self.scope(data.scope).variable(name))
                .map(VariableRef::Declared),
            ClassType::External(class) => class
                .fields()
                .iter()
                .position(|field| field.name == name)
                .map(|index| VariableRef::External {
                    owner: class.clone(),
                    index,
                }),
            _ => return None,
        };
        own.or_else(|| self.inherited_variable(ty, name, visited))
    }

    fn inherited_variable(&self, ty: &ClassType, name: &str, visited: &mut Visited) -> Option<VariableRef> {
        for iface in self.interfaces_of(ty) {
            if let Some(found) = self.member_variable_guarded(&iface, name, visited) {
                return Some(found);
            }
        }
        let superclass = self.superclass_of(ty)?;
        self.member_variable_guarded(&superclass, name, visited)
    }

    /// Declared type of a variable; `Unknown` when it could not be resolved.
    pub fn variable_type(&self, var: &VariableRef) -> ClassType {
        match var {
            VariableRef::Declared(def) => self
                .definition(*def)
                .as_variable()
                .and_then(|data| data.ty.clone())
                .unwrap_or_else(|| ClassType::unknown(self.definition(*def).name().clone())),
            VariableRef::External { owner, index } => match owner.fields().get(*index) {
                Some(field) => self.cache().type_named(&field.ty),
                None => ClassType::unknown(owner.qualified_name()),
            },
            VariableRef::ArrayLength(_) => ClassType::Primitive(Primitive::Int),
        }
    }

    // ========================================================================
    // METHODS
    // ========================================================================

    /// Overload of `name` visible from `scope` that accepts `args`.
    ///
    /// Per scope: an overload with the same signature wins outright,
    /// otherwise the most specific compatible one. Class scopes then search
    /// the superclass and the interfaces before the enclosing scope.
    pub fn lookup_method(&self, scope: ScopeId, name: &str, args: &Signature) -> Option<MethodRef> {
        self.find_method(scope, name, Some(args))
    }

    /// First method called `name` visible from `scope`, any signature.
    pub fn lookup_method_named(&self, scope: ScopeId, name: &str) -> Option<MethodRef> {
        self.find_method(scope, name, None)
    }

    fn find_method(&self, scope: ScopeId, name: &str, args: Option<&Signature>) -> Option<MethodRef> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            let s = self.scope(id);
            let candidates = self.declared_candidates(s.methods_named(name));
            if let Some(def) = self.pick_overload(candidates, args) {
                return Some(MethodRef::Declared(def));
            }
            if let Some(owner) = s.owner.filter(|_| s.kind == ScopeKind::Class) {
                let ty = ClassType::Declared(owner);
                let mut visited = Visited::default();
                visited.insert(ty.clone());
                if let Some(found) = self.inherited_method(&ty, name, args, &mut visited) {
                    return Some(found);
                }
            }
            cur = s.parent;
        }
        None
    }

    /// Method of a type accepting `args`, searching inherited methods.
    pub fn member_method(&self, ty: &ClassType, name: &str, args: &Signature) -> Option<MethodRef> {
        self.member_method_guarded(ty, name, Some(args), &mut Visited::default())
    }

    pub fn member_method_named(&self, ty: &ClassType, name: &str) -> Option<MethodRef> {
        self.member_method_guarded(ty, name, None, &mut Visited::default())
    }

    fn member_method_guarded(
        &self,
        ty: &ClassType,
        name: &str,
        args: Option<&Signature>,
        visited: &mut Visited,
    ) -> Option<MethodRef> {
        if ty.is_array() {
            return self.member_method_guarded(&self.cache().object_type(), name, args, visited);
        }
        if !visited.insert(ty.clone()) {
            return None;
        }
        match ty {
            ClassType::Declared(def) => {
                let data = self.definition(*def).as_class()?;
                let candidates = self.declared_candidates(self.scope(data.scope).methods_named(name));
                if let Some(found) = self.pick_overload(candidates, args) {
                    return Some(MethodRef::Declared(found));
                }
                self.inherited_method(ty, name, args, visited)
            }
            ClassType::External(class) => {
                let candidates = class
                    .methods()
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| m.name == name)
                    .map(|(i, m)| (i, self.external_signature(&m.params)))
                    .collect();
                if let Some(index) = self.pick_overload(candidates, args) {
                    return Some(MethodRef::External {
                        owner: class.clone(),
                        slot: MethodSlot::Method(index),
                    });
                }
                // External types search their interfaces before the superclass.
                for iface in self.interfaces_of(ty) {
                    if let Some(found) = self.member_method_guarded(&iface, name, args, visited) {
                        return Some(found);
                    }
                }
                let superclass = self.superclass_of(ty)?;
                self.member_method_guarded(&superclass, name, args, visited)
            }
            _ => None,
        }
    }

    /// Superclass first, then interfaces.
    fn inherited_method(
        &self,
        ty: &ClassType,
        name: &str,
        args: Option<&Signature>,
        visited: &mut Visited,
    ) -> Option<MethodRef> {
        if let Some(superclass) = self.superclass_of(ty) {
            if let Some(found) = self.member_method_guarded(&superclass, name, args, visited) {
                return Some(found);
            }
        }
        for iface in self.interfaces_of(ty) {
            if let Some(found) = self.member_method_guarded(&iface, name, args, visited) {
                return Some(found);
            }
        }
        None
    }

    /// Constructor of `ty` accepting `args`.
    ///
    /// A zero-argument construction of an external interface resolves to
    /// the implicit constructor used by anonymous implementations.
    pub fn lookup_constructor(&self, ty: &ClassType, args: &Signature) -> Option<MethodRef> {
        match ty {
            ClassType::Declared(def) => {
                let data = self.definition(*def).as_class()?;
                let name = self.definition(*def).name();
                let ctors: Vec<DefId> = self
                    .scope(data.scope)
                    .methods_named(name)
                    .iter()
                    .copied()
                    .filter(|m| self.definition(*m).as_method().is_some_and(|m| m.is_constructor))
                    .collect();
                let candidates = self.declared_candidates(&ctors);
                self.pick_overload(candidates, Some(args)).map(MethodRef::Declared)
            }
            ClassType::External(class) => {
                let candidates = class
                    .constructors()
                    .iter()
                    .enumerate()
                    .map(|(i, params)| (i, self.external_signature(params)))
                    .collect();
                match self.pick_overload(candidates, Some(args)) {
                    Some(index) => Some(MethodSlot::Constructor(index)),
                    None if class.is_interface() && args.arity() == 0 => Some(MethodSlot::InterfaceCtor),
                    None => None,
                }
                .map(|slot| MethodRef::External {
                    owner: class.clone(),
                    slot,
                })
            }
            _ => None,
        }
    }

    fn declared_candidates(&self, defs: &[DefId]) -> Vec<(DefId, Signature)> {
        defs.iter()
            .filter_map(|def| {
                let data = self.definition(*def).as_method()?;
                Some((*def, data.signature.clone()))
            })
            .collect()
    }

    fn external_signature(&self, params: &[smol_str::SmolStr]) -> Signature {
        params.iter().map(|p| self.cache().type_named(p)).collect()
    }

    /// Exact match first; otherwise the most specific compatible candidate,
    /// earlier declarations winning ties. Without `args`, the first candidate.
    fn pick_overload<T: Copy>(&self, candidates: Vec<(T, Signature)>, args: Option<&Signature>) -> Option<T> {
        let Some(args) = args else {
            return candidates.first().map(|(item, _)| *item);
        };
        if let Some((item, _)) = candidates.iter().find(|(_, sig)| sig.is_same(args)) {
            return Some(*item);
        }
        let mut best: Option<&(T, Signature)> = None;
        for candidate in candidates.iter().filter(|(_, sig)| args.is_compatible_with(sig, self)) {
            best = match best {
                Some(current) if !candidate.1.is_more_specific_than(&current.1, self) => Some(current),
                _ => Some(candidate),
            };
        }
        best.map(|(item, _)| *item)
    }

    /// Return type of a method; the constructed class for constructors.
    pub fn method_type(&self, method: &MethodRef) -> ClassType {
        match method {
            MethodRef::Declared(def) => self
                .definition(*def)
                .as_method()
                .and_then(|data| data.return_type.clone())
                .unwrap_or_else(|| ClassType::unknown(self.definition(*def).name().clone())),
            MethodRef::External { owner, slot } => match slot {
                MethodSlot::Method(index) => match owner.methods().get(*index) {
                    Some(m) => self.cache().type_named(&m.return_type),
                    None => ClassType::unknown(owner.qualified_name()),
                },
                MethodSlot::Constructor(_) | MethodSlot::InterfaceCtor => {
                    ClassType::External(owner.clone())
                }
            },
        }
    }

    /// Parameter types of a method.
    pub fn method_signature(&self, method: &MethodRef) -> Signature {
        match method {
            MethodRef::Declared(def) => self
                .definition(*def)
                .as_method()
                .map(|data| data.signature.clone())
                .unwrap_or_default(),
            MethodRef::External { owner, slot } => match slot {
                MethodSlot::Method(index) => owner
                    .methods()
                    .get(*index)
                    .map(|m| self.external_signature(&m.params))
                    .unwrap_or_default(),
                MethodSlot::Constructor(index) => owner
                    .constructors()
                    .get(*index)
                    .map(|params| self.external_signature(params))
                    .unwrap_or_default(),
                MethodSlot::InterfaceCtor => Signature::empty(),
            },
        }
    }

    // ========================================================================
    // LABELS AND FREE-FORM NAMES
    // ========================================================================

    pub fn lookup_label(&self, scope: ScopeId, name: &str) -> Option<DefId> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            let s = self.scope(id);
            if let Some(def) = s.label(name) {
                return Some(def);
            }
            cur = s.parent;
        }
        None
    }

    /// Resolve a free-form, possibly dotted name as seen from `scope`.
    ///
    /// Tries variables, classes, methods (any signature), labels and
    /// packages in that order. Never fails: unresolvable names yield an
    /// unknown symbol.
    pub fn resolve_name(&self, scope: ScopeId, name: &str) -> Symbol {
        let resolved = match name.split_once('.') {
            None => self.resolve_simple_name(scope, name),
            Some((head, rest)) => self.resolve_member_path(scope, head, rest),
        };
        resolved
            .or_else(|| self.lookup_class(scope, name).map(Symbol::Class))
            .or_else(|| self.package(name).map(Symbol::Package))
            .unwrap_or_else(|| {
                tracing::trace!(name, "name resolved to unknown");
                Symbol::unknown(name)
            })
    }

    fn resolve_simple_name(&self, scope: ScopeId, name: &str) -> Option<Symbol> {
        if let Some(var) = self.lookup_variable(scope, name) {
            return Some(Symbol::Variable(var));
        }
        if let Some(class) = self.lookup_class(scope, name) {
            return Some(Symbol::Class(class));
        }
        if let Some(method) = self.lookup_method_named(scope, name) {
            return Some(Symbol::Method(method));
        }
        self.lookup_label(scope, name).map(Symbol::Label)
    }

    /// `head.a.b` where `head` is a variable or a class.
    fn resolve_member_path(&self, scope: ScopeId, head: &str, rest: &str) -> Option<Symbol> {
        let mut ty = match self.lookup_variable(scope, head) {
            Some(var) => self.variable_type(&var),
            None => self.lookup_class(scope, head)?,
        };
        let segments: Vec<&str> = rest.split('.').collect();
        let (last, middle) = segments.split_last()?;
        for segment in middle {
            ty = match self.member_variable(&ty, segment) {
                Some(var) => self.variable_type(&var),
                None => self.member_class(&ty, segment)?,
            };
        }
        if let Some(var) = self.member_variable(&ty, last) {
            return Some(Symbol::Variable(var));
        }
        if let Some(method) = self.member_method_named(&ty, last) {
            return Some(Symbol::Method(method));
        }
        self.member_class(&ty, last).map(Symbol::Class)
    }
}
