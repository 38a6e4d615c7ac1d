//! Types and member handles over the three origins of a definition.
//!
//! Every class-like thing is a [`ClassType`]: declared in the analysed source,
//! loaded from a compiled library, a primitive, an array over another type,
//! the type of `null`, or a name that could not be resolved at all.
//! Methods and variables get matching handles ([`MethodRef`],
//! [`VariableRef`]) and everything nameable is a [`Symbol`].

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use super::definition::DefKind;
use super::external::ReflectedClass;
use super::ids::DefId;
use super::primitive::Primitive;
use super::table::SymbolTable;

/// Where a definition comes from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Origin {
    /// Declared in the analysed source.
    Source,
    /// Loaded through the class loader.
    External,
    /// Could not be resolved.
    Unknown,
}

/// A class-like type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ClassType {
    /// A class or interface declared in the forest.
    Declared(DefId),
    /// A compiled library class.
    External(Arc<ReflectedClass>),
    Primitive(Primitive),
    /// One array dimension over the element type.
    Array(Box<ClassType>),
    /// The type of the `null` literal.
    Null,
    /// A name that resolved to nothing.
    Unknown(SmolStr),
}

impl ClassType {
    pub fn array_of(element: ClassType) -> ClassType {
        ClassType::Array(Box::new(element))
    }

    pub fn unknown(name: impl Into<SmolStr>) -> ClassType {
        ClassType::Unknown(name.into())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ClassType::Unknown(_))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, ClassType::Primitive(_))
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            ClassType::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ClassType::Array(_))
    }

    pub fn origin(&self) -> Origin {
        match self {
            ClassType::Declared(_) => Origin::Source,
            ClassType::Unknown(_) => Origin::Unknown,
            ClassType::Array(element) => element.origin(),
            ClassType::External(_) | ClassType::Primitive(_) | ClassType::Null => Origin::External,
        }
    }

    /// Identity used for signature matching.
    ///
    /// Like `==`, except that an unknown type is never the same as anything,
    /// itself included.
    pub fn is_same(&self, other: &ClassType) -> bool {
        match (self, other) {
            (ClassType::Unknown(_), _) | (_, ClassType::Unknown(_)) => false,
            (ClassType::Array(a), ClassType::Array(b)) => a.is_same(b),
            _ => self == other,
        }
    }

    /// The external class behind this type, if any.
    pub fn as_external(&self) -> Option<&Arc<ReflectedClass>> {
        match self {
            ClassType::External(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_declared(&self) -> Option<DefId> {
        match self {
            ClassType::Declared(def) => Some(*def),
            _ => None,
        }
    }
}

/// Which member of an external class a [`MethodRef`] points at.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MethodSlot {
    Method(usize),
    Constructor(usize),
    /// The implicit no-argument constructor used by `new Iface() { .. }`.
    InterfaceCtor,
}

/// A method or constructor.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum MethodRef {
    Declared(DefId),
    External {
        owner: Arc<ReflectedClass>,
        slot: MethodSlot,
    },
}

/// A field, local variable or parameter.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum VariableRef {
    Declared(DefId),
    External {
        owner: Arc<ReflectedClass>,
        index: usize,
    },
    /// The synthetic `length` field of an array type.
    ArrayLength(Box<ClassType>),
}

/// Anything a name can resolve to.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Symbol {
    Package(DefId),
    Class(ClassType),
    Method(MethodRef),
    Variable(VariableRef),
    Label(DefId),
}

impl Symbol {
    pub fn unknown(name: impl Into<SmolStr>) -> Symbol {
        Symbol::Class(ClassType::Unknown(name.into()))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Symbol::Class(ClassType::Unknown(_)))
    }

    /// The declared definition behind this symbol, if it has one.
    pub fn declared(&self) -> Option<DefId> {
        match self {
            Symbol::Package(def) | Symbol::Label(def) => Some(*def),
            Symbol::Class(ClassType::Declared(def))
            | Symbol::Method(MethodRef::Declared(def))
            | Symbol::Variable(VariableRef::Declared(def)) => Some(*def),
            _ => None,
        }
    }

    /// The symbol a declared definition is known by.
    pub fn of_definition(table: &SymbolTable, def: DefId) -> Symbol {
        match table.definition(def).kind() {
            DefKind::Package(_) => Symbol::Package(def),
            DefKind::Class(_) => Symbol::Class(ClassType::Declared(def)),
            DefKind::Method(_) => Symbol::Method(MethodRef::Declared(def)),
            DefKind::Variable(_) => Symbol::Variable(VariableRef::Declared(def)),
            DefKind::Label => Symbol::Label(def),
        }
    }
}

// ============================================================================
// NAMEABLE CAPABILITY
// ============================================================================

/// Common capability of everything a name can resolve to.
pub trait Nameable {
    /// Simple name as written in source.
    fn name(&self, table: &SymbolTable) -> SmolStr;
    /// Dotted name through enclosing packages, classes and methods.
    fn qualified_name(&self, table: &SymbolTable) -> String;
    fn origin(&self) -> Origin;
}

impl Nameable for ClassType {
    fn name(&self, table: &SymbolTable) -> SmolStr {
        match self {
            ClassType::Declared(def) => table.definition(*def).name().clone(),
            ClassType::External(class) => SmolStr::new(class.simple_name()),
            ClassType::Primitive(p) => SmolStr::new(p.name()),
            ClassType::Array(element) => SmolStr::new(format!("{}[]", element.name(table))),
            ClassType::Null => SmolStr::new("null"),
            ClassType::Unknown(name) => name.clone(),
        }
    }

    fn qualified_name(&self, table: &SymbolTable) -> String {
        match self {
            ClassType::Declared(def) => table.qualified_name(*def),
            ClassType::External(class) => class.qualified_name().to_string(),
            ClassType::Array(element) => format!("{}[]", element.qualified_name(table)),
            other => other.name(table).to_string(),
        }
    }

    fn origin(&self) -> Origin {
        ClassType::origin(self)
    }
}

impl Nameable for MethodRef {
    fn name(&self, table: &SymbolTable) -> SmolStr {
        match self {
            MethodRef::Declared(def) => table.definition(*def).name().clone(),
            MethodRef::External { owner, slot } => match slot {
                MethodSlot::Method(idx) => owner
                    .methods()
                    .get(*idx)
                    .map(|m| m.name.clone())
                    .unwrap_or_default(),
                MethodSlot::Constructor(_) | MethodSlot::InterfaceCtor => {
                    SmolStr::new(owner.simple_name())
                }
            },
        }
    }

    fn qualified_name(&self, table: &SymbolTable) -> String {
        match self {
            MethodRef::Declared(def) => table.qualified_name(*def),
            MethodRef::External { owner, .. } => {
                format!("{}.{}", owner.qualified_name(), self.name(table))
            }
        }
    }

    fn origin(&self) -> Origin {
        match self {
            MethodRef::Declared(_) => Origin::Source,
            MethodRef::External { .. } => Origin::External,
        }
    }
}

impl Nameable for VariableRef {
    fn name(&self, table: &SymbolTable) -> SmolStr {
        match self {
            VariableRef::Declared(def) => table.definition(*def).name().clone(),
            VariableRef::External { owner, index } => owner
                .fields()
                .get(*index)
                .map(|f| f.name.clone())
                .unwrap_or_default(),
            VariableRef::ArrayLength(_) => SmolStr::new("length"),
        }
    }

    fn qualified_name(&self, table: &SymbolTable) -> String {
        match self {
            VariableRef::Declared(def) => table.qualified_name(*def),
            VariableRef::External { owner, .. } => {
                format!("{}.{}", owner.qualified_name(), self.name(table))
            }
            VariableRef::ArrayLength(element) => {
                format!("{}[].length", element.qualified_name(table))
            }
        }
    }

    fn origin(&self) -> Origin {
        match self {
            VariableRef::Declared(_) => Origin::Source,
            VariableRef::External { .. } | VariableRef::ArrayLength(_) => Origin::External,
        }
    }
}

impl Nameable for Symbol {
    fn name(&self, table: &SymbolTable) -> SmolStr {
        match self {
            Symbol::Package(def) | Symbol::Label(def) => table.definition(*def).name().clone(),
            Symbol::Class(ty) => ty.name(table),
            Symbol::Method(method) => method.name(table),
            Symbol::Variable(var) => var.name(table),
        }
    }

    fn qualified_name(&self, table: &SymbolTable) -> String {
        match self {
            Symbol::Package(def) | Symbol::Label(def) => table.qualified_name(*def),
            Symbol::Class(ty) => ty.qualified_name(table),
            Symbol::Method(method) => method.qualified_name(table),
            Symbol::Variable(var) => var.qualified_name(table),
        }
    }

    fn origin(&self) -> Origin {
        match self {
            Symbol::Package(_) | Symbol::Label(_) => Origin::Source,
            Symbol::Class(ty) => ty.origin(),
            Symbol::Method(method) => method.origin(),
            Symbol::Variable(var) => var.origin(),
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassType::Declared(def) => write!(f, "{def:?}"),
            ClassType::External(class) => f.write_str(class.qualified_name()),
            ClassType::Primitive(p) => write!(f, "{p}"),
            ClassType::Array(element) => write!(f, "{element}[]"),
            ClassType::Null => f.write_str("null"),
            ClassType::Unknown(name) => write!(f, "?{name}"),
        }
    }
}
