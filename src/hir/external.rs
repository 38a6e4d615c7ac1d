//! Externally compiled classes and the class-loading collaborator.
//!
//! A [`ReflectedClass`] is the reflective metadata of a class that is not
//! part of the analysed source. Member types are stored as type names
//! (`"int"`, `"java.lang.String"`, `"java.lang.Object[]"`) and turned into
//! [`ClassType`]s on demand through the [`ClassCache`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::primitive::Primitive;
use super::types::ClassType;
use crate::error::{Error, Result};

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const CLASS: &str = "java.lang.Class";

// ============================================================================
// REFLECTED METADATA
// ============================================================================

/// A field of an external class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReflectedField {
    pub name: SmolStr,
    pub ty: SmolStr,
}

/// A method of an external class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReflectedMethod {
    pub name: SmolStr,
    pub params: Vec<SmolStr>,
    pub return_type: SmolStr,
}

/// Reflective metadata for one compiled class.
///
/// Two reflected classes are equal when their qualified names are.
#[derive(Clone)]
pub struct ReflectedClass {
    name: SmolStr,
    superclass: Option<SmolStr>,
    interfaces: Vec<SmolStr>,
    is_interface: bool,
    fields: Vec<ReflectedField>,
    methods: Vec<ReflectedMethod>,
    constructors: Vec<Vec<SmolStr>>,
    inner_classes: Vec<SmolStr>,
}

impl ReflectedClass {
    pub fn builder(name: impl Into<SmolStr>) -> ReflectedClassBuilder {
        ReflectedClassBuilder {
            class: ReflectedClass {
                name: name.into(),
                superclass: None,
                interfaces: Vec::new(),
                is_interface: false,
                fields: Vec::new(),
                methods: Vec::new(),
                constructors: Vec::new(),
                inner_classes: Vec::new(),
            },
        }
    }

    /// Fully qualified name, e.g. `java.lang.String`.
    pub fn qualified_name(&self) -> &str {
        &self.name
    }

    /// Simple name: the part after the last `.` or `$`.
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    /// Package part of the qualified name, or `""`.
    pub fn package(&self) -> &str {
        match self.name.rfind('.') {
            Some(dot) => &self.name[..dot],
            None => "",
        }
    }

    /// Explicit superclass name as reported by reflection.
    ///
    /// Interfaces report none here; see [`ClassCache::superclass_of`].
    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    pub fn interfaces(&self) -> &[SmolStr] {
        &self.interfaces
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    pub fn fields(&self) -> &[ReflectedField] {
        &self.fields
    }

    pub fn methods(&self) -> &[ReflectedMethod] {
        &self.methods
    }

    pub fn constructors(&self) -> &[Vec<SmolStr>] {
        &self.constructors
    }

    pub fn inner_classes(&self) -> &[SmolStr] {
        &self.inner_classes
    }
}

fn simple_name_of(name: &str) -> &str {
    match name.rfind(['.', '$']) {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

impl PartialEq for ReflectedClass {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ReflectedClass {}

impl Hash for ReflectedClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for ReflectedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReflectedClass({})", self.name)
    }
}

/// Builder for [`ReflectedClass`].
pub struct ReflectedClassBuilder {
    class: ReflectedClass,
}

impl ReflectedClassBuilder {
    pub fn extends(mut self, superclass: impl Into<SmolStr>) -> Self {
        self.class.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<SmolStr>) -> Self {
        self.class.interfaces.push(interface.into());
        self
    }

    pub fn interface(mut self) -> Self {
        self.class.is_interface = true;
        self
    }

    pub fn field(mut self, name: impl Into<SmolStr>, ty: impl Into<SmolStr>) -> Self {
        self.class.fields.push(ReflectedField {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    pub fn method(
        mut self,
        name: impl Into<SmolStr>,
        params: &[&str],
        return_type: impl Into<SmolStr>,
    ) -> Self {
        self.class.methods.push(ReflectedMethod {
            name: name.into(),
            params: params.iter().map(|p| SmolStr::new(p)).collect(),
            return_type: return_type.into(),
        });
        self
    }

    pub fn constructor(mut self, params: &[&str]) -> Self {
        self.class
            .constructors
            .push(params.iter().map(|p| SmolStr::new(p)).collect());
        self
    }

    pub fn inner(mut self, qualified_name: impl Into<SmolStr>) -> Self {
        self.class.inner_classes.push(qualified_name.into());
        self
    }

    pub fn build(self) -> ReflectedClass {
        self.class
    }
}

// ============================================================================
// CLASS LOADING
// ============================================================================

/// The class-loading collaborator.
///
/// Misses are reported as [`Error::ClassNotFound`]; resolution treats them as
/// an ordinary fallthrough.
pub trait ClassLoader: Send + Sync {
    fn load_class(&self, qualified_name: &str) -> Result<ReflectedClass>;
}

/// A class loader over a fixed set of classes.
#[derive(Debug, Default, Clone)]
pub struct StaticClassLoader {
    classes: FxHashMap<SmolStr, ReflectedClass>,
}

impl StaticClassLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: ReflectedClass) -> Self {
        self.insert(class);
        self
    }

    pub fn insert(&mut self, class: ReflectedClass) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLoader for StaticClassLoader {
    fn load_class(&self, qualified_name: &str) -> Result<ReflectedClass> {
        self.classes
            .get(qualified_name)
            .cloned()
            .ok_or_else(|| Error::ClassNotFound(SmolStr::new(qualified_name)))
    }
}

/// Memoizing front for a [`ClassLoader`].
///
/// Results (hits and misses) are cached by qualified name and never change
/// afterwards, so the cache can outlive individual symbol-table builds.
pub struct ClassCache {
    loader: Arc<dyn ClassLoader>,
    loaded: RwLock<FxHashMap<SmolStr, Option<Arc<ReflectedClass>>>>,
    object: Arc<ReflectedClass>,
}

impl ClassCache {
    pub fn new(loader: Arc<dyn ClassLoader>) -> Self {
        let object = match loader.load_class(OBJECT) {
            Ok(class) => Arc::new(class),
            Err(_) => Arc::new(ReflectedClass::builder(OBJECT).build()),
        };
        let mut loaded = FxHashMap::default();
        loaded.insert(SmolStr::new(OBJECT), Some(object.clone()));
        Self {
            loader,
            loaded: RwLock::new(loaded),
            object,
        }
    }

    /// Load a class by qualified name, consulting the cache first.
    pub fn load(&self, qualified_name: &str) -> Option<Arc<ReflectedClass>> {
        // Fast path: read lock
        {
            let loaded = self.loaded.read();
            if let Some(hit) = loaded.get(qualified_name) {
                return hit.clone();
            }
        }

        let mut loaded = self.loaded.write();

        // Double-check
        if let Some(hit) = loaded.get(qualified_name) {
            return hit.clone();
        }

        let result = match self.loader.load_class(qualified_name) {
            Ok(class) => Some(Arc::new(class)),
            Err(err) => {
                trace!(%err, "class loader miss");
                None
            }
        };
        loaded.insert(SmolStr::new(qualified_name), result.clone());
        result
    }

    /// The universal top type.
    pub fn object(&self) -> Arc<ReflectedClass> {
        self.object.clone()
    }

    pub fn object_type(&self) -> ClassType {
        ClassType::External(self.object())
    }

    /// `java.lang.String`, or `Unknown` when the loader does not know it.
    pub fn string_type(&self) -> ClassType {
        self.type_named(STRING)
    }

    /// Resolve a reflected type name: primitives, `[]` suffixes and classes.
    pub fn type_named(&self, name: &str) -> ClassType {
        if let Some(element) = name.strip_suffix("[]") {
            return ClassType::Array(Box::new(self.type_named(element)));
        }
        if let Some(primitive) = Primitive::from_name(name) {
            return ClassType::Primitive(primitive);
        }
        match self.load(name) {
            Some(class) => ClassType::External(class),
            None => ClassType::Unknown(SmolStr::new(name)),
        }
    }

    /// Superclass of an external class.
    ///
    /// An interface without an explicit parent reports the top type, which
    /// keeps interface types compatible with `Object`.
    pub fn superclass_of(&self, class: &ReflectedClass) -> Option<ClassType> {
        match class.superclass() {
            Some(name) => Some(self.type_named(name)),
            None if class.is_interface() => Some(self.object_type()),
            None => None,
        }
    }

    pub fn interfaces_of(&self, class: &ReflectedClass) -> Vec<ClassType> {
        class
            .interfaces()
            .iter()
            .map(|name| self.type_named(name))
            .collect()
    }

    /// Inner class of `outer` with the given simple name.
    pub fn inner_class(&self, outer: &ReflectedClass, name: &str) -> Option<Arc<ReflectedClass>> {
        outer
            .inner_classes()
            .iter()
            .find(|inner| simple_name_of(inner) == name)
            .and_then(|inner| self.load(inner))
    }
}

impl fmt::Debug for ClassCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassCache")
            .field("loaded", &self.loaded.read().len())
            .finish()
    }
}
