//! Method signatures and overload specificity.

use std::fmt;

use super::table::SymbolTable;
use super::types::ClassType;

/// An ordered list of parameter types.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Signature {
    params: Vec<ClassType>,
}

impl Signature {
    pub fn new(params: Vec<ClassType>) -> Self {
        Self { params }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn params(&self) -> &[ClassType] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Pairwise identical parameter types. Symmetric; arity-sensitive.
    pub fn is_same(&self, other: &Signature) -> bool {
        self.arity() == other.arity()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.is_same(b))
    }

    /// Whether arguments of these types may be passed to `params`.
    ///
    /// Each of our types must be assignable to the corresponding parameter:
    /// equal, a subtype, or on the primitive widening path.
    pub fn is_compatible_with(&self, params: &Signature, table: &SymbolTable) -> bool {
        self.arity() == params.arity()
            && self
                .params
                .iter()
                .zip(&params.params)
                .all(|(arg, param)| table.is_compatible(arg, param))
    }

    /// `self` is strictly more specific than `other`: its parameters are
    /// pairwise compatible with `other`'s but not the reverse.
    pub fn is_more_specific_than(&self, other: &Signature, table: &SymbolTable) -> bool {
        self.is_compatible_with(other, table) && !other.is_compatible_with(self, table)
    }
}

impl FromIterator<ClassType> for Signature {
    fn from_iter<I: IntoIterator<Item = ClassType>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::base::FileId;
    use crate::config::AnalysisConfig;
    use crate::hir::ClassCache;
    use crate::hir::primitive::Primitive;
    use crate::project::bootstrap_library;
    use crate::syntax::SyntaxTree;

    fn sig(params: &[Primitive]) -> Signature {
        params.iter().map(|p| ClassType::Primitive(*p)).collect()
    }

    fn empty_table() -> SymbolTable {
        let cache = Arc::new(ClassCache::new(Arc::new(bootstrap_library())));
        SymbolTable::build(Vec::<(FileId, Arc<SyntaxTree>)>::new(), cache, AnalysisConfig::default()).unwrap()
    }

    fn types(table: &SymbolTable, names: &[&str]) -> Signature {
        names.iter().map(|name| table.cache().type_named(name)).collect()
    }

    #[test]
    fn test_compatible_requires_equal_arity() {
        let table = empty_table();
        let int = sig(&[Primitive::Int]);
        assert!(int.is_compatible_with(&sig(&[Primitive::Long]), &table));
        assert!(!int.is_compatible_with(&sig(&[Primitive::Long, Primitive::Long]), &table));
        assert!(!int.is_compatible_with(&Signature::empty(), &table));
        assert!(!Signature::empty().is_compatible_with(&int, &table));
        assert!(Signature::empty().is_compatible_with(&Signature::empty(), &table));
    }

    #[test]
    fn test_array_compatibility() {
        let table = empty_table();
        let strings = types(&table, &["java.lang.String[]"]);
        let ints = types(&table, &["int[]"]);

        assert!(strings.is_compatible_with(&types(&table, &["java.lang.Object"]), &table));
        assert!(strings.is_compatible_with(&types(&table, &["java.lang.Object[]"]), &table));
        assert!(ints.is_compatible_with(&types(&table, &["java.lang.Object"]), &table));
        assert!(!ints.is_compatible_with(&types(&table, &["java.lang.Object[]"]), &table));
    }

    #[test]
    fn test_more_specific_is_strict() {
        let table = empty_table();
        let int = sig(&[Primitive::Int]);
        let long = sig(&[Primitive::Long]);
        assert!(int.is_more_specific_than(&long, &table));
        assert!(!long.is_more_specific_than(&int, &table));
        assert!(!int.is_more_specific_than(&int, &table));

        // neither of two crossed signatures is more specific
        let int_long = sig(&[Primitive::Int, Primitive::Long]);
        let long_int = sig(&[Primitive::Long, Primitive::Int]);
        assert!(!int_long.is_more_specific_than(&long_int, &table));
        assert!(!long_int.is_more_specific_than(&int_long, &table));
    }

    #[test]
    fn test_same_is_symmetric_and_arity_sensitive() {
        let a = sig(&[Primitive::Int, Primitive::Long]);
        let b = sig(&[Primitive::Int, Primitive::Long]);
        let c = sig(&[Primitive::Int]);
        assert!(a.is_same(&b) && b.is_same(&a));
        assert!(!a.is_same(&c) && !c.is_same(&a));
        assert!(Signature::empty().is_same(&Signature::empty()));
    }

    #[test]
    fn test_unknown_param_is_never_same() {
        let a = Signature::new(vec![ClassType::unknown("X")]);
        assert!(!a.is_same(&a.clone()));
    }

    #[test]
    fn test_display() {
        assert_eq!(sig(&[Primitive::Int, Primitive::Char]).to_string(), "(int, char)");
    }
}
