//! Analysis configuration.

use smol_str::SmolStr;

/// Knobs shared by the table builder and the usage analyses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Case-insensitive substrings of a qualified name that exclude a
    /// definition from the under-reference report. This is a naming
    /// heuristic: `retest` matches `test`. Empty disables it.
    pub ignore_markers: Vec<SmolStr>,
    /// Packages imported on demand into every class.
    pub implicit_imports: Vec<SmolStr>,
    /// Whether the reference counter includes declaration name tokens.
    pub count_declarations: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ignore_markers: vec![SmolStr::new("test"), SmolStr::new("main")],
            implicit_imports: vec![SmolStr::new("java.lang")],
            count_declarations: true,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.ignore_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_implicit_imports<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.implicit_imports = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_count_declarations(mut self, count: bool) -> Self {
        self.count_declarations = count;
        self
    }

    /// Whether `qualified_name` contains one of the ignore markers.
    pub fn is_ignored(&self, qualified_name: &str) -> bool {
        let lowered = qualified_name.to_lowercase();
        self.ignore_markers
            .iter()
            .any(|marker| lowered.contains(&marker.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("app.Main.main", true)]
    #[case("app.FooTest.setUp", true)]
    #[case("app.Parser.retest", true)]
    #[case("app.Parser.parse", false)]
    #[case("app.Domain.remainder", true)]
    fn test_default_markers(#[case] name: &str, #[case] ignored: bool) {
        assert_eq!(AnalysisConfig::default().is_ignored(name), ignored);
    }

    #[test]
    fn test_empty_markers_disable_heuristic() {
        let config = AnalysisConfig::new().with_ignore_markers(Vec::<SmolStr>::new());
        assert!(!config.is_ignored("app.Main.main"));
    }

    #[test]
    fn test_builder() {
        let config = AnalysisConfig::new()
            .with_implicit_imports(["java.lang", "java.util"])
            .with_count_declarations(false);
        assert_eq!(config.implicit_imports.len(), 2);
        assert!(!config.count_declarations);
    }
}
