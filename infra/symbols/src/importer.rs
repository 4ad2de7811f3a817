use crate::error::{SymbolError, SymbolErrorExt};
use crate::universe::SymbolUniverse;
use modulith_domain::namespace::Namespace;
use modulith_domain::symbol::Symbol;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Namespaces always imported next to the roots so stereotype markers can be classified.
pub const STEREOTYPE_NAMESPACES: &[&str] =
    &["org.springframework.stereotype", "org.springframework.data.repository"];

type IgnorePredicate = Arc<dyn Fn(&Symbol) -> bool + Send + Sync>;

/// Which symbols an importer should hand back.
#[derive(Clone)]
pub struct ImportScope {
    roots: Vec<Namespace>,
    auxiliary: Vec<Namespace>,
    include_tests: bool,
    ignore: Option<IgnorePredicate>,
}

impl ImportScope {
    /// A scope over `roots` plus [`STEREOTYPE_NAMESPACES`], excluding test symbols.
    ///
    /// # Errors
    /// Returns [`SymbolError::Scope`] if a root is not a valid namespace.
    pub fn new<I, S>(roots: I) -> Result<Self, SymbolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roots = roots
            .into_iter()
            .map(|root| Namespace::new(root.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .context("Parsing root namespaces")?;
        let auxiliary = STEREOTYPE_NAMESPACES
            .iter()
            .map(Namespace::new)
            .collect::<Result<Vec<_>, _>>()
            .context("Parsing stereotype namespaces")?;

        Ok(Self { roots, auxiliary, include_tests: false, ignore: None })
    }

    /// Replaces the auxiliary namespaces.
    #[must_use]
    pub fn auxiliary(mut self, namespaces: impl IntoIterator<Item = Namespace>) -> Self {
        self.auxiliary = namespaces.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn include_tests(mut self, enabled: bool) -> Self {
        self.include_tests = enabled;
        self
    }

    /// Adds an ignore predicate; combined with any previous one by logical OR.
    #[must_use]
    pub fn ignore(mut self, predicate: impl Fn(&Symbol) -> bool + Send + Sync + 'static) -> Self {
        let combined: IgnorePredicate = match self.ignore.take() {
            Some(previous) => {
                Arc::new(move |symbol: &Symbol| previous(symbol) || predicate(symbol))
            }
            None => Arc::new(predicate),
        };
        self.ignore = Some(combined);
        self
    }

    pub fn roots(&self) -> &[Namespace] {
        &self.roots
    }

    /// Whether `symbol` belongs in a universe imported for this scope.
    pub fn admits(&self, symbol: &Symbol) -> bool {
        if symbol.is_test() && !self.include_tests {
            return false;
        }
        if self.ignore.as_ref().is_some_and(|ignored| ignored(symbol)) {
            return false;
        }
        self.roots.iter().chain(&self.auxiliary).any(|ns| ns.contains(&symbol.namespace))
    }
}

impl fmt::Debug for ImportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportScope")
            .field("roots", &self.roots)
            .field("auxiliary", &self.auxiliary)
            .field("include_tests", &self.include_tests)
            .field("ignore", &self.ignore.is_some())
            .finish()
    }
}

/// Supplies the symbols of a codebase, scoped to a set of namespaces.
pub trait SymbolImporter: Send + Sync {
    /// # Errors
    /// Implementations fail when the underlying artifacts cannot be read.
    fn import_scoped(&self, scope: &ImportScope) -> Result<SymbolUniverse, SymbolError>;
}

/// An importer over symbols that are already in memory, e.g. produced by an external analyzer
/// and stored as a JSON snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImporter {
    symbols: Vec<Symbol>,
}

impl InMemoryImporter {
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self { symbols: symbols.into_iter().map(Symbol::normalized).collect() }
    }

    /// Reads a JSON array of symbols.
    ///
    /// # Errors
    /// Returns [`SymbolError::Snapshot`] if the JSON does not describe a list of symbols.
    pub fn from_json(json: &str) -> Result<Self, SymbolError> {
        let symbols: Vec<Symbol> =
            serde_json::from_str(json).context("Decoding symbol snapshot")?;
        Ok(Self::new(symbols))
    }

    /// Reads a JSON snapshot file.
    ///
    /// # Errors
    /// Returns [`SymbolError::Io`] if the file cannot be read, or [`SymbolError::Snapshot`] if it
    /// is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SymbolError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading snapshot {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

impl SymbolImporter for InMemoryImporter {
    fn import_scoped(&self, scope: &ImportScope) -> Result<SymbolUniverse, SymbolError> {
        let universe = SymbolUniverse::from_symbols(
            self.symbols.iter().filter(|symbol| scope.admits(symbol)).cloned(),
        );

        debug!(
            known = self.symbols.len(),
            imported = universe.len(),
            roots = ?scope.roots(),
            "Imported scoped symbol universe"
        );

        Ok(universe)
    }
}
