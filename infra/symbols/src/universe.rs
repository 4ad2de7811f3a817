use fxhash::FxHashMap;
use modulith_domain::namespace::Namespace;
use modulith_domain::symbol::Symbol;
use std::sync::Arc;

#[derive(Debug, Default)]
struct UniverseInner {
    symbols: Vec<Arc<Symbol>>,
    index: FxHashMap<String, usize>,
}

/// An immutable, import-ordered set of symbols indexed by fully qualified name.
///
/// Cloning is cheap: clones share the same reference-counted storage.
#[derive(Debug, Clone, Default)]
pub struct SymbolUniverse {
    inner: Arc<UniverseInner>,
}

impl SymbolUniverse {
    /// Builds a universe; when a name occurs twice the first occurrence wins.
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut inner = UniverseInner::default();

        for symbol in symbols {
            let symbol = symbol.normalized();
            if inner.index.contains_key(&symbol.name) {
                continue;
            }
            inner.index.insert(symbol.name.clone(), inner.symbols.len());
            inner.symbols.push(Arc::new(symbol));
        }

        Self { inner: Arc::new(inner) }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Symbol>> {
        self.inner.index.get(name).map(|&idx| &self.inner.symbols[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Symbol>> {
        self.inner.symbols.iter()
    }

    /// Symbols whose namespace equals `namespace` or lies below it.
    pub fn within<'a>(&'a self, namespace: &'a Namespace) -> impl Iterator<Item = &'a Arc<Symbol>> {
        self.iter().filter(move |symbol| namespace.contains(&symbol.namespace))
    }

    pub fn len(&self) -> usize {
        self.inner.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.symbols.is_empty()
    }
}

impl<'a> IntoIterator for &'a SymbolUniverse {
    type Item = &'a Arc<Symbol>;
    type IntoIter = std::slice::Iter<'a, Arc<Symbol>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.symbols.iter()
    }
}
