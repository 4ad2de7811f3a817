use crate::error::ModelError;
use modulith_domain::namespace::Namespace;
use modulith_domain::symbol::Symbol;
use modulith_symbols::SymbolUniverse;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A namespace together with every imported symbol located in it or below it.
#[derive(Debug, Clone)]
pub struct NamespaceNode {
    namespace: Namespace,
    symbols: Vec<Arc<Symbol>>,
}

impl NamespaceNode {
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        self.namespace.as_str()
    }

    /// Symbols in import order.
    pub fn symbols(&self) -> &[Arc<Symbol>] {
        &self.symbols
    }

    /// Whether the fully qualified `name` lies within this namespace.
    pub fn contains(&self, name: &str) -> bool {
        self.namespace.contains(name)
    }

    pub fn contains_symbol(&self, symbol: &Symbol) -> bool {
        self.namespace.contains(&symbol.namespace)
    }
}

/// Hierarchical view over a symbol universe.
#[derive(Debug, Clone)]
pub struct NamespaceTree {
    universe: SymbolUniverse,
    populated: BTreeSet<Namespace>,
}

impl NamespaceTree {
    pub fn new(universe: SymbolUniverse) -> Self {
        let populated =
            universe.iter().filter_map(|symbol| Namespace::new(&symbol.namespace).ok()).collect();

        Self { universe, populated }
    }

    /// The node for exactly `namespace`.
    ///
    /// # Errors
    /// Returns [`ModelError::Configuration`] if neither the namespace nor any namespace below it
    /// holds a symbol.
    pub fn resolve_single(&self, namespace: &Namespace) -> Result<NamespaceNode, ModelError> {
        let node = self.node(namespace.clone());
        if node.symbols.is_empty() {
            return Err(ModelError::configuration(format!(
                "Namespace '{namespace}' contains no symbols"
            )));
        }
        Ok(node)
    }

    /// Nodes for the namespaces exactly one segment below `namespace`, sorted by name.
    ///
    /// Only namespaces that (transitively) hold at least one symbol are returned.
    pub fn direct_children(&self, namespace: &Namespace) -> Vec<NamespaceNode> {
        let children: BTreeSet<Namespace> = self
            .populated
            .iter()
            .filter_map(|populated| populated.child_below(namespace))
            .collect();

        children.into_iter().map(|child| self.node(child)).collect()
    }

    /// Segment-boundary containment of `name` in `namespace`.
    pub fn contains(namespace: &Namespace, name: &str) -> bool {
        namespace.contains(name)
    }

    pub const fn universe(&self) -> &SymbolUniverse {
        &self.universe
    }

    fn node(&self, namespace: Namespace) -> NamespaceNode {
        let symbols = self.universe.within(&namespace).cloned().collect();
        NamespaceNode { namespace, symbols }
    }
}
