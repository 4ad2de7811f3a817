use crate::modules::Modules;
use crate::namespace_tree::NamespaceNode;
use crate::violation::{DependencyViolation, SymbolReference};
use fxhash::FxHashSet;
use modulith_domain::config::{DependencyDepth, NamingMode};
use modulith_domain::namespace::Namespace;
use modulith_domain::symbol::Symbol;
use modulith_kernel::memo::Memoized;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// A symbol-level reference that leaves its module, resolved to the module it lands in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleDependency {
    pub reference: SymbolReference,
    pub target_module: String,
}

/// A logical module: one direct child namespace of a root namespace.
///
/// A `Module` is owned by exactly one [`Modules`] registry; the `modules` argument of every
/// graph query must be that registry.
pub struct Module {
    name: String,
    base: NamespaceNode,
    allowed_dependencies: Option<BTreeSet<String>>,
    direct: Memoized<Vec<ModuleDependency>>,
}

impl Module {
    pub(crate) fn new(
        base: NamespaceNode,
        naming: NamingMode,
        allowed_dependencies: Option<&[String]>,
    ) -> Self {
        let name = match naming {
            NamingMode::Simple => base.namespace().last_segment().to_owned(),
            NamingMode::FullyQualified => base.name().to_owned(),
        };
        let allowed_dependencies = allowed_dependencies
            .filter(|declared| !declared.is_empty())
            .map(|declared| declared.iter().cloned().collect());

        Self { name, base, allowed_dependencies, direct: Memoized::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn base_namespace(&self) -> &NamespaceNode {
        &self.base
    }

    pub fn symbols(&self) -> &[Arc<Symbol>] {
        self.base.symbols()
    }

    /// Declared allow-list, `None` when the module may depend on anything.
    pub const fn allowed_dependencies(&self) -> Option<&BTreeSet<String>> {
        self.allowed_dependencies.as_ref()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.base.contains_symbol(symbol)
    }

    /// Whether the fully qualified `name` lies inside this module's base namespace.
    pub fn contains_name(&self, name: &str) -> bool {
        self.base.contains(name)
    }

    /// Every reference from a symbol of this module to a symbol of another module.
    ///
    /// Computed once and cached. Only references to imported symbols count: targets that were
    /// ignored, never imported or located outside all modules are dropped.
    pub fn direct_dependencies(&self, modules: &Modules) -> &[ModuleDependency] {
        self.direct.get_or_init(|| {
            let mut seen = FxHashSet::default();
            let mut dependencies = Vec::new();

            for symbol in self.symbols() {
                for target in symbol.dependencies() {
                    let Some(imported) = modules.universe().get(target) else {
                        continue;
                    };
                    if self.contains(imported) {
                        continue;
                    }
                    let Some(module) = modules.module_by_type(imported) else {
                        continue;
                    };
                    let dependency = ModuleDependency {
                        reference: SymbolReference::new(&symbol.name, target),
                        target_module: module.name().to_owned(),
                    };
                    if seen.insert(dependency.clone()) {
                        dependencies.push(dependency);
                    }
                }
            }

            dependencies
        })
    }

    /// Modules reachable from this one within `depth` hops, in breadth-first discovery order.
    ///
    /// The module itself is never part of the result, even when a cycle leads back to it.
    pub fn dependencies<'a>(
        &'a self,
        modules: &'a Modules,
        depth: DependencyDepth,
    ) -> Vec<&'a Self> {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        visited.insert(self.name());

        let mut result = Vec::new();
        let mut frontier = vec![self];
        let mut hops = 0;

        while !frontier.is_empty() {
            hops += 1;
            if !depth.admits(hops) {
                break;
            }

            let mut next = Vec::new();
            for module in frontier {
                for dependency in module.direct_dependencies(modules) {
                    if !visited.insert(dependency.target_module.as_str()) {
                        continue;
                    }
                    if let Some(target) = modules.module_by_name(&dependency.target_module) {
                        result.push(target);
                        next.push(target);
                    }
                }
            }
            frontier = next;
        }

        result
    }

    /// This module's base namespace followed by those of its dependencies within `depth`.
    pub fn base_packages(&self, modules: &Modules, depth: DependencyDepth) -> Vec<Namespace> {
        std::iter::once(self)
            .chain(self.dependencies(modules, depth))
            .map(|module| module.base.namespace().clone())
            .collect()
    }

    /// Checks every outgoing reference against the declared allow-list.
    pub fn verify_dependencies(&self, modules: &Modules) -> Vec<DependencyViolation> {
        let Some(allowed) = &self.allowed_dependencies else {
            return Vec::new();
        };

        for declared in allowed {
            if declared != &self.name && modules.module_by_name(declared).is_none() {
                warn!(
                    module = %self.name,
                    declared = %declared,
                    "Allowed dependency does not name a known module"
                );
            }
        }

        self.direct_dependencies(modules)
            .iter()
            .filter(|dependency| !allowed.contains(&dependency.target_module))
            .map(|dependency| DependencyViolation {
                module: self.name.clone(),
                target_module: dependency.target_module.clone(),
                reference: dependency.reference.clone(),
                allowed: allowed.iter().cloned().collect(),
            })
            .collect()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("base", self.base.namespace())
            .field("symbols", &self.symbols().len())
            .field("allowed_dependencies", &self.allowed_dependencies)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.base.namespace())
    }
}
