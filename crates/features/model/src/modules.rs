use crate::cycles;
use crate::error::{ModelError, ModelErrorExt};
use crate::module::Module;
use crate::namespace_tree::{NamespaceNode, NamespaceTree};
use crate::violation::{VerificationError, Violation};
use fxhash::FxHashMap;
use modulith_domain::config::{ModulithConfig, NamingMode};
use modulith_domain::namespace::Namespace;
use modulith_domain::symbol::Symbol;
use modulith_symbols::{ImportScope, SymbolImporter, SymbolUniverse};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, instrument, warn};

type IgnorePredicate = Arc<dyn Fn(&Symbol) -> bool + Send + Sync>;

/// The registry of all modules detected below a set of root namespaces.
///
/// Construction imports the symbols, partitions them into modules and validates the
/// configuration. Architecture rules are only checked by [`Modules::verify`], which runs the
/// graph analysis at most once per registry.
pub struct Modules {
    modules: Vec<Arc<Module>>,
    index: FxHashMap<String, usize>,
    roots: Vec<NamespaceNode>,
    tree: NamespaceTree,
    naming: NamingMode,
    verified: Mutex<bool>,
    #[cfg(test)]
    verification_runs: AtomicUsize,
}

impl Modules {
    pub fn builder() -> ModulesBuilder {
        ModulesBuilder::default()
    }

    /// Detects the modules described by `config`.
    ///
    /// # Errors
    /// Returns [`ModelError::Configuration`] for invalid, overlapping or empty roots and for
    /// module name collisions, and [`ModelError::Import`] if the importer fails.
    pub fn of(config: &ModulithConfig, importer: &dyn SymbolImporter) -> Result<Self, ModelError> {
        Self::builder().config(config).build(importer)
    }

    fn assemble(
        universe: SymbolUniverse,
        roots: &[Namespace],
        naming: NamingMode,
        allowed: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, ModelError> {
        let tree = NamespaceTree::new(universe);
        let root_nodes =
            roots.iter().map(|root| tree.resolve_single(root)).collect::<Result<Vec<_>, _>>()?;

        let mut modules: Vec<Arc<Module>> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();

        for root in roots {
            for node in tree.direct_children(root) {
                let declared = allowed.get(node.name()).map(Vec::as_slice);
                let module = Module::new(node, naming, declared);

                if let Some(&existing) = index.get(module.name()) {
                    let existing = &modules[existing];
                    return Err(ModelError::configuration(format!(
                        "Module name '{}' is shared by '{}' and '{}', use fully qualified naming",
                        module.name(),
                        existing.base_namespace().name(),
                        module.base_namespace().name()
                    )));
                }

                index.insert(module.name().to_owned(), modules.len());
                modules.push(Arc::new(module));
            }
        }

        for base in allowed.keys() {
            if !modules.iter().any(|module| module.base_namespace().name() == base) {
                warn!(namespace = %base, "Dependency declaration for an unknown module");
            }
        }

        info!(
            modules = modules.len(),
            roots = ?roots.iter().map(Namespace::as_str).collect::<Vec<_>>(),
            "Detected application modules"
        );

        Ok(Self {
            modules,
            index,
            roots: root_nodes,
            tree,
            naming,
            verified: Mutex::new(false),
            #[cfg(test)]
            verification_runs: AtomicUsize::new(0),
        })
    }

    pub fn module_by_name(&self, name: &str) -> Option<&Module> {
        self.index.get(name).map(|&idx| self.modules[idx].as_ref())
    }

    /// A shared handle to the named module, for holders that outlive a borrow of the registry.
    pub fn shared_module(&self, name: &str) -> Option<Arc<Module>> {
        self.index.get(name).map(|&idx| Arc::clone(&self.modules[idx]))
    }

    /// The module whose base namespace contains the fully qualified `name`.
    pub fn module_containing(&self, name: &str) -> Option<&Module> {
        self.iter().find(|module| module.contains_name(name))
    }

    pub fn module_by_type(&self, symbol: &Symbol) -> Option<&Module> {
        self.iter().find(|module| module.contains(symbol))
    }

    /// The module whose base namespace is exactly `namespace`.
    pub fn module_by_base_package(&self, namespace: &str) -> Option<&Module> {
        self.iter().find(|module| module.base_namespace().name() == namespace)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.module_by_type(symbol).is_some()
    }

    /// Whether the fully qualified `name` lies within any root namespace.
    pub fn within_root_packages(&self, name: &str) -> bool {
        self.roots.iter().any(|root| root.contains(name))
    }

    pub fn root_namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.roots.iter().map(NamespaceNode::namespace)
    }

    pub fn roots(&self) -> &[NamespaceNode] {
        &self.roots
    }

    pub const fn tree(&self) -> &NamespaceTree {
        &self.tree
    }

    pub const fn universe(&self) -> &SymbolUniverse {
        self.tree.universe()
    }

    pub const fn naming(&self) -> NamingMode {
        self.naming
    }

    /// Modules in detection order: roots in declaration order, children sorted by namespace.
    pub fn iter(&self) -> ModulesIter<'_> {
        self.into_iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn is_verified(&self) -> bool {
        *self.verified.lock()
    }

    /// Collects every cycle and every dependency declaration violation without caching.
    pub fn violations(&self) -> Vec<Violation> {
        let cycles = cycles::detect(self).into_iter().map(Violation::from);
        let dependencies = self
            .modules
            .iter()
            .flat_map(|module| module.verify_dependencies(self))
            .map(Violation::from);

        cycles.chain(dependencies).collect()
    }

    /// Checks the architecture rules once; later calls after a success return immediately.
    ///
    /// # Errors
    /// Returns [`ModelError::Verification`] carrying every violation found.
    #[instrument(skip(self), fields(modules = self.modules.len()))]
    pub fn verify(&self) -> Result<(), ModelError> {
        let mut verified = self.verified.lock();
        if *verified {
            debug!("Modules already verified");
            return Ok(());
        }

        #[cfg(test)]
        self.verification_runs.fetch_add(1, Ordering::Relaxed);
        let violations = self.violations();
        if !violations.is_empty() {
            warn!(violations = violations.len(), "Module verification failed");
            return Err(VerificationError::new(violations).into());
        }

        *verified = true;
        info!("Modules verified");
        Ok(())
    }
}

impl fmt::Debug for Modules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modules")
            .field("modules", &self.iter().map(Module::name).collect::<Vec<_>>())
            .field("roots", &self.root_namespaces().collect::<Vec<_>>())
            .field("naming", &self.naming)
            .field("verified", &self.is_verified())
            .finish_non_exhaustive()
    }
}

/// Iterator over the modules of a registry.
pub type ModulesIter<'a> =
    std::iter::Map<std::slice::Iter<'a, Arc<Module>>, fn(&Arc<Module>) -> &Module>;

impl<'a> IntoIterator for &'a Modules {
    type Item = &'a Module;
    type IntoIter = ModulesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter().map(module_ref as fn(&Arc<Module>) -> &Module)
    }
}

fn module_ref(module: &Arc<Module>) -> &Module {
    module
}

/// Collects the inputs of module detection.
#[derive(Default)]
pub struct ModulesBuilder {
    roots: Vec<String>,
    naming: NamingMode,
    allowed: BTreeMap<String, Vec<String>>,
    ignored: Vec<String>,
    predicates: Vec<IgnorePredicate>,
    include_tests: bool,
}

impl ModulesBuilder {
    /// Adopts roots, naming, ignored names and dependency declarations from `config`.
    #[must_use]
    pub fn config(mut self, config: &ModulithConfig) -> Self {
        self.roots.extend(config.root_namespaces());
        self.naming = config.naming;
        self.ignored.extend(config.ignored.iter().cloned());
        for (base, module) in &config.modules {
            if let Some(allowed) = &module.allowed_dependencies {
                self.allowed.insert(base.clone(), allowed.clone());
            }
        }
        self
    }

    #[must_use]
    pub fn root(mut self, namespace: impl Into<String>) -> Self {
        self.roots.push(namespace.into());
        self
    }

    #[must_use]
    pub const fn naming(mut self, naming: NamingMode) -> Self {
        self.naming = naming;
        self
    }

    /// Restricts the module based at `base_namespace` to the named modules.
    #[must_use]
    pub fn allow<I, S>(mut self, base_namespace: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed
            .insert(base_namespace.into(), dependencies.into_iter().map(Into::into).collect());
        self
    }

    /// Drops every symbol equal to, or located below, `name`.
    #[must_use]
    pub fn ignore_name(mut self, name: impl Into<String>) -> Self {
        self.ignored.push(name.into());
        self
    }

    #[must_use]
    pub fn ignore(mut self, predicate: impl Fn(&Symbol) -> bool + Send + Sync + 'static) -> Self {
        self.predicates.push(Arc::new(predicate));
        self
    }

    #[must_use]
    pub const fn include_tests(mut self, enabled: bool) -> Self {
        self.include_tests = enabled;
        self
    }

    /// Imports the symbols and partitions them into modules.
    ///
    /// # Errors
    /// See [`Modules::of`].
    pub fn build(self, importer: &dyn SymbolImporter) -> Result<Modules, ModelError> {
        let roots = validate_roots(&self.roots)?;
        let ignored = self
            .ignored
            .iter()
            .map(Namespace::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ModelError::configuration(format!("Invalid ignored name: {err}")))?;

        let mut scope = ImportScope::new(roots.iter().map(Namespace::as_str))
            .context("Building import scope")?
            .include_tests(self.include_tests);
        if !ignored.is_empty() {
            scope = scope.ignore(move |symbol| ignored.iter().any(|ns| ns.contains(&symbol.name)));
        }
        for predicate in self.predicates {
            scope = scope.ignore(move |symbol| predicate(symbol));
        }

        let universe =
            importer.import_scoped(&scope).context("Importing symbols for module detection")?;

        Modules::assemble(universe, &roots, self.naming, &self.allowed)
    }
}

impl fmt::Debug for ModulesBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModulesBuilder")
            .field("roots", &self.roots)
            .field("naming", &self.naming)
            .field("allowed", &self.allowed)
            .field("ignored", &self.ignored)
            .field("predicates", &self.predicates.len())
            .field("include_tests", &self.include_tests)
            .finish()
    }
}

fn validate_roots(roots: &[String]) -> Result<Vec<Namespace>, ModelError> {
    let mut validated: Vec<Namespace> = Vec::with_capacity(roots.len());

    for root in roots {
        let namespace = Namespace::new(root).map_err(|err| {
            ModelError::configuration(format!("Invalid root namespace '{root}': {err}"))
        })?;
        if validated.contains(&namespace) {
            continue;
        }
        if let Some(other) = validated.iter().find(|other| {
            other.contains_namespace(&namespace) || namespace.contains_namespace(other)
        }) {
            return Err(ModelError::configuration(format!(
                "Root namespaces '{other}' and '{namespace}' overlap"
            )));
        }
        validated.push(namespace);
    }

    if validated.is_empty() {
        return Err(ModelError::configuration("At least one root namespace is required"));
    }
    Ok(validated)
}
