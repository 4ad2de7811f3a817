use crate::error::{ExecutionError, ExecutionErrorExt};
use modulith_domain::config::{BootstrapMode, ModuleTestConfig, ModulithConfig};
use modulith_domain::namespace::Namespace;
use modulith_kernel::memo::Memoized;
use modulith_model::{Module, Modules, ModulesIter};
use modulith_symbols::SymbolImporter;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// The bootstrap plan of a test anchored in one module.
///
/// Knows which namespaces the test needs (the anchor's module plus its dependency closure up to
/// the depth of the [`BootstrapMode`]) and answers, per scan candidate, whether it should be kept
/// out of the bootstrap. Derived views are computed on first access and cached.
pub struct ModuleTestExecution {
    anchor: String,
    mode: BootstrapMode,
    module: Arc<Module>,
    modules: Arc<Modules>,
    base_packages: Memoized<Vec<Namespace>>,
    dependencies: Memoized<Vec<String>>,
}

impl ModuleTestExecution {
    /// Detects the modules described by `config` and plans the execution for `anchor`.
    ///
    /// # Errors
    /// Returns [`ExecutionError::Model`] if module detection fails or, with
    /// `verify_automatically`, if verification fails; [`ExecutionError::Configuration`] if the
    /// anchor does not live in a module's base namespace.
    pub fn new(
        anchor: &str,
        config: &ModulithConfig,
        test_config: ModuleTestConfig,
        importer: &dyn SymbolImporter,
    ) -> Result<Self, ExecutionError> {
        let modules = Modules::of(config, importer)
            .with_context(|| format!("Detecting modules for {anchor}"))?;
        Self::with_modules(anchor, Arc::new(modules), test_config)
    }

    /// Plans the execution for `anchor` on an already detected registry.
    ///
    /// # Errors
    /// See [`ModuleTestExecution::new`].
    pub fn with_modules(
        anchor: &str,
        modules: Arc<Modules>,
        test_config: ModuleTestConfig,
    ) -> Result<Self, ExecutionError> {
        let namespace = Namespace::of_type(anchor).ok_or_else(|| {
            ExecutionError::configuration(format!("Anchor '{anchor}' has no namespace"))
        })?;
        let module = modules
            .module_by_base_package(namespace.as_str())
            .and_then(|module| modules.shared_module(module.name()))
            .ok_or_else(|| {
                ExecutionError::configuration(format!(
                    "Anchor '{anchor}' is not located in the base namespace of any module"
                ))
            })?;

        let execution = Self {
            anchor: anchor.to_owned(),
            mode: test_config.mode,
            module,
            modules,
            base_packages: Memoized::new(),
            dependencies: Memoized::new(),
        };

        if test_config.verify_automatically {
            execution.verify()?;
        }

        info!(
            anchor = %execution.anchor,
            module = %execution.module.name(),
            mode = %execution.mode,
            "Prepared module test execution"
        );

        Ok(execution)
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub const fn bootstrap_mode(&self) -> BootstrapMode {
        self.mode
    }

    /// The module the anchor lives in.
    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn modules(&self) -> &Modules {
        &self.modules
    }

    /// Namespaces to scan: the module's own base namespace first, then its closure's.
    pub fn base_packages(&self) -> &[Namespace] {
        self.base_packages.get_or_init(|| {
            let packages = self.module.base_packages(&self.modules, self.mode.depth());
            debug!(anchor = %self.anchor, packages = packages.len(), "Computed base packages");
            packages
        })
    }

    /// Names of the modules the test needs besides its own, in breadth-first order.
    pub fn dependencies(&self) -> &[String] {
        self.dependencies.get_or_init(|| {
            self.module
                .dependencies(&self.modules, self.mode.depth())
                .into_iter()
                .map(|module| module.name().to_owned())
                .collect()
        })
    }

    /// Whether a scan candidate should be filtered out of the bootstrap.
    ///
    /// `true` only for names inside a root namespace but outside the dependency closure, i.e.
    /// modules the test does not need. Names inside the closure and third-party names outside
    /// every root are `false`.
    pub fn includes(&self, fully_qualified_name: &str) -> bool {
        let in_closure =
            self.base_packages().iter().any(|namespace| namespace.contains(fully_qualified_name));
        let filtered = !in_closure && self.modules.within_root_packages(fully_qualified_name);

        debug!(
            anchor = %self.anchor,
            candidate = %fully_qualified_name,
            filtered,
            "Evaluated scan candidate"
        );
        filtered
    }

    /// Verifies the backing registry; a no-op once it passed.
    ///
    /// # Errors
    /// Returns [`ExecutionError::Model`] wrapping the verification failure.
    pub fn verify(&self) -> Result<(), ExecutionError> {
        self.modules.verify().with_context(|| format!("Verifying modules for {}", self.anchor))
    }
}

impl fmt::Debug for ModuleTestExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleTestExecution")
            .field("anchor", &self.anchor)
            .field("mode", &self.mode)
            .field("module", &self.module.name())
            .field("base_packages", &self.base_packages.get())
            .field("dependencies", &self.dependencies.get())
            .finish_non_exhaustive()
    }
}

/// Iterates every module of the backing registry, not only the ones the test bootstraps.
impl<'a> IntoIterator for &'a ModuleTestExecution {
    type Item = &'a Module;
    type IntoIter = ModulesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}
