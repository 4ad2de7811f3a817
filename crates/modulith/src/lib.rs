//! Facade crate for modulith: module boundary verification and module-scoped test planning.
//! Re-exports the shared primitives and the feature crates under one roof.
//! Keep this crate thin: it should compose other crates, not implement verification logic.
//!
//! ## Usage
//! - Add `modulith`; the `logger` feature (on by default) brings the console subscriber.
//! - Call [`verify`] from an architecture test, or use [`test::ExecutionRegistry`] to plan
//!   module-scoped test bootstraps.
//!
//! ```rust
//! use modulith::prelude::*;
//!
//! let importer = InMemoryImporter::new([
//!     Symbol::new("com.acme.orders.Order").referencing(["com.acme.catalog.Item"]),
//!     Symbol::new("com.acme.catalog.Item"),
//! ]);
//!
//! let modules = modulith::verify(&ModulithConfig::new("com.acme"), &importer).unwrap();
//! assert_eq!(modules.len(), 2);
//! assert!(modules.is_verified());
//! ```

pub use modulith_domain as domain;
pub use modulith_kernel as kernel;
#[cfg(feature = "logger")]
pub use modulith_logger as logger;
pub use modulith_model as model;
pub use modulith_symbols as symbols;
pub use modulith_test as test;

use modulith_domain::config::ModulithConfig;
use modulith_model::{ModelError, Modules};
use modulith_symbols::SymbolImporter;

/// Commonly used types for architecture tests.
pub mod prelude {
    pub use modulith_domain::config::{
        BootstrapMode, DependencyDepth, ModuleTestConfig, ModulithConfig, NamingMode,
    };
    pub use modulith_domain::namespace::Namespace;
    pub use modulith_domain::symbol::Symbol;
    pub use modulith_model::{Module, ModelError, Modules, Violation};
    pub use modulith_symbols::{ImportScope, InMemoryImporter, SymbolImporter};
    pub use modulith_test::{
        ConfigurationFinder, ExecutionError, ExecutionRegistry, ModuleTestExecution,
        StaticConfigurationFinder,
    };
}

/// Build-time enabled features (by Cargo feature).
pub const ENABLED: &[&str] = &[
    #[cfg(feature = "logger")]
    "logger",
];

#[must_use]
pub fn is_enabled(name: &str) -> bool {
    ENABLED.contains(&name)
}

/// Detects the modules of `config` and verifies their dependency rules.
///
/// # Errors
/// Returns the construction error, or [`ModelError::Verification`] listing every violation.
pub fn verify(
    config: &ModulithConfig,
    importer: &dyn SymbolImporter,
) -> Result<Modules, ModelError> {
    let modules = Modules::of(config, importer)?;
    modules.verify()?;
    Ok(modules)
}
