//! # Module Tests
//!
//! Plans the bootstrap of tests anchored in a single module.
//!
//! A [`ModuleTestExecution`] narrows what a test loads to the anchor's module and the modules
//! it depends on (bounded by the [`BootstrapMode`](modulith_domain::config::BootstrapMode)).
//! Its [`includes`](ModuleTestExecution::includes) predicate tells a component scanner which
//! candidates to leave out. Executions are cached per anchor in an [`ExecutionRegistry`].
//!
//! ## Example
//!
//! ```rust
//! use modulith_test::ExecutionRegistry;
//! use modulith_test::domain::config::{BootstrapMode, ModuleTestConfig, ModulithConfig};
//! use modulith_test::domain::symbol::Symbol;
//! use modulith_symbols::InMemoryImporter;
//! use modulith_test::ModuleTestExecution;
//!
//! # fn main() -> Result<(), modulith_test::ExecutionError> {
//! let importer = InMemoryImporter::new([
//!     Symbol::new("com.acme.orders.Order").referencing(["com.acme.catalog.Item"]),
//!     Symbol::new("com.acme.catalog.Item"),
//!     Symbol::new("com.acme.shipping.Dock"),
//! ]);
//! let config = ModulithConfig::new("com.acme");
//! let mode = ModuleTestConfig::new(BootstrapMode::DirectDependencies);
//!
//! let registry = ExecutionRegistry::new();
//! let execution = registry.get_or_try_init("com.acme.orders.OrderTests", || {
//!     ModuleTestExecution::new("com.acme.orders.OrderTests", &config, mode, &importer)
//! })?;
//!
//! assert!(!execution.includes("com.acme.catalog.Item"));
//! assert!(execution.includes("com.acme.shipping.Dock"));
//! assert!(!execution.includes("org.thirdparty.Util"));
//! # Ok(())
//! # }
//! ```

mod execution;
mod finder;
mod registry;

pub use crate::error::{ExecutionError, ExecutionErrorExt};
pub use crate::execution::ModuleTestExecution;
pub use crate::finder::{ConfigurationFinder, StaticConfigurationFinder};
pub use crate::registry::ExecutionRegistry;
pub use modulith_domain as domain;
