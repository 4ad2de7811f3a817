//! # Module Model
//!
//! Detects logical modules in a symbol graph and checks the architecture rules between them.
//!
//! Every direct child namespace of a root namespace is a [`Module`]. A module depends on
//! another when one of its symbols references (or extends) a symbol located in the other.
//! [`Modules::verify`] reports dependency cycles between modules and references that leave a
//! module's declared allow-list, all in one [`VerificationError`].
//!
//! ## Example
//!
//! ```rust
//! use modulith_model::Modules;
//! use modulith_symbols::InMemoryImporter;
//! use modulith_symbols::domain::config::{DependencyDepth, ModulithConfig};
//! use modulith_symbols::domain::symbol::Symbol;
//!
//! # fn main() -> Result<(), modulith_model::ModelError> {
//! let importer = InMemoryImporter::new([
//!     Symbol::new("com.acme.orders.Order").referencing(["com.acme.catalog.Item"]),
//!     Symbol::new("com.acme.catalog.Item"),
//! ]);
//! let config = ModulithConfig::new("com.acme").allow("com.acme.orders", ["catalog"]);
//!
//! let modules = Modules::of(&config, &importer)?;
//! modules.verify()?;
//!
//! let orders = modules.module_by_name("orders").expect("orders module");
//! let closure = orders.dependencies(&modules, DependencyDepth::Unbounded);
//! assert_eq!(closure.iter().map(|m| m.name()).collect::<Vec<_>>(), ["catalog"]);
//! # Ok(())
//! # }
//! ```

mod cycles;
mod error;
mod module;
mod modules;
mod namespace_tree;
mod violation;

pub use crate::cycles::MAX_WITNESSES_PER_EDGE;
pub use crate::error::{ModelError, ModelErrorExt};
pub use crate::module::{Module, ModuleDependency};
pub use crate::modules::{Modules, ModulesBuilder, ModulesIter};
pub use crate::namespace_tree::{NamespaceNode, NamespaceTree};
pub use crate::violation::{
    CycleEdge, CycleViolation, DependencyViolation, SymbolReference, VerificationError, Violation,
};
