//! # Symbols
//!
//! The boundary between the module model and whatever analyzes the actual code.
//!
//! An importer ([`SymbolImporter`]) turns an [`ImportScope`] (root namespaces, auxiliary
//! namespaces, test inclusion and an ignore predicate) into an immutable [`SymbolUniverse`].
//! The graph and verification logic only ever sees the universe, so it can be exercised
//! against synthetic in-memory symbol graphs.
//!
//! ## Example
//!
//! ```rust
//! use modulith_symbols::{ImportScope, InMemoryImporter, SymbolImporter};
//! use modulith_symbols::domain::symbol::Symbol;
//!
//! # fn main() -> Result<(), modulith_symbols::SymbolError> {
//! let importer = InMemoryImporter::new([
//!     Symbol::new("com.acme.orders.Order").referencing(["com.acme.catalog.Item"]),
//!     Symbol::new("com.acme.catalog.Item"),
//!     Symbol::new("org.thirdparty.Util"),
//! ]);
//!
//! let universe = importer.import_scoped(&ImportScope::new(["com.acme"])?)?;
//! assert_eq!(universe.len(), 2);
//! assert!(universe.contains("com.acme.catalog.Item"));
//! # Ok(())
//! # }
//! ```

mod error;
mod importer;
mod universe;

pub use crate::error::{SymbolError, SymbolErrorExt};
pub use crate::importer::{ImportScope, InMemoryImporter, STEREOTYPE_NAMESPACES, SymbolImporter};
pub use crate::universe::SymbolUniverse;
pub use modulith_domain as domain;
