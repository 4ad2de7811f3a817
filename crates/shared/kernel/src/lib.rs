//! Kernel utilities shared across the modulith crates.
//! Keep this crate lightweight; it hosts configuration loading and the compute-once cell used for
//! derived module views.
//!
//! ## Memoization
//! ```rust
//! use modulith_kernel::memo::Memoized;
//!
//! let cell: Memoized<Vec<u32>> = Memoized::new();
//! assert_eq!(cell.get_or_init(|| vec![1, 2, 3]).len(), 3);
//! assert_eq!(cell.get_or_init(|| unreachable!()).len(), 3);
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use modulith_kernel::config::load_config;
//! use modulith_kernel::domain::config::ModulithConfig;
//!
//! let cfg: ModulithConfig = load_config(Some("modulith.toml")).unwrap();
//! ```
pub mod config;
pub mod memo;

pub use modulith_domain as domain;
