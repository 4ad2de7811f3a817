#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the modulith crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! modulith-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```
//!
//! The docstring examples are `ignore`d to avoid compiling in this crate.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait with `.context(...)` and the lazy
///   `.with_context(|| ...)` for any `Result` convertible into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant
///   exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use modulith_derive::modulith_error;
/// use std::borrow::Cow;
///
/// #[modulith_error]
/// pub enum ModelError {
///     #[error("Invalid configuration{}: {message}", format_context(.context))]
///     Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Symbol import failed{}: {source}", format_context(.context))]
///     Import { source: SymbolError, context: Option<Cow<'static, str>> },
/// }
///
/// fn build() -> Result<(), ModelError> {
///     importer.import_scoped(&scope).with_context(|| format!("Importing {scope}"))?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn modulith_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
