use std::borrow::Cow;

/// A specialized [`SymbolError`] enum of this crate.
#[modulith_derive::modulith_error]
pub enum SymbolError {
    #[error("Invalid import scope{}: {source}", format_context(.context))]
    Scope { source: modulith_domain::DomainError, context: Option<Cow<'static, str>> },

    #[error("Malformed symbol snapshot{}: {source}", format_context(.context))]
    Snapshot { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Snapshot I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}
