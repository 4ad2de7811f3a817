use crate::violation::{VerificationError, Violation};
use modulith_symbols::SymbolError;
use std::borrow::Cow;

/// Error types of the module model.
///
/// `Configuration` and `Import` are raised while constructing [`crate::Modules`];
/// `Verification` only ever comes out of [`crate::Modules::verify`].
#[modulith_derive::modulith_error]
pub enum ModelError {
    #[error("Invalid module configuration{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Symbol import failed{}: {source}", format_context(.context))]
    Import { source: SymbolError, context: Option<Cow<'static, str>> },

    #[error("{source}{}", format_context(.context))]
    Verification { source: VerificationError, context: Option<Cow<'static, str>> },
}

impl ModelError {
    pub(crate) fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Configuration { message: message.into(), context: None }
    }

    /// Every collected violation when this is a verification failure.
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            Self::Verification { source, .. } => Some(source.violations()),
            _ => None,
        }
    }
}
