use std::borrow::Cow;

/// Errors raised while constructing domain values.
#[modulith_derive::modulith_error]
pub enum DomainError {
    #[error("Invalid namespace{}: {message}", format_context(.context))]
    InvalidNamespace { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
