use std::borrow::Cow;

/// Errors returned by [`crate::LoggerBuilder::init`].
#[modulith_derive::modulith_error]
pub enum LoggerError {
    /// Another global subscriber is already installed in this process.
    #[error("Could not install console subscriber{}: {source}", format_context(.context))]
    Subscriber {
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    /// Rejected builder settings (blank name, unparsable filter directive).
    #[error("Invalid logger settings{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
