use modulith_derive::modulith_error;
use std::borrow::Cow;

#[modulith_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, DemoError> {
    let value = raw.parse::<u32>().with_context(|| format!("Parsing '{raw}'"))?;
    if value == 0 {
        return Err("zero is not allowed".into());
    }
    Ok(value)
}

fn main() {
    assert_eq!(parse("7").ok(), Some(7));

    let err = parse("x").unwrap_err();
    assert!(err.to_string().contains("(Parsing 'x')"));

    let err = parse("0").context("Validating input").unwrap_err();
    assert!(err.to_string().starts_with("Internal error (Validating input)"));
}
