use cbox_derive::cbox_error;
use std::borrow::Cow;

#[cbox_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(input: &str) -> Result<u32, DemoError> {
    let value = input.parse::<u32>().context("Parsing demo value")?;
    Ok(value)
}

fn main() {
    let _ = parse("42");
    let _ = DemoError::from("boom").kind();
}
