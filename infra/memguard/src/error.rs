use std::borrow::Cow;

#[cbox_derive::cbox_error]
pub enum MemoryError {
    #[error("Secure buffer used after destruction{}", format_context(.context))]
    UseAfterDestroy { context: Option<Cow<'static, str>> },

    #[error("Secure buffer encoding error{}: {source}", format_context(.context))]
    Encoding { source: std::str::Utf8Error, context: Option<Cow<'static, str>> },

    #[error("Entropy source failure{}: {message}", format_context(.context))]
    Entropy { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Enclave error{}: {message}", format_context(.context))]
    Enclave { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl MemoryError {
    pub(crate) fn entropy(err: &getrandom::Error) -> Self {
        Self::Entropy { message: err.to_string().into(), context: None }
    }

    pub(crate) const fn enclave(message: &'static str) -> Self {
        Self::Enclave { message: Cow::Borrowed(message), context: None }
    }
}
