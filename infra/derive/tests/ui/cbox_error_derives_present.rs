use cbox_derive::cbox_error;
use std::borrow::Cow;

#[cbox_error]
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("Rejected{}", format_context(.context))]
    Rejected { context: Option<Cow<'static, str>> },
}

fn main() {
    let err = DemoError::Rejected { context: None };
    assert_eq!(err.kind(), "Rejected");
}
