use thiserror::Error;

use crate::util::wrapper_type::WrapperType;

/// Failures when moving objects across the C boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected class type: {found:?} (expected {expected:?})")]
    UnexpectedWrapperType {
        expected: WrapperType,
        found: WrapperType,
    },
    #[error("null struct pointer")]
    NullStruct,
}
