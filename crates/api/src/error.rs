use thiserror::Error;

/// Outcome of a list intent that could not be carried out.
///
/// Store failures are deliberately opaque: missing access, unknown records
/// and rejected writes all end up as `StoreFailure`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("There is no reminder at row {0}")]
    RowOutOfRange(usize),
    #[error("The reminder store did not accept the change")]
    StoreFailure,
}
