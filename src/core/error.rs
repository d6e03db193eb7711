//! Domain error taxonomy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A catalog record, selection or question broke the input contract.
    #[error("Invalid {entity} '{id}': {field} {reason}")]
    InvalidInput {
        entity: &'static str,
        id: String,
        field: &'static str,
        reason: String,
    },

    /// The advice call did not complete. The cause is kept as the source but
    /// never classified further.
    #[error("Failed to communicate with the AI model.")]
    AdviceRequestFailed(#[source] anyhow::Error),
}

impl Error {
    pub fn invalid(
        entity: &'static str,
        id: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidInput {
            entity,
            id: id.into(),
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
