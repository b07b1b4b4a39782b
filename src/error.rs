use thiserror::Error;

/// Errors surfaced by the dispatcher and its configuration boundary.
///
/// Every variant is raised before a host is selected, so a failed call never
/// leaves a partially applied dispatch behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// The pool, the policy or one of the tuning values cannot be used
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl DispatchError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
