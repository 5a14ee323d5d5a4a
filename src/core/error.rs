/// Failures the client distinguishes on purpose. Everything else travels as a
/// plain `anyhow::Error` with context attached.
#[derive(Debug, thiserror::Error)]
pub enum StoryPathError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("location is not bound to a project; choose a project before saving")]
    MissingProject,

    #[error("invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("{method} {url} failed with status {status}: {body}")]
    Http {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },
}

impl StoryPathError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        StoryPathError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
