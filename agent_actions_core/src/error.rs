//! Error types for action providers.

use crate::schema::FieldType;

/// Schema validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: String,
    },

    #[error("field '{field}' value {value} is outside the allowed range{}", range_hint(.minimum, .maximum))]
    OutOfRange {
        field: String,
        value: f64,
        minimum: Option<f64>,
        maximum: Option<f64>,
    },

    #[error("arguments must be an object, got {0}")]
    NotAnObject(String),

    #[error("duplicate field '{0}' in schema")]
    DuplicateField(String),

    #[error("malformed arguments: {0}")]
    Malformed(String),
}

fn range_hint(minimum: &Option<f64>, maximum: &Option<f64>) -> String {
    match (*minimum, *maximum) {
        (Some(min), Some(max)) => format!(" [{min}, {max}]"),
        (Some(min), None) => format!(" (>= {min})"),
        (None, Some(max)) => format!(" (<= {max})"),
        (None, None) => String::new(),
    }
}

/// Failure of a single action invocation.
///
/// These never leave the dispatch boundary as errors; they are rendered into
/// the `"Error ..."` string handed back to the agent.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(#[from] SchemaError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Remote(String),

    #[error("'{0}' was not found in the model output")]
    MissingOutput(String),

    #[error("Error: 'content' was not found in the chat output for the {model} model")]
    MissingChatContent { model: String },
}

impl ActionError {
    /// Wrap an error returned by an external SDK call.
    pub fn remote(err: impl std::fmt::Display) -> Self {
        ActionError::Remote(err.to_string())
    }

    /// Render the error as the string returned to the agent.
    ///
    /// `context` names what the action was doing, e.g. `"prompting qwen model"`.
    pub fn render(&self, context: &str) -> String {
        match self {
            ActionError::MissingChatContent { .. } => self.to_string(),
            other => format!("Error {context}: {other}"),
        }
    }
}

/// Caller-side failures of the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown action: {action} (provider {provider})")]
    UnknownAction { provider: String, action: String },
}

/// Fatal errors raised while constructing a provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0} is not configured.")]
    MissingCredential(&'static str),

    #[error("Failed to initialize {provider} client: {source}")]
    ClientInit {
        provider: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("duplicate action name '{0}'")]
    DuplicateAction(String),

    #[error("invalid schema for action '{action}': {source}")]
    Schema {
        action: String,
        #[source]
        source: SchemaError,
    },
}
