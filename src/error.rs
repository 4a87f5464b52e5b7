#[derive(thiserror::Error, Debug)]
pub enum JSError {
    #[error("Type error: {message}")]
    TypeError { message: String },

    #[error("Reference error: {message}")]
    ReferenceError { message: String },

    #[error("Runtime error: {message}")]
    RuntimeError { message: String },
}

impl JSError {
    pub fn is_type_error(&self) -> bool {
        matches!(self, JSError::TypeError { .. })
    }

    pub fn message(&self) -> String {
        match self {
            JSError::TypeError { message } | JSError::ReferenceError { message } | JSError::RuntimeError { message } => message.clone(),
        }
    }
}

// Macros (rather than functions) so raise sites can pass anything
// Display-able without an explicit `.to_string()`.
#[macro_export]
macro_rules! raise_type_error {
    ($msg:expr) => {
        $crate::JSError::TypeError { message: $msg.to_string() }
    };
}

#[macro_export]
macro_rules! raise_reference_error {
    ($msg:expr) => {
        $crate::JSError::ReferenceError { message: $msg.to_string() }
    };
}

#[macro_export]
macro_rules! raise_runtime_error {
    ($msg:expr) => {
        $crate::JSError::RuntimeError { message: $msg.to_string() }
    };
}
