use std::fmt;

#[derive(Debug)]
pub enum CoreError {
    InvalidParameter(String),
    NotFound(String),
    DuplicateId(String),
    ValidationFailed(Vec<String>),
    RequirementsNotMet(Vec<String>),
    CooldownActive { remaining_secs: u64 },
    InsufficientCoins { required: i64, available: i64 },
    InvalidTransition { from: String, to: String },
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoreError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            CoreError::NotFound(msg) => write!(f, "Not found: {}", msg),
            CoreError::DuplicateId(id) => write!(f, "Duplicate id: {}", id),
            CoreError::ValidationFailed(errors) => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            CoreError::RequirementsNotMet(missing) => {
                write!(f, "Requirements not met: {}", missing.join("; "))
            }
            CoreError::CooldownActive { remaining_secs } => {
                write!(f, "Cooldown active: {}s remaining", remaining_secs)
            }
            CoreError::InsufficientCoins { required, available } => {
                write!(f, "Insufficient coins: required {}, available {}", required, available)
            }
            CoreError::InvalidTransition { from, to } => {
                write!(f, "Invalid status transition: {} -> {}", from, to)
            }
            CoreError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            CoreError::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            CoreError::DeserializationError(err.to_string())
        } else {
            CoreError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Validation outcome consumed by callers before committing a mutation.
///
/// Mirrors the `{ is_valid, errors }` shape the UI expects from the
/// validation endpoints.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { is_valid: errors.is_empty(), errors }
    }

    pub fn push(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        if !other.is_valid {
            self.is_valid = false;
            self.errors.extend(other.errors);
        }
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(CoreError::ValidationFailed(self.errors))
        }
    }
}
