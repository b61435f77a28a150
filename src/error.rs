use std::path::PathBuf;

use thiserror::Error;

use crate::patch::Field;

/// Problems with the local bridge settings. Raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "No config file found. Created config template {0}.\n\
         To obtain a key, follow the instructions at developers.meethue.com/develop/get-started-2/\n\
         To find the bridge IP address, log in to your router or open the settings menu of the Hue phone app."
    )]
    TemplateCreated(PathBuf),
    #[error(
        "Bridge IP address unspecified, please add the bridge IP address to {0}.\n\
         To find the bridge IP address, log in to your router or open the settings menu of the Hue phone app."
    )]
    AddressUnset(PathBuf),
    #[error(
        "Bridge API key unspecified, please add an API key to {0}.\n\
         To obtain a key, follow the instructions at developers.meethue.com/develop/get-started-2/"
    )]
    KeyUnset(PathBuf),
    #[error("invalid value '{value}' for '{key}' in {path}")]
    InvalidValue {
        path: PathBuf,
        key: String,
        value: String,
    },
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Bad user input for a recognised command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} value not specified.")]
    MissingValue(Field),
    #[error("Specified {field} value '{value}' not interpretable.")]
    NotANumber { field: Field, value: String },
    #[error("Invalid on/off state '{0}' specified.")]
    InvalidPower(String),
    #[error("No light(s) specified.")]
    NoGroup,
    #[error("No command specified.")]
    NoChange,
}

impl ValidationError {
    /// The state field at fault, when the error concerns one.
    pub fn field(&self) -> Option<Field> {
        match self {
            ValidationError::MissingValue(field) => Some(*field),
            ValidationError::NotANumber { field, .. } => Some(*field),
            ValidationError::InvalidPower(_) => Some(Field::Power),
            ValidationError::NoGroup | ValidationError::NoChange => None,
        }
    }
}

/// Every failure a command cycle can produce.
#[derive(Debug, Error)]
pub enum HueError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not reach the bridge at {url}: {reason}")]
    Transport { url: String, reason: String },
    #[error("API error {status}\n{url}")]
    Api { url: String, status: u16 },
    #[error("bridge rejected {url}: {description}")]
    Rejected { url: String, description: String },
    #[error("malformed bridge response from {url}: {reason}")]
    Malformed { url: String, reason: String },
    #[error("Specified group '{0}' not found")]
    GroupNotFound(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl HueError {
    /// Whether the interactive loop may report this error and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HueError::GroupNotFound(_) | HueError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_input_errors_are_recoverable() {
        assert!(HueError::GroupNotFound("attic".into()).is_recoverable());
        assert!(HueError::from(ValidationError::MissingValue(Field::Hue)).is_recoverable());
        assert!(
            !HueError::Api {
                url: "http://bridge/api/key/groups".into(),
                status: 500
            }
            .is_recoverable()
        );
        assert!(
            !HueError::Transport {
                url: "http://bridge/api/key/groups".into(),
                reason: "connection refused".into()
            }
            .is_recoverable()
        );
    }

    #[test]
    fn validation_messages_name_the_field() {
        let missing = ValidationError::MissingValue(Field::Hue).to_string();
        assert!(missing.contains("color"), "{missing}");
        let bad = ValidationError::NotANumber {
            field: Field::Saturation,
            value: "red".into(),
        };
        assert!(bad.to_string().contains("saturation"));
        assert_eq!(bad.field(), Some(Field::Saturation));
    }

    #[test]
    fn api_error_reports_status_and_url() {
        let err = HueError::Api {
            url: "http://10.0.0.2/api/k/groups/3/action".into(),
            status: 404,
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("groups/3/action"));
    }
}
