use std::path::PathBuf;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Key schema of `{owner}` references undefined attribute `{attribute}`")]
    ReferentialMismatch { owner: String, attribute: String },
    #[error("Failed to render template: {0}")]
    Render(String),
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn malformed<T: Into<String>>(message: T) -> Self {
        Self::MalformedInput(message.into())
    }

    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }

    pub fn is_referential_mismatch(&self) -> bool {
        matches!(self, Self::ReferentialMismatch { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(format!("{err}"))
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let mut results: Vec<FieldError> = vec![];
        reduce(&errors, "", &mut results);
        results.sort_by(|a, b| a.field.cmp(&b.field));

        let message = results
            .iter()
            .map(|e| format!("{}: {}", e.field, e.messages.join(", ")))
            .collect::<Vec<String>>()
            .join("; ");
        Self::MalformedInput(message)
    }
}

#[derive(Debug)]
struct FieldError {
    field: String,
    messages: Vec<String>,
}

fn reduce(errors: &ValidationErrors, prefix: &str, acc: &mut Vec<FieldError>) {
    for (key, val) in errors.errors() {
        match val {
            ValidationErrorsKind::Struct(e) => {
                let p = format!("{}{}.", prefix, key);
                reduce(e, &p, acc);
            }
            ValidationErrorsKind::List(m) => {
                for (n, e) in m {
                    let p = format!("{}{}[{}].", prefix, key, n);
                    reduce(e, &p, acc);
                }
            }
            ValidationErrorsKind::Field(e) => {
                let field = format!("{}{}", prefix, key);
                let messages = e
                    .iter()
                    .map(|err| match err.message.as_ref() {
                        Some(message) => message.to_string(),
                        None => err.code.to_string(),
                    })
                    .collect();
                acc.push(FieldError { field, messages });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{Validate, ValidationError};

    #[derive(Debug, Validate)]
    struct Outer {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate]
        inner: Vec<Inner>,
    }

    #[derive(Debug, Validate)]
    struct Inner {
        #[validate(custom = "always_fails")]
        value: String,
    }

    fn always_fails(_: &str) -> std::result::Result<(), ValidationError> {
        Err(ValidationError::new("invalid_value"))
    }

    #[test]
    fn it_flattens_validation_errors_into_malformed_input() {
        let outer = Outer {
            name: "ab".into(),
            inner: vec![Inner { value: "x".into() }],
        };
        let err = Error::from(outer.validate().unwrap_err());

        assert!(err.is_malformed_input());
        assert_eq!(
            format!("{err}"),
            "Malformed input: inner[0].value: invalid_value; name: too short"
        );
    }

    #[test]
    fn it_wraps_json_errors_as_malformed_input() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn it_displays_referential_mismatch() {
        let err = Error::ReferentialMismatch {
            owner: "People".into(),
            attribute: "Id".into(),
        };
        assert!(err.is_referential_mismatch());
        assert_eq!(
            format!("{err}"),
            "Key schema of `People` references undefined attribute `Id`"
        );
    }
}
