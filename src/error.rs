use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid layer or network construction parameters.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Unknown activation function name.
    #[error("no activation function named '{0}'")]
    Lookup(String),

    /// Training or inference data that does not fit the network.
    #[error("invalid data{}: {reason}", at(.index))]
    Validation {
        index: Option<usize>,
        reason: String,
    },

    /// Matrix dimensions that cannot be combined. Only reachable if the
    /// construction invariants were broken.
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: Vec<usize>,
        right: Vec<usize>,
    },
}

fn at(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at index {}", i),
        None => String::new(),
    }
}

impl Error {
    pub fn validation(reason: impl Into<String>) -> Error {
        Error::Validation {
            index: None,
            reason: reason.into(),
        }
    }

    pub fn validation_at(index: usize, reason: impl Into<String>) -> Error {
        Error::Validation {
            index: Some(index),
            reason: reason.into(),
        }
    }

    pub fn shape(op: &'static str, left: &[usize], right: &[usize]) -> Error {
        Error::ShapeMismatch {
            op,
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_index() {
        let e = Error::validation_at(3, "expected 2 values, got 1");
        assert_eq!(e.to_string(), "invalid data at index 3: expected 2 values, got 1");

        let e = Error::validation("5 inputs but 4 outputs");
        assert_eq!(e.to_string(), "invalid data: 5 inputs but 4 outputs");
    }
}
