//! Uniform request outcome returned by every gateway operation.
//!
//! DESIGN
//! ======
//! Callers render `Outcome` directly (inline form errors, result panels), so
//! the serialized shape is the wire-compatible `{success, data?}` /
//! `{success, error}` pair rather than serde's default enum encoding.

#[cfg(test)]
#[path = "outcome_test.rs"]
mod outcome_test;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::GatewayError;

/// Result of a single gateway operation. Exactly one variant per call.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T = ()> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Success payload, if any.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Success(data) => Outcome::Success(f(data)),
            Self::Failure(message) => Outcome::Failure(message),
        }
    }

    /// Convert into a `Result` for callers that want `?` propagation.
    ///
    /// # Errors
    ///
    /// Returns the failure message when the outcome is `Failure`.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(message) => Err(message),
        }
    }
}

impl<T> From<Result<T, GatewayError>> for Outcome<T> {
    fn from(result: Result<T, GatewayError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(data) => {
                // Unit payloads serialize to `null`; omit them like an absent `data`.
                let value = serde_json::to_value(data).map_err(serde::ser::Error::custom)?;
                let mut state = serializer.serialize_struct("Outcome", 2)?;
                state.serialize_field("success", &true)?;
                if value.is_null() {
                    state.skip_field("data")?;
                } else {
                    state.serialize_field("data", &value)?;
                }
                state.end()
            }
            Self::Failure(message) => {
                let mut state = serializer.serialize_struct("Outcome", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", message)?;
                state.end()
            }
        }
    }
}
