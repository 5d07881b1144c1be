// aqueduct/src/outputs.rs

//! Output-port capability traits and the result values pipes present through
//! them.
//!
//! An output port is whatever the caller supplies: the engine never touches
//! it. Pipes narrow it by bounding their `O` parameter over the capability
//! traits below, so "does this output port support presenting a validation
//! failure" is answered at compile time.

use std::collections::HashMap;

use async_trait::async_trait;

/// An authorisation result from an authorisation enforcer.
#[derive(Clone, Debug, Default)]
pub struct AuthorisationResult {
  pub reason: Option<String>,
}

impl AuthorisationResult {
  pub fn new(reason: impl Into<String>) -> Self {
    Self {
      reason: Some(reason.into()),
    }
  }
}

/// A validation result from a validator: per-property errors and/or an
/// overall summary.
#[derive(Clone, Debug, Default)]
pub struct ValidationResult {
  pub errors: HashMap<String, Vec<String>>,
  pub summary: Option<String>,
}

impl ValidationResult {
  pub fn from_error(property: impl Into<String>, message: impl Into<String>) -> Self {
    let mut result = Self::default();
    result.add_error(property, message);
    result
  }

  pub fn from_summary(summary: impl Into<String>) -> Self {
    Self {
      summary: Some(summary.into()),
      ..Self::default()
    }
  }

  pub fn add_error(&mut self, property: impl Into<String>, message: impl Into<String>) {
    self.errors.entry(property.into()).or_default().push(message.into());
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty() && self.summary.is_none()
  }
}

/// An output port for use cases that require authentication.
#[async_trait]
pub trait AuthenticationOutputPort: Send + Sync {
  /// Presents an authentication failure.
  async fn present_unauthenticated(&self);
}

/// An output port for use cases that enforce authorisation rules.
#[async_trait]
pub trait AuthorisationOutputPort: Send + Sync {
  /// Presents an authorisation failure.
  async fn present_unauthorised(&self, failure: AuthorisationResult);
}

/// An output port for use cases that validate their input.
#[async_trait]
pub trait ValidationOutputPort: Send + Sync {
  /// Presents a validation failure.
  async fn present_validation_failure(&self, failure: ValidationResult);
}
