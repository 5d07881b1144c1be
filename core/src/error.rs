// aqueduct/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AqueductError {
  /// The input port's use-case key has no registry entry. A wiring defect:
  /// either the input port was never declared to the catalog, or the registry
  /// handed to the factory was built from a different catalog.
  #[error("No use case registered for input port '{input_port}' (key '{use_case_key}')")]
  UnknownUseCase {
    input_port: &'static str,
    use_case_key: &'static str,
  },

  /// The pipeline configuration is malformed with respect to the assembled
  /// pipeline (an inserted pipe could not be bracketed, or an executed pipe
  /// has no matching entry).
  #[error("Pipe configuration error for '{pipe}': {message}")]
  PipeConfiguration { pipe: &'static str, message: String },

  /// A pipe was declared against an input port whose use-case key is
  /// unavailable. Raised at registry construction; indicates a defect in the
  /// discovery data, not in the registry builder.
  #[error("Could not determine the use case of input port '{input_port}'")]
  Discovery { input_port: &'static str },

  /// The service provider has no registration for the requested pipe type.
  #[error("Was not able to retrieve '{pipe}' from the service provider")]
  Lookup { pipe: &'static str },

  /// The service provider failed while constructing a pipe instance.
  #[error("Failed to construct '{pipe}'. Source: {source}")]
  DependencyConstruction {
    pipe: &'static str,
    #[source]
    source: AnyhowError,
  },

  /// A second registration was attempted for a pipe type the provider
  /// already knows.
  #[error("An already registered service is conflicting with '{service}'")]
  DuplicateService { service: &'static str },

  /// A pipe's `execute` raised a fatal error. Business failures are not
  /// errors; they travel through the pipe's failed flag and the output port.
  #[error("Error in pipe execution. Source: {source}")]
  Execution {
    #[source]
    source: AnyhowError,
  },
}

// Lets pipe implementations bubble arbitrary failures up with `?`.
impl From<AnyhowError> for AqueductError {
  fn from(err: AnyhowError) -> Self {
    AqueductError::Execution { source: err }
  }
}

pub type AqueductResult<T, E = AqueductError> = std::result::Result<T, E>;
