// aqueduct/src/validation.rs

//! A ready-made pipe that rejects invocations whose input port is missing
//! required values.

use async_trait::async_trait;

use crate::core::pipe::{Pipe, PipeType};
use crate::core::port::InputPort;
use crate::error::AqueductResult;
use crate::outputs::{ValidationOutputPort, ValidationResult};

/// Implemented by input ports that carry required values, naming the ones
/// currently missing. The declaration is explicit so the check is resolved
/// at compile time rather than by inspecting the port's fields at runtime.
pub trait RequiredInputs {
  /// Names of the required inputs that have no value.
  fn missing_inputs(&self) -> Vec<&'static str>;
}

/// Fails the invocation when the input port reports missing required values,
/// presenting them through the validation output port.
///
/// Usable with any use case whose input port implements [`RequiredInputs`];
/// typically included as an `Insert` entry at the front of a pipeline
/// configuration.
#[derive(Debug, Default)]
pub struct RequiredInputValidator {
  failed: bool,
}

#[async_trait]
impl<I, O> Pipe<I, O> for RequiredInputValidator
where
  I: InputPort + RequiredInputs,
  O: ValidationOutputPort + 'static,
{
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, input: &I, output: &O) -> AqueductResult<()> {
    let missing = input.missing_inputs();
    if missing.is_empty() {
      return Ok(());
    }

    let summary = format!("Required inputs must have a value: {}", missing.join(", "));
    output
      .present_validation_failure(ValidationResult::from_summary(summary))
      .await;
    self.failed = true;
    Ok(())
  }

  fn has_failed(&self) -> bool {
    self.failed
  }
}
