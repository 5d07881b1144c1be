use aqueduct::{AqueductResult, Pipe, PipeType, ValidationResult};
use async_trait::async_trait;

use super::input_port::GreetInputPort;
use super::output_port::GreetOutputPort;

const MAX_NAME_LENGTH: usize = 40;

/// Rejects names the greeter cannot sensibly address.
#[derive(Debug, Default)]
pub struct NameChecker {
  failed: bool,
}

#[async_trait]
impl<O> Pipe<GreetInputPort, O> for NameChecker
where
  O: GreetOutputPort + 'static,
{
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, input: &GreetInputPort, output: &O) -> AqueductResult<()> {
    // The required-input validator runs before this pipe; a missing name
    // never reaches it.
    let Some(name) = input.name.as_deref() else {
      return Ok(());
    };

    let mut result = ValidationResult::default();
    if name.trim().is_empty() {
      result.add_error("name", "must not be blank");
    }
    if name.len() > MAX_NAME_LENGTH {
      result.add_error("name", "is too long to fit on the nametag");
    }

    if !result.is_empty() {
      output.present_validation_failure(result).await;
      self.failed = true;
    }
    Ok(())
  }

  fn has_failed(&self) -> bool {
    self.failed
  }
}
