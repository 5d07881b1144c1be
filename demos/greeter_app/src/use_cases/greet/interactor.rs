use aqueduct::{AqueductResult, Pipe, PipeType};
use async_trait::async_trait;

use super::input_port::GreetInputPort;
use super::output_port::GreetOutputPort;

/// Performs the main action of the greet use case.
#[derive(Debug, Default)]
pub struct GreetInteractor;

#[async_trait]
impl<O> Pipe<GreetInputPort, O> for GreetInteractor
where
  O: GreetOutputPort + 'static,
{
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, input: &GreetInputPort, output: &O) -> AqueductResult<()> {
    let name = input.name.as_deref().unwrap_or("stranger");
    output.present_greeting(format!("Hello {name}!")).await;
    Ok(())
  }
}
