use aqueduct::ValidationOutputPort;
use async_trait::async_trait;

/// The capabilities a presenter must offer to the greet use case.
#[async_trait]
pub trait GreetOutputPort: ValidationOutputPort {
  async fn present_greeting(&self, greeting: String);
}
