use aqueduct::{AqueductResult, PipeConfiguration, UseCaseInvoker};

use crate::use_cases::greet::GreetInputPort;

use super::presenter::GreetPresenter;

/// Drives conversations with the visitor through the use-case invoker.
pub struct ConversationController {
  invoker: UseCaseInvoker<GreetInputPort, GreetPresenter>,
}

impl ConversationController {
  pub fn new(invoker: UseCaseInvoker<GreetInputPort, GreetPresenter>) -> Self {
    Self { invoker }
  }

  pub async fn greet(
    &self,
    input: GreetInputPort,
    presenter: &GreetPresenter,
    configuration: &[PipeConfiguration],
  ) -> AqueductResult<bool> {
    self.invoker.invoke(&input, presenter, configuration).await
  }
}
