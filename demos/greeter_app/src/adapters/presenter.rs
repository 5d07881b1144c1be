use aqueduct::{ValidationOutputPort, ValidationResult};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::use_cases::greet::GreetOutputPort;

/// Presents greet results on the console and remembers the last greeting so
/// callers can inspect it.
#[derive(Debug, Default)]
pub struct GreetPresenter {
  last_greeting: Mutex<Option<String>>,
}

impl GreetPresenter {
  pub fn last_greeting(&self) -> Option<String> {
    self.last_greeting.lock().clone()
  }
}

#[async_trait]
impl ValidationOutputPort for GreetPresenter {
  async fn present_validation_failure(&self, failure: ValidationResult) {
    if let Some(summary) = &failure.summary {
      println!("{summary}");
    }
    for (property, messages) in &failure.errors {
      println!("'{property}' {}", messages.join(", "));
    }
  }
}

#[async_trait]
impl GreetOutputPort for GreetPresenter {
  async fn present_greeting(&self, greeting: String) {
    println!("{greeting}");
    *self.last_greeting.lock() = Some(greeting);
  }
}
