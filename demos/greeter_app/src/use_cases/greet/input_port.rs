use aqueduct::{InputPort, RequiredInputs};

/// Request data for the greet use case.
#[derive(Debug, Default)]
pub struct GreetInputPort {
  pub name: Option<String>,
}

impl GreetInputPort {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
    }
  }
}

impl InputPort for GreetInputPort {
  const USE_CASE_KEY: &'static str = module_path!();
}

impl RequiredInputs for GreetInputPort {
  fn missing_inputs(&self) -> Vec<&'static str> {
    if self.name.is_none() {
      vec!["name"]
    } else {
      Vec::new()
    }
  }
}
