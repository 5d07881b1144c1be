// aqueduct/examples/greet_basic.rs

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use aqueduct::{
  AqueductResult, FactoryProvider, InputPort, Pipe, PipeConfiguration, PipeType, PipelineFactory,
  RegistryPipelineFactory, TypeCatalog, UseCaseInvoker, UseCaseRegistry, ValidationOutputPort, ValidationResult,
};

// --- The greet use case ---

#[derive(Debug, Default)]
struct GreetInputPort {
  name: String,
}

impl InputPort for GreetInputPort {
  const USE_CASE_KEY: &'static str = module_path!();
}

// The capabilities a presenter must offer to this use case.
#[async_trait]
trait GreetOutputPort: ValidationOutputPort {
  async fn present_greeting(&self, greeting: String);
}

/// Rejects blank names before the interactor runs.
#[derive(Debug, Default)]
struct NameChecker {
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
    if input.name.trim().is_empty() {
      output
        .present_validation_failure(ValidationResult::from_error("name", "a name is required to greet"))
        .await;
      self.failed = true;
    }
    Ok(())
  }

  fn has_failed(&self) -> bool {
    self.failed
  }
}

/// The terminal step: performs the greeting.
#[derive(Debug, Default)]
struct GreetInteractor;

#[async_trait]
impl<O> Pipe<GreetInputPort, O> for GreetInteractor
where
  O: GreetOutputPort + 'static,
{
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, input: &GreetInputPort, output: &O) -> AqueductResult<()> {
    output.present_greeting(format!("Hello {}!", input.name)).await;
    Ok(())
  }
}

// --- A console presenter ---

#[derive(Debug, Default)]
struct ConsolePresenter;

#[async_trait]
impl ValidationOutputPort for ConsolePresenter {
  async fn present_validation_failure(&self, failure: ValidationResult) {
    for (property, messages) in &failure.errors {
      println!("invalid {property}: {}", messages.join("; "));
    }
  }
}

#[async_trait]
impl GreetOutputPort for ConsolePresenter {
  async fn present_greeting(&self, greeting: String) {
    println!("{greeting}");
  }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  // 1. Declare the use case's types and build the registry.
  let catalog = TypeCatalog::new()
    .with_input_port::<GreetInputPort>()
    .with_pipe::<NameChecker, GreetInputPort>()
    .with_pipe::<GreetInteractor, GreetInputPort>();
  let registry = Arc::new(UseCaseRegistry::from_catalog(&catalog)?);

  // 2. Register pipe constructors.
  let provider = Arc::new(FactoryProvider::<GreetInputPort, ConsolePresenter>::new());
  provider.register::<NameChecker>()?;
  provider.register::<GreetInteractor>()?;

  // 3. Wire the invoker.
  let factory: Arc<dyn PipelineFactory<GreetInputPort, ConsolePresenter>> =
    Arc::new(RegistryPipelineFactory::new(registry, provider));
  let invoker = UseCaseInvoker::new(factory);

  // 4. Declare the pipeline order and invoke.
  let configuration = vec![
    PipeConfiguration::new::<NameChecker>(),
    PipeConfiguration::new::<GreetInteractor>(),
  ];

  let presenter = ConsolePresenter;

  let success = invoker
    .invoke(&GreetInputPort { name: "Ben".into() }, &presenter, &configuration)
    .await?;
  info!(success, "greeting finished");

  let success = invoker
    .invoke(&GreetInputPort { name: "  ".into() }, &presenter, &configuration)
    .await?;
  info!(success, "blank-name greeting finished");

  Ok(())
}
