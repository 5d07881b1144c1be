// greeter_app/src/main.rs

mod adapters;
mod config;
mod pipeline_configuration;
mod use_cases;

use std::sync::Arc;

use aqueduct::{
  FactoryProvider, PipelineFactory, RegistryPipelineFactory, RequiredInputValidator, TypeCatalog, UseCaseInvoker,
  UseCaseRegistry,
};
use tracing::info;

use crate::adapters::{ConversationController, GreetPresenter};
use crate::config::AppConfig;
use crate::pipeline_configuration::{default_configuration, validation_only_configuration};
use crate::use_cases::greet::{GreetInputPort, GreetInteractor, NameChecker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let app_config = AppConfig::from_env()?;

  // Declare the use case's types and build the registry once.
  let catalog = TypeCatalog::new()
    .with_input_port::<GreetInputPort>()
    .with_pipe::<NameChecker, GreetInputPort>()
    .with_pipe::<GreetInteractor, GreetInputPort>();
  let registry = Arc::new(UseCaseRegistry::from_catalog(&catalog)?);

  // Register a constructor per pipe. The validator is not registered for
  // the use case; the configuration forces it in.
  let provider = Arc::new(FactoryProvider::<GreetInputPort, GreetPresenter>::new());
  provider.register::<NameChecker>()?;
  provider.register::<GreetInteractor>()?;
  provider.register::<RequiredInputValidator>()?;

  let factory: Arc<dyn PipelineFactory<GreetInputPort, GreetPresenter>> =
    Arc::new(RegistryPipelineFactory::new(registry, provider));
  let controller = ConversationController::new(UseCaseInvoker::new(factory));

  let presenter = GreetPresenter::default();
  let configuration = default_configuration();

  let success = controller
    .greet(GreetInputPort::new(app_config.visitor_name.clone()), &presenter, &configuration)
    .await?;
  info!(success, greeting = ?presenter.last_greeting(), "greeted a visitor");

  let success = controller
    .greet(GreetInputPort::default(), &presenter, &configuration)
    .await?;
  info!(success, "attempted to greet a nameless visitor");

  if app_config.run_probe {
    let probe = validation_only_configuration();
    let success = controller.greet(GreetInputPort::new("  "), &presenter, &probe).await?;
    info!(success, "probed a blank name without greeting");
  }

  Ok(())
}
