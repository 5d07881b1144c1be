// tests/pipeline_invocation_tests.rs
mod common;

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use common::*;

use aqueduct::{
  AqueductError, AqueductResult, FactoryProvider, PipeConfiguration, Pipeline, PipelineFactory, TypeCatalog,
  UseCaseInvoker,
};

#[tokio::test]
async fn test_invoke_runs_pipes_in_order_and_succeeds() {
  setup_tracing();
  let invoker = greet_invoker(&greet_catalog(), greet_provider());

  let configuration = vec![
    PipeConfiguration::new::<ValidateName>(),
    PipeConfiguration::new::<CheckPermissions>(),
    PipeConfiguration::new::<Greet>(),
  ];

  let output = RecordingOutput::new();
  let success = invoker
    .invoke(&GreetRequest::default(), &output, &configuration)
    .await
    .unwrap();

  assert!(success);
  assert_eq!(output.executed(), vec!["validate_name", "check_permissions", "greet"]);
}

#[tokio::test]
async fn test_invoke_with_empty_configuration_returns_true() {
  setup_tracing();
  let catalog = TypeCatalog::new().with_input_port::<GreetRequest>();
  let invoker = greet_invoker(&catalog, greet_provider());

  let output = RecordingOutput::new();
  let success = invoker.invoke(&GreetRequest::default(), &output, &[]).await.unwrap();

  assert!(success);
  assert!(output.executed().is_empty());
}

#[tokio::test]
async fn test_failure_short_circuits_downstream_pipes() {
  setup_tracing();
  let provider = Arc::new(FactoryProvider::<GreetRequest, RecordingOutput>::new());
  provider.register_factory(ValidateName::failing).unwrap();
  provider.register::<Greet>().unwrap();
  provider.register::<CleanupSession>().unwrap();

  let catalog = TypeCatalog::new()
    .with_input_port::<GreetRequest>()
    .with_pipe::<ValidateName, GreetRequest>()
    .with_pipe::<Greet, GreetRequest>()
    .with_pipe::<CleanupSession, GreetRequest>();
  let invoker = greet_invoker(&catalog, provider);

  let configuration = vec![
    PipeConfiguration::new::<ValidateName>(),
    PipeConfiguration::new::<Greet>(),
    PipeConfiguration::new::<CleanupSession>().ignore_upstream_failures(),
  ];

  let output = RecordingOutput::new();
  let success = invoker
    .invoke(&GreetRequest::default(), &output, &configuration)
    .await
    .unwrap();

  // Greet is discarded unexecuted; the must-run cleanup still runs.
  assert!(!success);
  assert_eq!(output.executed(), vec!["validate_name", "cleanup_session"]);
  assert_eq!(output.validation_failures().len(), 1);
}

#[tokio::test]
async fn test_override_does_not_forgive_own_failure() {
  setup_tracing();
  let provider = Arc::new(FactoryProvider::<GreetRequest, RecordingOutput>::new());
  provider.register::<Greet>().unwrap();
  provider.register_factory(CleanupSession::failing).unwrap();

  let catalog = TypeCatalog::new()
    .with_input_port::<GreetRequest>()
    .with_pipe::<Greet, GreetRequest>()
    .with_pipe::<CleanupSession, GreetRequest>();
  let invoker = greet_invoker(&catalog, provider);

  let configuration = vec![
    PipeConfiguration::new::<Greet>(),
    PipeConfiguration::new::<CleanupSession>().ignore_upstream_failures(),
  ];

  let output = RecordingOutput::new();
  let success = invoker
    .invoke(&GreetRequest::default(), &output, &configuration)
    .await
    .unwrap();

  assert!(!success);
  assert_eq!(output.executed(), vec!["greet", "cleanup_session"]);
}

#[tokio::test]
async fn test_fatal_pipe_error_aborts_the_invocation() {
  setup_tracing();
  let provider = Arc::new(FactoryProvider::<GreetRequest, RecordingOutput>::new());
  provider.register::<ValidateName>().unwrap();
  provider.register::<ExplodingPipe>().unwrap();
  provider.register::<Greet>().unwrap();

  let catalog = TypeCatalog::new()
    .with_input_port::<GreetRequest>()
    .with_pipe::<ValidateName, GreetRequest>()
    .with_pipe::<ExplodingPipe, GreetRequest>()
    .with_pipe::<Greet, GreetRequest>();
  let invoker = greet_invoker(&catalog, provider);

  let configuration = vec![
    PipeConfiguration::new::<ValidateName>(),
    PipeConfiguration::new::<ExplodingPipe>(),
    PipeConfiguration::new::<Greet>(),
  ];

  let output = RecordingOutput::new();
  let result = invoker.invoke(&GreetRequest::default(), &output, &configuration).await;

  assert!(matches!(result, Err(AqueductError::Execution { .. })));
  assert_eq!(output.executed(), vec!["validate_name", "exploding"]);
}

// A factory that ignores the registry and hands back a fixed pipeline.
struct StaticPipelineFactory;

#[async_trait]
impl PipelineFactory<GreetRequest, RecordingOutput> for StaticPipelineFactory {
  async fn create_pipeline(
    &self,
    _configuration: &[PipeConfiguration],
  ) -> AqueductResult<Pipeline<GreetRequest, RecordingOutput>> {
    let mut pipeline: Pipeline<GreetRequest, RecordingOutput> = VecDeque::new();
    pipeline.push_back(Box::new(Greet));
    Ok(pipeline)
  }
}

#[tokio::test]
async fn test_pipe_without_configuration_entry_is_a_configuration_error() {
  setup_tracing();
  let invoker: UseCaseInvoker<GreetRequest, RecordingOutput> = UseCaseInvoker::new(Arc::new(StaticPipelineFactory));

  let output = RecordingOutput::new();
  let result = invoker.invoke(&GreetRequest::default(), &output, &[]).await;

  assert!(matches!(result, Err(AqueductError::PipeConfiguration { .. })));
  assert!(output.executed().is_empty());
}
