// aqueduct/examples/diagnostics_insertion.rs
//
// Demonstrates forced insertion and the failure-override protocol: a
// diagnostic pipe is inserted at three points of the configuration without
// being registered for the use case, a validator fails the invocation, and a
// must-run cleanup step still executes.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

use aqueduct::{
  AqueductResult, FactoryProvider, InputPort, Pipe, PipeConfiguration, PipeType, PipelineFactory,
  RegistryPipelineFactory, TypeCatalog, UseCaseInvoker, UseCaseRegistry,
};

#[derive(Debug, Default)]
struct ArchiveDocumentRequest {
  document_id: Option<u64>,
}

impl InputPort for ArchiveDocumentRequest {
  const USE_CASE_KEY: &'static str = module_path!();
}

/// Collects the steps that actually ran.
#[derive(Debug, Default)]
struct StepLog {
  steps: Mutex<Vec<&'static str>>,
}

impl StepLog {
  fn record(&self, step: &'static str) {
    self.steps.lock().push(step);
  }
}

macro_rules! logging_pipe {
  ($name:ident, $label:literal) => {
    #[derive(Debug, Default)]
    struct $name;

    #[async_trait]
    impl Pipe<ArchiveDocumentRequest, StepLog> for $name {
      fn pipe_type(&self) -> PipeType {
        PipeType::of::<Self>()
      }

      async fn execute(&mut self, _input: &ArchiveDocumentRequest, output: &StepLog) -> AqueductResult<()> {
        output.record($label);
        Ok(())
      }
    }
  };
}

logging_pipe!(ArchiveDocument, "archive_document");
logging_pipe!(NotifyOwner, "notify_owner");
logging_pipe!(TraceMark, "trace_mark");

/// Fails unless the request names a document.
#[derive(Debug, Default)]
struct CheckDocumentExists {
  failed: bool,
}

#[async_trait]
impl Pipe<ArchiveDocumentRequest, StepLog> for CheckDocumentExists {
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, input: &ArchiveDocumentRequest, output: &StepLog) -> AqueductResult<()> {
    output.record("check_document_exists");
    if input.document_id.is_none() {
      self.failed = true;
    }
    Ok(())
  }

  fn has_failed(&self) -> bool {
    self.failed
  }
}

/// Must run whatever happened upstream.
#[derive(Debug, Default)]
struct ReleaseLock;

#[async_trait]
impl Pipe<ArchiveDocumentRequest, StepLog> for ReleaseLock {
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, _input: &ArchiveDocumentRequest, output: &StepLog) -> AqueductResult<()> {
    output.record("release_lock");
    Ok(())
  }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let catalog = TypeCatalog::new()
    .with_input_port::<ArchiveDocumentRequest>()
    .with_pipe::<CheckDocumentExists, ArchiveDocumentRequest>()
    .with_pipe::<ArchiveDocument, ArchiveDocumentRequest>()
    .with_pipe::<NotifyOwner, ArchiveDocumentRequest>()
    .with_pipe::<ReleaseLock, ArchiveDocumentRequest>();
  let registry = Arc::new(UseCaseRegistry::from_catalog(&catalog)?);

  let provider = Arc::new(FactoryProvider::<ArchiveDocumentRequest, StepLog>::new());
  provider.register::<CheckDocumentExists>()?;
  provider.register::<ArchiveDocument>()?;
  provider.register::<NotifyOwner>()?;
  provider.register::<ReleaseLock>()?;
  provider.register::<TraceMark>()?;

  let factory: Arc<dyn PipelineFactory<ArchiveDocumentRequest, StepLog>> =
    Arc::new(RegistryPipelineFactory::new(registry, provider));
  let invoker = UseCaseInvoker::new(factory);

  // TraceMark is not registered for the use case; each Insert entry places
  // an independent instance. ReleaseLock runs even after a failure.
  let configuration = vec![
    PipeConfiguration::inserted::<TraceMark>(),
    PipeConfiguration::new::<CheckDocumentExists>(),
    PipeConfiguration::inserted::<TraceMark>(),
    PipeConfiguration::new::<ArchiveDocument>(),
    PipeConfiguration::new::<NotifyOwner>(),
    PipeConfiguration::inserted::<TraceMark>(),
    PipeConfiguration::new::<ReleaseLock>().ignore_upstream_failures(),
  ];

  let log = StepLog::default();
  let success = invoker
    .invoke(&ArchiveDocumentRequest { document_id: Some(7) }, &log, &configuration)
    .await?;
  info!(success, steps = ?log.steps.lock(), "archive with document id");

  let log = StepLog::default();
  let success = invoker
    .invoke(&ArchiveDocumentRequest { document_id: None }, &log, &configuration)
    .await?;
  info!(success, steps = ?log.steps.lock(), "archive without document id");

  Ok(())
}
