// tests/common/mod.rs
#![allow(dead_code)] // Allow unused fixtures in this common test module

use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::Level;

use aqueduct::{
  AqueductResult, FactoryProvider, InputPort, Pipe, PipeType, RegistryPipelineFactory, RequiredInputs, TypeCatalog,
  UseCaseInvoker, UseCaseRegistry, ValidationOutputPort, ValidationResult,
};

// --- Input Ports ---

#[derive(Debug, Default)]
pub struct GreetRequest {
  pub name: Option<String>,
  pub title: Option<String>,
}

impl InputPort for GreetRequest {
  const USE_CASE_KEY: &'static str = "tests::greet";
}

impl RequiredInputs for GreetRequest {
  fn missing_inputs(&self) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if self.name.is_none() {
      missing.push("name");
    }
    if self.title.is_none() {
      missing.push("title");
    }
    missing
  }
}

#[derive(Debug, Default)]
pub struct FarewellRequest {
  pub name: Option<String>,
}

impl InputPort for FarewellRequest {
  const USE_CASE_KEY: &'static str = "tests::farewell";
}

// An input port that is never declared to any catalog.
#[derive(Debug, Default)]
pub struct UnmappedRequest;

impl InputPort for UnmappedRequest {
  const USE_CASE_KEY: &'static str = "tests::unmapped";
}

// --- Output Port ---

/// Records everything the pipes present, in order.
#[derive(Debug, Default)]
pub struct RecordingOutput {
  executed: Mutex<Vec<&'static str>>,
  validation_failures: Mutex<Vec<ValidationResult>>,
}

impl RecordingOutput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&self, step: &'static str) {
    self.executed.lock().push(step);
  }

  pub fn executed(&self) -> Vec<&'static str> {
    self.executed.lock().clone()
  }

  pub fn validation_failures(&self) -> Vec<ValidationResult> {
    self.validation_failures.lock().clone()
  }
}

#[async_trait]
impl ValidationOutputPort for RecordingOutput {
  async fn present_validation_failure(&self, failure: ValidationResult) {
    self.validation_failures.lock().push(failure);
  }
}

// --- Pipes for the greet use case ---

#[derive(Debug, Default)]
pub struct ValidateName {
  fail: bool,
  failed: bool,
}

impl ValidateName {
  pub fn failing() -> Self {
    Self {
      fail: true,
      failed: false,
    }
  }
}

#[async_trait]
impl Pipe<GreetRequest, RecordingOutput> for ValidateName {
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, _input: &GreetRequest, output: &RecordingOutput) -> AqueductResult<()> {
    output.record("validate_name");
    if self.fail {
      output
        .present_validation_failure(ValidationResult::from_error("name", "name rejected"))
        .await;
      self.failed = true;
    }
    Ok(())
  }

  fn has_failed(&self) -> bool {
    self.failed
  }
}

#[derive(Debug, Default)]
pub struct CheckPermissions;

#[async_trait]
impl Pipe<GreetRequest, RecordingOutput> for CheckPermissions {
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, _input: &GreetRequest, output: &RecordingOutput) -> AqueductResult<()> {
    output.record("check_permissions");
    Ok(())
  }
}

#[derive(Debug, Default)]
pub struct Greet;

#[async_trait]
impl Pipe<GreetRequest, RecordingOutput> for Greet {
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, _input: &GreetRequest, output: &RecordingOutput) -> AqueductResult<()> {
    output.record("greet");
    Ok(())
  }
}

/// A diagnostic pipe meant for `Insert`-mode configuration entries.
#[derive(Debug, Default)]
pub struct AuditTrail;

#[async_trait]
impl Pipe<GreetRequest, RecordingOutput> for AuditTrail {
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, _input: &GreetRequest, output: &RecordingOutput) -> AqueductResult<()> {
    output.record("audit_trail");
    Ok(())
  }
}

/// A must-run step, typically configured with `ignore_upstream_failures`.
#[derive(Debug, Default)]
pub struct CleanupSession {
  fail: bool,
  failed: bool,
}

impl CleanupSession {
  pub fn failing() -> Self {
    Self {
      fail: true,
      failed: false,
    }
  }
}

#[async_trait]
impl Pipe<GreetRequest, RecordingOutput> for CleanupSession {
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, _input: &GreetRequest, output: &RecordingOutput) -> AqueductResult<()> {
    output.record("cleanup_session");
    if self.fail {
      self.failed = true;
    }
    Ok(())
  }

  fn has_failed(&self) -> bool {
    self.failed
  }
}

/// Raises a fatal error mid-pipeline.
#[derive(Debug, Default)]
pub struct ExplodingPipe;

#[async_trait]
impl Pipe<GreetRequest, RecordingOutput> for ExplodingPipe {
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, _input: &GreetRequest, output: &RecordingOutput) -> AqueductResult<()> {
    output.record("exploding");
    Err(anyhow::anyhow!("pipeline infrastructure exploded").into())
  }
}

// --- Pipe for the farewell use case ---

#[derive(Debug, Default)]
pub struct Farewell;

#[async_trait]
impl Pipe<FarewellRequest, RecordingOutput> for Farewell {
  fn pipe_type(&self) -> PipeType {
    PipeType::of::<Self>()
  }

  async fn execute(&mut self, _input: &FarewellRequest, output: &RecordingOutput) -> AqueductResult<()> {
    output.record("farewell");
    Ok(())
  }
}

// --- Wiring helpers ---

/// The standard greet catalog: three pipes registered against the greet
/// input port.
pub fn greet_catalog() -> TypeCatalog {
  TypeCatalog::new()
    .with_input_port::<GreetRequest>()
    .with_pipe::<ValidateName, GreetRequest>()
    .with_pipe::<CheckPermissions, GreetRequest>()
    .with_pipe::<Greet, GreetRequest>()
}

/// A provider with default constructors for every greet-use-case pipe.
pub fn greet_provider() -> Arc<FactoryProvider<GreetRequest, RecordingOutput>> {
  let provider = Arc::new(FactoryProvider::new());
  provider.register::<ValidateName>().unwrap();
  provider.register::<CheckPermissions>().unwrap();
  provider.register::<Greet>().unwrap();
  provider.register::<AuditTrail>().unwrap();
  provider.register::<CleanupSession>().unwrap();
  provider
}

pub fn greet_factory(
  catalog: &TypeCatalog,
  provider: Arc<FactoryProvider<GreetRequest, RecordingOutput>>,
) -> RegistryPipelineFactory<GreetRequest, RecordingOutput> {
  let registry = Arc::new(UseCaseRegistry::from_catalog(catalog).expect("catalog should build"));
  RegistryPipelineFactory::new(registry, provider)
}

pub fn greet_invoker(
  catalog: &TypeCatalog,
  provider: Arc<FactoryProvider<GreetRequest, RecordingOutput>>,
) -> UseCaseInvoker<GreetRequest, RecordingOutput> {
  UseCaseInvoker::new(Arc::new(greet_factory(catalog, provider)))
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking hook executions ---
pub static PRE_HOOK_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static POST_HOOK_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_hook_counters() {
  PRE_HOOK_COUNTER.store(0, Ordering::SeqCst);
  POST_HOOK_COUNTER.store(0, Ordering::SeqCst);
}
