// aqueduct/src/core/configuration.rs

//! Defines the pipeline configuration: the caller-declared, ordered intent
//! for which pipes participate in an invocation, in what order, with what
//! inclusion mode, failure-override behaviour, and optional pre/post hooks.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::pipe::PipeType;

/// An asynchronous callable run immediately before or after a pipe's
/// `execute`. Hooks take no arguments and cannot fail; they are intended for
/// cross-cutting side effects such as timing or audit marks.
pub type PipeHook = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Determines how a configuration entry contributes a pipe to the assembled
/// pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipeConfigurationOption {
  /// The pipe participates only if it is registered for the use case; the
  /// entry then fixes its position. Registered pipes matching no `Default`
  /// entry are dropped.
  Default,
  /// The pipe is resolved and inserted at the entry's position even when the
  /// use case does not register it. Skipped if the use case already
  /// registers the same type.
  Insert,
}

/// One entry of a pipeline configuration.
///
/// The entry's index within the configuration slice is its desired relative
/// position. A pipe type may appear more than once; each `Insert` occurrence
/// produces an independent instance.
#[derive(Clone)]
pub struct PipeConfiguration {
  pipe_type: PipeType,
  option: PipeConfigurationOption,
  ignore_upstream_failures: bool,
  pre_hook: Option<PipeHook>,
  post_hook: Option<PipeHook>,
}

impl PipeConfiguration {
  /// A `Default`-mode entry for the pipe type `P`.
  pub fn new<P: 'static>() -> Self {
    Self::for_type(PipeType::of::<P>())
  }

  /// An `Insert`-mode entry for the pipe type `P`.
  pub fn inserted<P: 'static>() -> Self {
    Self::for_type(PipeType::of::<P>()).with_option(PipeConfigurationOption::Insert)
  }

  /// A `Default`-mode entry from an already-computed identity, for callers
  /// that carry configurations as data.
  pub fn for_type(pipe_type: PipeType) -> Self {
    Self {
      pipe_type,
      option: PipeConfigurationOption::Default,
      ignore_upstream_failures: false,
      pre_hook: None,
      post_hook: None,
    }
  }

  pub fn with_option(mut self, option: PipeConfigurationOption) -> Self {
    self.option = option;
    self
  }

  /// Marks this pipe as a must-run step: it executes even when an earlier
  /// pipe has already failed. The flag does not forgive this pipe's own
  /// failures.
  pub fn ignore_upstream_failures(mut self) -> Self {
    self.ignore_upstream_failures = true;
    self
  }

  /// Registers a hook awaited immediately before the pipe's `execute`.
  pub fn with_pre_hook<F, Fut>(mut self, hook: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    self.pre_hook = Some(wrap_hook(hook));
    self
  }

  /// Registers a hook awaited immediately after the pipe's `execute`.
  pub fn with_post_hook<F, Fut>(mut self, hook: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    self.post_hook = Some(wrap_hook(hook));
    self
  }

  pub fn pipe_type(&self) -> PipeType {
    self.pipe_type
  }

  pub fn option(&self) -> PipeConfigurationOption {
    self.option
  }

  pub fn ignores_upstream_failures(&self) -> bool {
    self.ignore_upstream_failures
  }

  pub(crate) async fn run_pre_hook(&self) {
    if let Some(hook) = &self.pre_hook {
      (hook.as_ref())().await;
    }
  }

  pub(crate) async fn run_post_hook(&self) {
    if let Some(hook) = &self.post_hook {
      (hook.as_ref())().await;
    }
  }
}

fn wrap_hook<F, Fut>(hook: F) -> PipeHook
where
  F: Fn() -> Fut + Send + Sync + 'static,
  Fut: Future<Output = ()> + Send + 'static,
{
  Arc::new(move || {
    let fut: Pin<Box<dyn Future<Output = ()> + Send>> = Box::pin(hook());
    fut
  })
}

// PipeHook closures carry no useful Debug output; report their presence only.
impl std::fmt::Debug for PipeConfiguration {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PipeConfiguration")
      .field("pipe_type", &self.pipe_type)
      .field("option", &self.option)
      .field("ignore_upstream_failures", &self.ignore_upstream_failures)
      .field("pre_hook_present", &self.pre_hook.is_some())
      .field("post_hook_present", &self.post_hook.is_some())
      .finish()
  }
}
