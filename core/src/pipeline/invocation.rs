// aqueduct/src/pipeline/invocation.rs

//! Contains the `UseCaseInvoker`: sequential execution of an assembled
//! pipeline under the failure short-circuit/override protocol.

use std::sync::Arc;

use tracing::{event, instrument, Level};

use crate::core::configuration::PipeConfiguration;
use crate::core::port::InputPort;
use crate::error::{AqueductError, AqueductResult};
use crate::pipeline::assembly::PipelineFactory;

/// The engine's caller-facing surface. Handles the invocation of use-case
/// pipelines: assembles a pipeline for the input port's use case, then
/// drives it to exhaustion.
pub struct UseCaseInvoker<I, O>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  factory: Arc<dyn PipelineFactory<I, O>>,
}

impl<I, O> UseCaseInvoker<I, O>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  pub fn new(factory: Arc<dyn PipelineFactory<I, O>>) -> Self {
    Self { factory }
  }

  /// Invokes the use case for `input`, presenting results through `output`.
  ///
  /// Every pipe in the assembled pipeline is considered in order. A pipe
  /// runs while no earlier pipe has failed, or unconditionally when its
  /// configuration entry ignores upstream failures; anything else is
  /// discarded unexecuted. A running pipe is wrapped in its entry's pre and
  /// post hooks, awaited to completion before the next pipe is considered.
  ///
  /// Returns `Ok(true)` when every executed pipe completed without
  /// recording a failure; `Ok(false)` when any executed pipe failed, with
  /// the details already delivered through the output port. Structural
  /// errors (unknown use case, malformed configuration, resolution
  /// failures) and fatal pipe errors abort the invocation with `Err`.
  #[instrument(
        name = "UseCaseInvoker::invoke",
        skip_all,
        fields(use_case_key = I::USE_CASE_KEY),
        err(Display)
    )]
  pub async fn invoke(&self, input: &I, output: &O, configuration: &[PipeConfiguration]) -> AqueductResult<bool> {
    let mut pipeline = self.factory.create_pipeline(configuration).await?;

    let mut no_failures_yet = true;

    while let Some(mut pipe) = pipeline.pop_front() {
      // The factory only produces pipes that matched some entry, so a miss
      // here means the configuration changed out from under the invocation.
      let entry = configuration
        .iter()
        .find(|entry| entry.pipe_type() == pipe.pipe_type())
        .ok_or_else(|| AqueductError::PipeConfiguration {
          pipe: pipe.pipe_type().name(),
          message: "assembled pipe has no matching configuration entry".to_string(),
        })?;

      if !(no_failures_yet || entry.ignores_upstream_failures()) {
        event!(
          Level::DEBUG,
          pipe = %pipe.pipe_type(),
          "Discarding pipe unexecuted after an upstream failure."
        );
        continue;
      }

      entry.run_pre_hook().await;
      pipe.execute(input, output).await?;
      entry.run_post_hook().await;

      if pipe.has_failed() {
        event!(Level::DEBUG, pipe = %pipe.pipe_type(), "Pipe reported a failure.");
        no_failures_yet = false;
      }
    }

    event!(Level::DEBUG, success = no_failures_yet, "Use-case invocation finished.");
    Ok(no_failures_yet)
  }
}
