// aqueduct/src/pipeline/assembly.rs

//! Contains the `PipelineFactory` trait and its registry-backed
//! implementation: filtering, ordering, and forced insertion of pipes into
//! the concrete pipeline an invocation consumes.

use std::any::type_name;
use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{event, instrument, Level};

use crate::core::configuration::{PipeConfiguration, PipeConfigurationOption};
use crate::core::pipe::{Pipe, PipeType};
use crate::core::port::InputPort;
use crate::error::{AqueductError, AqueductResult};
use crate::provider::ServiceProvider;
use crate::registry::UseCaseRegistry;

/// The concrete, ordered pipeline for one invocation. Consumed front-to-back
/// by the invoker and discarded afterwards.
pub type Pipeline<I, O> = VecDeque<Box<dyn Pipe<I, O>>>;

/// Responsible for creating the pipeline the use-case invoker executes.
#[async_trait]
pub trait PipelineFactory<I, O>: Send + Sync
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  /// Creates the ordered pipeline for `I`'s use case from the registered
  /// pipe types and the caller's pipeline configuration.
  async fn create_pipeline(&self, configuration: &[PipeConfiguration]) -> AqueductResult<Pipeline<I, O>>;
}

/// The bundled [`PipelineFactory`]: looks the use case up in a
/// [`UseCaseRegistry`], resolves instances through a [`ServiceProvider`],
/// then filters, orders, and force-inserts them per the configuration.
pub struct RegistryPipelineFactory<I, O>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  registry: Arc<UseCaseRegistry>,
  provider: Arc<dyn ServiceProvider<I, O>>,
}

impl<I, O> RegistryPipelineFactory<I, O>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  pub fn new(registry: Arc<UseCaseRegistry>, provider: Arc<dyn ServiceProvider<I, O>>) -> Self {
    Self { registry, provider }
  }
}

#[async_trait]
impl<I, O> PipelineFactory<I, O> for RegistryPipelineFactory<I, O>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  #[instrument(
        name = "PipelineFactory::create_pipeline",
        skip_all,
        fields(
            input_port = %type_name::<I>(),
            use_case_key = I::USE_CASE_KEY,
            entries = configuration.len(),
        ),
        err(Display)
    )]
  async fn create_pipeline(&self, configuration: &[PipeConfiguration]) -> AqueductResult<Pipeline<I, O>> {
    let key = I::USE_CASE_KEY;

    let registered = self.registry.pipes_for(key).ok_or_else(|| {
      event!(Level::ERROR, "Input port not found in the use-case registry.");
      AqueductError::UnknownUseCase {
        input_port: type_name::<I>(),
        use_case_key: key,
      }
    })?;

    let mut candidates = Vec::with_capacity(registered.len());
    for pipe_type in registered {
      candidates.push(self.provider.resolve(*pipe_type)?);
    }

    // The insertion step below checks representation against the resolved
    // candidates, not against the filtered pipeline.
    let resolved_types: Vec<PipeType> = candidates.iter().map(|pipe| pipe.pipe_type()).collect();

    // The configuration's Default entries are an allow-list: registered
    // pipes they do not name are dropped.
    let mut pipeline: Vec<Box<dyn Pipe<I, O>>> = candidates
      .into_iter()
      .filter(|pipe| {
        let keep = first_default_index(configuration, pipe.pipe_type()).is_some();
        if !keep {
          event!(
            Level::DEBUG,
            pipe = %pipe.pipe_type(),
            "Registered pipe matches no default configuration entry, dropping."
          );
        }
        keep
      })
      .collect();

    pipeline.sort_by_key(|pipe| first_default_index(configuration, pipe.pipe_type()));

    for (target, entry) in configuration.iter().enumerate() {
      if entry.option() != PipeConfigurationOption::Insert {
        continue;
      }
      if resolved_types.contains(&entry.pipe_type()) {
        event!(
          Level::TRACE,
          pipe = %entry.pipe_type(),
          "Insert entry already represented by a registered pipe, skipping."
        );
        continue;
      }

      let pipe = self.provider.resolve(entry.pipe_type())?;
      insert_pipe(pipe, target, &mut pipeline, configuration)?;
    }

    event!(Level::DEBUG, pipes = pipeline.len(), "Pipeline assembled.");
    Ok(pipeline.into())
  }
}

/// Index of the first `Default` entry naming `pipe_type`. Doubles as the
/// sort key: ambiguous matches resolve to the lowest index.
fn first_default_index(configuration: &[PipeConfiguration], pipe_type: PipeType) -> Option<usize> {
  configuration
    .iter()
    .position(|entry| entry.option() == PipeConfigurationOption::Default && entry.pipe_type() == pipe_type)
}

/// Index of the first entry of any mode naming `pipe_type`; the
/// configuration position a placed pipe occupies when bracketing insertions.
fn first_index(configuration: &[PipeConfiguration], pipe_type: PipeType) -> Option<usize> {
  configuration.iter().position(|entry| entry.pipe_type() == pipe_type)
}

/// Places `new_pipe` into the partially built pipeline at the position its
/// configuration index calls for, relative to the pipes already placed.
///
/// The placed pipe with the greatest configuration index below `target`
/// brackets from the left, the one with the smallest index above `target`
/// from the right. A right neighbour wins: the new pipe lands immediately
/// before it, preserving relative order against everything with a larger
/// index. With only a left neighbour the new pipe lands immediately after
/// it. Insertions run in configuration order, so each sees the effects of
/// the previous ones; repeated insert entries for one type each place an
/// independent instance.
fn insert_pipe<I, O>(
  new_pipe: Box<dyn Pipe<I, O>>,
  target: usize,
  pipeline: &mut Vec<Box<dyn Pipe<I, O>>>,
  configuration: &[PipeConfiguration],
) -> AqueductResult<()>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  if pipeline.is_empty() {
    pipeline.push(new_pipe);
    return Ok(());
  }

  // (pipeline position, configuration index) of the bracketing neighbours.
  let mut left: Option<(usize, usize)> = None;
  let mut right: Option<(usize, usize)> = None;

  for (position, existing) in pipeline.iter().enumerate() {
    let Some(index) = first_index(configuration, existing.pipe_type()) else {
      continue;
    };

    if index < target {
      if left.map_or(true, |(_, best)| index > best) {
        left = Some((position, index));
      }
    } else if index > target {
      if right.map_or(true, |(_, best)| index < best) {
        right = Some((position, index));
      }
    }
  }

  match (left, right) {
    (_, Some((position, _))) => {
      event!(Level::TRACE, pipe = %new_pipe.pipe_type(), position, "Inserting pipe before right neighbour.");
      pipeline.insert(position, new_pipe);
    }
    (Some((position, _)), None) => {
      event!(Level::TRACE, pipe = %new_pipe.pipe_type(), position = position + 1, "Inserting pipe after left neighbour.");
      pipeline.insert(position + 1, new_pipe);
    }
    (None, None) => {
      event!(Level::ERROR, pipe = %new_pipe.pipe_type(), "No neighbouring pipe brackets the requested position.");
      return Err(AqueductError::PipeConfiguration {
        pipe: new_pipe.pipe_type().name(),
        message: "no neighbouring pipe brackets the requested position".to_string(),
      });
    }
  }

  Ok(())
}
