// aqueduct/src/provider.rs

//! Defines the `ServiceProvider` trait, the boundary through which the
//! assembler obtains concrete pipe instances, and `FactoryProvider`, the
//! bundled factory-table implementation.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{event, Level};

use crate::core::pipe::{Pipe, PipeType};
use crate::core::port::InputPort;
use crate::error::{AqueductError, AqueductResult};

/// Produces a concrete pipe instance for a pipe type identity.
///
/// Implementations are shared across concurrent invocations and must hand
/// out a fresh instance per call: assembled pipelines own their pipes
/// exclusively and pipes carry per-invocation state.
pub trait ServiceProvider<I, O>: Send + Sync
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  /// Resolves `pipe_type` to a new instance.
  ///
  /// Fails with [`AqueductError::Lookup`] when the type has no registration
  /// and [`AqueductError::DependencyConstruction`] when construction itself
  /// fails. The engine propagates either unchanged.
  fn resolve(&self, pipe_type: PipeType) -> AqueductResult<Box<dyn Pipe<I, O>>>;
}

type PipeFactory<I, O> = Box<dyn Fn() -> AqueductResult<Box<dyn Pipe<I, O>>> + Send + Sync>;

/// A factory-table service provider: each registered pipe type maps to a
/// closure that constructs a fresh instance on every resolution.
///
/// Registration takes `&self` so wiring code can share the provider behind
/// an `Arc` from the start; the table lock is never held across an await.
pub struct FactoryProvider<I, O>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  factories: Mutex<HashMap<PipeType, PipeFactory<I, O>>>,
}

impl<I, O> FactoryProvider<I, O>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      factories: Mutex::new(HashMap::new()),
    }
  }

  /// Registers `P` with its `Default` constructor.
  pub fn register<P>(&self) -> AqueductResult<()>
  where
    P: Pipe<I, O> + Default + 'static,
  {
    self.register_factory(P::default)
  }

  /// Registers `P` with a custom constructor.
  pub fn register_factory<P, F>(&self, factory: F) -> AqueductResult<()>
  where
    P: Pipe<I, O> + 'static,
    F: Fn() -> P + Send + Sync + 'static,
  {
    self.insert(
      PipeType::of::<P>(),
      Box::new(move || Ok(Box::new(factory()) as Box<dyn Pipe<I, O>>)),
    )
  }

  /// Registers `P` with a fallible constructor; construction errors surface
  /// as [`AqueductError::DependencyConstruction`] at resolution time.
  pub fn register_fallible_factory<P, F>(&self, factory: F) -> AqueductResult<()>
  where
    P: Pipe<I, O> + 'static,
    F: Fn() -> anyhow::Result<P> + Send + Sync + 'static,
  {
    let pipe_type = PipeType::of::<P>();
    self.insert(
      pipe_type,
      Box::new(move || match factory() {
        Ok(pipe) => Ok(Box::new(pipe) as Box<dyn Pipe<I, O>>),
        Err(source) => Err(AqueductError::DependencyConstruction {
          pipe: pipe_type.name(),
          source,
        }),
      }),
    )
  }

  fn insert(&self, pipe_type: PipeType, factory: PipeFactory<I, O>) -> AqueductResult<()> {
    let mut factories = self.factories.lock();
    if factories.contains_key(&pipe_type) {
      return Err(AqueductError::DuplicateService {
        service: pipe_type.name(),
      });
    }
    event!(Level::DEBUG, pipe = %pipe_type, "Pipe factory registered.");
    factories.insert(pipe_type, factory);
    Ok(())
  }
}

impl<I, O> Default for FactoryProvider<I, O>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<I, O> ServiceProvider<I, O> for FactoryProvider<I, O>
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  fn resolve(&self, pipe_type: PipeType) -> AqueductResult<Box<dyn Pipe<I, O>>> {
    let factories = self.factories.lock();
    let factory = factories.get(&pipe_type).ok_or_else(|| {
      event!(Level::ERROR, pipe = %pipe_type, "No factory registered for pipe type.");
      AqueductError::Lookup {
        pipe: pipe_type.name(),
      }
    })?;
    factory()
  }
}
