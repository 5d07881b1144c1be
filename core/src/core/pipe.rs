// aqueduct/src/core/pipe.rs

//! Defines the `Pipe<I, O>` trait, the unit of work every pipeline step and
//! interactor implements, and the `PipeType` identity used for registry
//! membership, configuration matching, and resolution.

use crate::error::AqueductResult;
use async_trait::async_trait;
use std::any::{type_name, TypeId};

use super::port::InputPort;

/// The identity of a concrete pipe type.
///
/// One `PipeType` value serves three purposes: it is a member of the use-case
/// registry, the match key of a [`PipeConfiguration`] entry, and the lookup
/// key handed to the service provider. Equality is `TypeId` equality, so the
/// relation between a pipe instance and its configuration entry is declared
/// statically rather than probed at runtime.
///
/// [`PipeConfiguration`]: crate::core::configuration::PipeConfiguration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipeType {
  id: TypeId,
  name: &'static str,
}

impl PipeType {
  /// The identity of the pipe type `P`.
  pub fn of<P: 'static>() -> Self {
    Self {
      id: TypeId::of::<P>(),
      name: type_name::<P>(),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }
}

impl std::fmt::Display for PipeType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name)
  }
}

/// One step of a use-case pipeline: a validator, an authorisation enforcer,
/// an interactor, or any custom stage.
///
/// A pipe is stateful for the duration of a single invocation: instances are
/// resolved fresh per invocation and discarded afterwards, so no state
/// survives between calls.
///
/// A pipe reports a *business* failure by recording it internally and
/// returning `true` from [`Pipe::has_failed`] after `execute` completes,
/// typically alongside a "present failure" call on the output port. Business
/// failures drive the invoker's short-circuit/override protocol and are the
/// expected, recoverable path. A *fatal* failure (broken infrastructure, an
/// I/O error the pipe cannot express through the output port) is returned as
/// an `Err` instead and aborts the whole invocation.
#[async_trait]
pub trait Pipe<I, O>: Send
where
  I: InputPort,
  O: Send + Sync + 'static,
{
  /// The concrete identity of this pipe. Implementations return
  /// `PipeType::of::<Self>()`; this is the explicit declaration that ties an
  /// instance back to its configuration entry.
  fn pipe_type(&self) -> PipeType;

  /// Runs the pipe against the use case's input, presenting results or
  /// failures through the output port.
  async fn execute(&mut self, input: &I, output: &O) -> AqueductResult<()>;

  /// Whether this pipe recorded a business failure during `execute`.
  ///
  /// The default is `false`, suitable for pipes that cannot fail (most
  /// interactors).
  fn has_failed(&self) -> bool {
    false
  }
}
