// aqueduct/src/core/port.rs

//! Defines the `InputPort` trait and the `PortType` identity used to relate
//! pipes to the input ports they handle.

use std::any::{type_name, TypeId};

/// Marks a type as an input port: the data object that enters a use case.
///
/// Input ports are owned by the caller and passed to pipes by shared
/// reference; the engine never mutates them. Each input port belongs to
/// exactly one use case, identified by [`InputPort::USE_CASE_KEY`].
/// Conventionally the key is the `module_path!()` of the module that
/// declares the port, so one module equals one use case.
pub trait InputPort: Send + Sync + 'static {
  /// Identifies the use case this input port belongs to.
  const USE_CASE_KEY: &'static str;
}

/// The identity of a concrete input-port type, used as plain data in the
/// discovery catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortType {
  id: TypeId,
  name: &'static str,
}

impl PortType {
  /// The identity of the input-port type `I`.
  pub fn of<I: 'static>() -> Self {
    Self {
      id: TypeId::of::<I>(),
      name: type_name::<I>(),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }
}

impl std::fmt::Display for PortType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name)
  }
}
