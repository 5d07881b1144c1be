// aqueduct/src/registry.rs

//! Defines the `TypeCatalog` (the discovery collaborator's hand-off data) and
//! the `UseCaseRegistry` built from it: a mapping from use-case key to the
//! pipe types structurally applicable to that use case.

use std::collections::HashMap;

use tracing::{event, Level};

use crate::core::pipe::PipeType;
use crate::core::port::{InputPort, PortType};
use crate::error::{AqueductError, AqueductResult};

/// Identifies one use case. Conventionally the `module_path!()` of the module
/// declaring the use case's input port.
pub type UseCaseKey = &'static str;

/// The declaration data gathered by a discovery collaborator: which types are
/// input ports (and for which use case), and which types are pipes (and
/// which input port each one handles).
///
/// The typed `with_*` methods capture the relation at compile time and are
/// the normal way to build a catalog. The raw `push_*` methods accept the
/// same facts as plain data, for collaborators that derive them elsewhere.
#[derive(Debug, Default)]
pub struct TypeCatalog {
  input_ports: Vec<(PortType, Option<UseCaseKey>)>,
  pipes: Vec<(PipeType, PortType)>,
}

impl TypeCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Declares the input port `I`, keyed by its `USE_CASE_KEY`.
  pub fn with_input_port<I: InputPort>(mut self) -> Self {
    self.push_input_port(PortType::of::<I>(), Some(I::USE_CASE_KEY));
    self
  }

  /// Declares that the pipe type `P` handles the input port `I`, binding `P`
  /// to `I`'s use case.
  pub fn with_pipe<P: 'static, I: InputPort>(mut self) -> Self {
    self.push_pipe(PipeType::of::<P>(), PortType::of::<I>());
    self
  }

  /// Records an input-port declaration as plain data. A `None` key models an
  /// input port whose declaring location the discovery collaborator could
  /// not determine.
  pub fn push_input_port(&mut self, port: PortType, use_case_key: Option<UseCaseKey>) {
    self.input_ports.push((port, use_case_key));
  }

  /// Records a pipe declaration as plain data: `pipe` handles `input_port`.
  pub fn push_pipe(&mut self, pipe: PipeType, input_port: PortType) {
    self.pipes.push((pipe, input_port));
  }
}

/// Maps each use case to the set of pipe types registered for it.
///
/// Built once from a [`TypeCatalog`] at service-configuration time and read
/// by every assembly afterwards. Membership only: the registry implies no
/// ordering, which is entirely the pipeline configuration's concern.
#[derive(Debug, Default)]
pub struct UseCaseRegistry {
  entries: HashMap<UseCaseKey, Vec<PipeType>>,
}

impl UseCaseRegistry {
  /// Builds the registry from discovery data.
  ///
  /// Every input port with a known use-case key gets an entry, so a use case
  /// with no registered pipes still assembles (to an empty pipeline) rather
  /// than failing lookup. A pipe whose declared input port is not in the
  /// catalog cannot be bound to a use case and is excluded with a debug
  /// event. A pipe whose input port is present but keyless fails with
  /// [`AqueductError::Discovery`]: recovering silently would drop a whole
  /// use case.
  pub fn from_catalog(catalog: &TypeCatalog) -> AqueductResult<Self> {
    let mut entries: HashMap<UseCaseKey, Vec<PipeType>> = HashMap::new();

    for (_, use_case_key) in &catalog.input_ports {
      if let Some(key) = *use_case_key {
        entries.entry(key).or_default();
      }
    }

    for (pipe, input_port) in &catalog.pipes {
      let Some((port, use_case_key)) = catalog.input_ports.iter().find(|(port, _)| port == input_port) else {
        event!(
          Level::DEBUG,
          pipe = %pipe,
          input_port = %input_port,
          "Pipe handles no discovered input port, excluding from registry."
        );
        continue;
      };

      let key = use_case_key.ok_or(AqueductError::Discovery { input_port: port.name() })?;

      let pipes = entries.entry(key).or_default();
      if !pipes.contains(pipe) {
        pipes.push(*pipe);
      }
    }

    event!(Level::DEBUG, use_cases = entries.len(), "Use-case registry built.");
    Ok(Self { entries })
  }

  /// The pipe types registered for `key`, or `None` if the key is unknown.
  pub fn pipes_for(&self, key: UseCaseKey) -> Option<&[PipeType]> {
    self.entries.get(key).map(Vec::as_slice)
  }

  pub fn contains(&self, key: UseCaseKey) -> bool {
    self.entries.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
