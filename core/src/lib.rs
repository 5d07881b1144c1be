// src/lib.rs

//! Aqueduct: an ASYNC pipeline assembly and invocation engine for
//! clean-architecture use cases.
//!
//! Aqueduct builds and executes an ordered chain of pipes (validators,
//! authorisation enforcers, interactors, custom stages) for a single unit of
//! business work, with:
//!  - A registry mapping each use case to its applicable pipe types, built
//!    from explicit declaration data.
//!  - Caller-declared pipeline configurations controlling inclusion,
//!    ordering, forced insertion, and failure-override behaviour per pipe.
//!  - Neighbour-bracket insertion of forced pipes at their configured
//!    relative position.
//!  - Sequential invocation with per-pipe pre/post hooks and a failure
//!    short-circuit/override protocol: business failures skip downstream
//!    pipes unless a pipe is marked must-run.
//!  - Output-port capability traits through which pipes present results and
//!    failures; the engine itself never touches the output port.

pub mod core;
pub mod error;
pub mod outputs;
pub mod pipeline;
pub mod provider;
pub mod registry;
pub mod validation;

// --- Re-exports for the Public API ---

// Core contracts users implement or construct directly.
pub use crate::core::configuration::{PipeConfiguration, PipeConfigurationOption, PipeHook};
pub use crate::core::pipe::{Pipe, PipeType};
pub use crate::core::port::{InputPort, PortType};

// Assembly and invocation surface.
pub use crate::pipeline::assembly::{Pipeline, PipelineFactory, RegistryPipelineFactory};
pub use crate::pipeline::invocation::UseCaseInvoker;

// Discovery data and the registry built from it.
pub use crate::registry::{TypeCatalog, UseCaseKey, UseCaseRegistry};

// Service resolution boundary and the bundled provider.
pub use crate::provider::{FactoryProvider, ServiceProvider};

// Output capabilities and the bundled required-input validation pipe.
pub use crate::outputs::{
  AuthenticationOutputPort, AuthorisationOutputPort, AuthorisationResult, ValidationOutputPort, ValidationResult,
};
pub use crate::validation::{RequiredInputValidator, RequiredInputs};

pub use crate::error::{AqueductError, AqueductResult};

/*
    Core Workflow:
    1. Define an input port struct per use case and implement `InputPort`
       (its `USE_CASE_KEY` is conventionally `module_path!()`).
    2. Implement `Pipe<I, O>` for each stage, bounding `O` over the output
       capabilities the stage needs.
    3. Declare the types to a `TypeCatalog` and build a `UseCaseRegistry`.
    4. Register pipe constructors with a `FactoryProvider` (or implement
       `ServiceProvider` over your own container).
    5. Author a pipeline configuration: ordered `PipeConfiguration` entries,
       `Default` for registered pipes, `Insert` for forced ones, plus
       failure-override flags and hooks.
    6. Wrap a `RegistryPipelineFactory` in a `UseCaseInvoker` and call
       `invoke(&input, &output, &configuration)`.
*/
