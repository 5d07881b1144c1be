pub mod configuration;
pub mod pipe;
pub mod port;

// Re-export key types for easier access from other aqueduct modules.
pub use configuration::{PipeConfiguration, PipeConfigurationOption, PipeHook};
pub use pipe::{Pipe, PipeType};
pub use port::{InputPort, PortType};
