//! The greet use case: validate a visitor's name and present a greeting.

pub mod input_port;
pub mod interactor;
pub mod name_checker;
pub mod output_port;

pub use input_port::GreetInputPort;
pub use interactor::GreetInteractor;
pub use name_checker::NameChecker;
pub use output_port::GreetOutputPort;
