pub mod controller;
pub mod presenter;

pub use controller::ConversationController;
pub use presenter::GreetPresenter;
