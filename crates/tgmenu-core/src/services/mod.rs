//! Navigation engine services

pub mod visibility;
pub mod paginator;
pub mod keyboard_builder;
pub mod dispatcher;
pub mod viewer_resolver;

pub use keyboard_builder::KeyboardBuilder;
pub use dispatcher::InteractionDispatcher;
pub use viewer_resolver::ViewerResolver;
pub use paginator::{paginate, Page};
