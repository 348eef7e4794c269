pub mod multiplexer;
pub mod processor;
pub mod store;

pub use multiplexer::ClickMultiplexer;
pub use processor::CommandProcessor;
pub use store::{MenuChanges, MenuStore};
