pub mod events;
pub mod instance;
pub mod log;
pub mod style;
pub mod view;

pub use events::*;
pub use instance::*;
pub use log::*;
pub use style::*;
pub use view::*;
