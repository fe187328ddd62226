pub mod content;
pub mod shell;

pub use content::*;
pub use shell::*;
