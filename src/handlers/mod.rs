//! Handler implementations

pub mod console;
pub mod file;
pub mod memory;
pub mod rotating_file;

pub use console::{ConsoleHandler, ConsoleTarget};
pub use file::FileHandler;
pub use memory::{MemoryBuffer, MemoryHandler};
pub use rotating_file::{RotatingFileHandler, RotationPolicy};

pub use crate::core::Handler;
