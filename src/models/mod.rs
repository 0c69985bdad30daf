pub mod generation;
pub mod part;
pub mod sketch;
pub mod wire;

pub use generation::*;
pub use part::*;
pub use sketch::*;
