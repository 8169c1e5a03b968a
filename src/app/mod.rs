// App layer: session handling and plain-text presentation on top of the engine.

pub mod render;
pub mod session;

pub use session::{Command, Outcome, Session};
