pub mod app;
pub mod commands;
pub mod logging;
pub mod repl;

pub use app::{Reply, WorldClockApp};
pub use commands::{MenuCommand, parse_line};
