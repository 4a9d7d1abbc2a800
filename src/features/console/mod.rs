pub mod command;
pub mod render;
mod shell;

pub use command::Command;
pub use shell::{Console, Flow};
