pub mod controller;
pub mod session;

pub use controller::{AccessController, Challenge};
pub use session::{AccessAction, AccessState, Session, View};
