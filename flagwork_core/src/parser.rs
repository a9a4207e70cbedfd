mod base;
mod interface;
mod printer;

pub use base::*;
pub use interface::{ConsoleInterface, UserInterface};
