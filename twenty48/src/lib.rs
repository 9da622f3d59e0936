pub use board::*;
pub use direction::*;
pub use errors::*;
pub use spawner::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod direction;
mod errors;
mod spawner;
mod visualization;
