mod actions;
mod error;
mod isolation;
mod player;
mod state;
pub mod tables;


pub use actions::*;
pub use error::*;
pub use isolation::*;
pub use player::*;
pub use state::*;
