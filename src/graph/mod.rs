pub mod brick;
pub mod connection;
pub mod definition;
pub mod dot;

pub use brick::*;
pub use connection::*;
pub use definition::*;
pub use dot::to_dot;
