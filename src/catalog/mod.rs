pub mod category;
pub mod outputs;

pub use category::*;
pub use outputs::*;
