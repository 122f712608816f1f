pub mod coverage;
pub mod provider;
pub mod variables;

pub use coverage::*;
pub use provider::*;
pub use variables::*;
