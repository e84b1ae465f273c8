pub mod markup;
pub mod parser;
pub mod types;

pub use markup::*;
pub use parser::*;
pub use types::*;
