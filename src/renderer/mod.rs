pub mod components;
pub mod document;
pub mod renderer;
pub mod renders;
pub mod toc;
pub mod traits;

pub use components::*;
pub use document::*;
pub use renderer::*;
pub use toc::*;
pub use traits::*;
