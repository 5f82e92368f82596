//! CLI command handling

pub mod load;
pub mod output;
pub mod play;
pub mod score;
pub mod validate;

pub use load::*;
pub use output::*;
pub use play::*;
pub use score::*;
pub use validate::*;
