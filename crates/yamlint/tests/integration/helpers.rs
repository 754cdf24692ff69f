pub mod binary;
pub mod command_ext;

pub use binary::*;
pub use command_ext::*;
