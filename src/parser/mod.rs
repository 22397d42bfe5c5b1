pub mod decoder;
pub mod normalize;

pub use decoder::*;
pub use normalize::*;
