pub mod bounds;
pub mod location;
pub mod range;

pub use bounds::*;
pub use location::*;
pub use range::*;
