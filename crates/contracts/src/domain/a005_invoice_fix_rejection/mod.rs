pub mod aggregate;
pub mod amounts;

pub use aggregate::*;
pub use amounts::*;
