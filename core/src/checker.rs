pub mod grading;
pub mod normalize;
pub mod result;

pub use grading::*;
pub use normalize::*;
pub use result::*;
