pub mod driver;
pub mod result;
pub mod runner;
pub mod traceback;

pub use result::*;
pub use runner::*;
