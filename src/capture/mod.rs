pub mod calculation;
pub mod encounter;
pub mod resolve;
pub mod validation;

pub use calculation::*;
pub use encounter::*;
pub use resolve::*;
pub use validation::*;
