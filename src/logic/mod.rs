pub mod loan_ops;
pub mod validate;

pub use loan_ops::*;
pub use validate::*;
