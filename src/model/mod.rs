pub mod loan;

pub use loan::*;
