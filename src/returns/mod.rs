//! Statutory return generation: GSTR-1, GSTR-3B and their validation

pub mod gstr1;
pub mod gstr3b;
pub mod period;
pub mod validate;

pub use gstr1::*;
pub use gstr3b::*;
pub use period::ReturnPeriod;
pub use validate::*;
