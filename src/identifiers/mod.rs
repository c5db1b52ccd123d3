//! Validators for statutory identifiers: GSTIN, PAN, HSN and SAC

pub mod gstin;
pub mod hsn;
pub mod pan;
pub mod sac;
pub mod states;

pub use gstin::*;
pub use hsn::*;
pub use pan::*;
pub use sac::*;
pub use states::*;
