//! Tax calculation modules

pub mod gst;
pub mod rates;

pub use gst::*;
pub use rates::*;
