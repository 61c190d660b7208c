//! Core constants, error types and the cipher-direction contract.

mod constants;
mod error;
mod traits;

pub use constants::*;
pub use error::*;
pub use traits::*;
