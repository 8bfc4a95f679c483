//! Utility modules: balance math, value decoding, SS58 addresses.

pub mod balance;
pub mod decode;
pub mod ss58;
