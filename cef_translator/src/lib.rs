#![allow(clippy::new_ret_no_self)]

pub mod c_to_rust;
pub mod capi;
pub mod error;
pub mod rust_to_c;
pub mod util;

pub use error::Error;
