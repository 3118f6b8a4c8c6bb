//! Pieces shared by the server crate and the binary: logging setup and
//! small wire types.

pub mod types;
pub mod utils;
