//! Internal helpers.

pub mod io;
