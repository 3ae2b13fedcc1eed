//! The intercepted libc entry points, grouped by call shape.

pub mod dir;
pub mod open;
pub mod path;
pub mod stat;
pub mod temp;
