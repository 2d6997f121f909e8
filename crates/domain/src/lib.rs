//! Domain types for the Trailhead user directory.

#![forbid(unsafe_code)]

mod user;

pub use user::{EmailAddress, User, UserId};
