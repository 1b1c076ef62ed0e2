//! Wire contracts shared between the backend and its clients.

pub mod domain;
pub mod enums;
pub mod shared;
