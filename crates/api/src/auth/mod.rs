//! Password hashing and JWT token handling.

pub mod jwt;
pub mod password;
