//! Password hashing with bcrypt

mod hasher;

pub use hasher::{CredentialHasher, MIN_COST};
