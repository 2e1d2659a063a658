//! Snowflake-style account identifiers

mod generator;

pub use generator::{IdParts, IdentityIdGenerator, EPOCH_MS, MAX_NODE_ID, MAX_SEQUENCE};
