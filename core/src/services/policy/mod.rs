//! Input policy for account fields
//!
//! Pure checks on phone numbers, display names and passwords. Lengths are
//! counted in UTF-8 bytes, so multibyte input uses up the bounds faster.

mod rules;


pub use rules::{
    PasswordPolicy, FULL_NAME_MAX_LENGTH, FULL_NAME_MIN_LENGTH, PASSWORD_MAX_LENGTH,
    PASSWORD_MIN_LENGTH, PHONE_NUMBER_MAX_LENGTH, PHONE_NUMBER_MIN_LENGTH, PHONE_NUMBER_PREFIX,
};
