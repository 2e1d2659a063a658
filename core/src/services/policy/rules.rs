use crate::errors::ValidationError;

pub const PHONE_NUMBER_MIN_LENGTH: usize = 10;
pub const PHONE_NUMBER_MAX_LENGTH: usize = 13;
pub const PHONE_NUMBER_PREFIX: &str = "+62";

pub const FULL_NAME_MIN_LENGTH: usize = 3;
pub const FULL_NAME_MAX_LENGTH: usize = 60;

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 64;

/// Validation rules applied to registration and profile input
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Rejects any `(name, value)` pair whose value is empty
    ///
    /// All empty fields are reported together, before any format check runs.
    pub fn require_fields(&self, fields: &[(&str, &str)]) -> Result<(), ValidationError> {
        let missing: Vec<String> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::RequiredFields { fields: missing })
        }
    }

    /// Length in bytes first, then the country prefix
    pub fn validate_phone_number(&self, phone_number: &str) -> Result<(), ValidationError> {
        let len = phone_number.len();
        if !(PHONE_NUMBER_MIN_LENGTH..=PHONE_NUMBER_MAX_LENGTH).contains(&len) {
            return Err(ValidationError::PhoneNumberLength {
                min: PHONE_NUMBER_MIN_LENGTH,
                max: PHONE_NUMBER_MAX_LENGTH,
            });
        }

        if !phone_number.starts_with(PHONE_NUMBER_PREFIX) {
            return Err(ValidationError::PhoneNumberPrefix {
                prefix: PHONE_NUMBER_PREFIX.to_string(),
            });
        }

        Ok(())
    }

    pub fn validate_full_name(&self, full_name: &str) -> Result<(), ValidationError> {
        let len = full_name.len();
        if !(FULL_NAME_MIN_LENGTH..=FULL_NAME_MAX_LENGTH).contains(&len) {
            return Err(ValidationError::FullNameLength {
                min: FULL_NAME_MIN_LENGTH,
                max: FULL_NAME_MAX_LENGTH,
            });
        }
        Ok(())
    }

    /// Length bounds plus at least one uppercase, one numeric and one special character
    pub fn validate_password(&self, password: &str) -> Result<(), ValidationError> {
        // Byte length keeps every accepted password inside bcrypt's 72-byte input
        let len = password.len();
        if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&len) {
            return Err(ValidationError::PasswordLength {
                min: PASSWORD_MIN_LENGTH,
                max: PASSWORD_MAX_LENGTH,
            });
        }

        let mut has_upper = false;
        let mut has_number = false;
        let mut has_special = false;

        // Each character lands in the first class it matches
        for c in password.chars() {
            if c.is_uppercase() {
                has_upper = true;
            } else if c.is_numeric() {
                has_number = true;
            } else if !c.is_alphabetic() {
                has_special = true;
            }
        }

        if has_upper && has_number && has_special {
            Ok(())
        } else {
            Err(ValidationError::PasswordFormat)
        }
    }

    /// Phone, then name, then password; the first failure wins
    pub fn validate_registration(
        &self,
        full_name: &str,
        phone_number: &str,
        password: &str,
    ) -> Result<(), ValidationError> {
        self.validate_phone_number(phone_number)?;
        self.validate_full_name(full_name)?;
        self.validate_password(password)
    }

    /// Phone, then name
    pub fn validate_profile(&self, full_name: &str, phone_number: &str) -> Result<(), ValidationError> {
        self.validate_phone_number(phone_number)?;
        self.validate_full_name(full_name)
    }
}
