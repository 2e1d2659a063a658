use serde::{Deserialize, Serialize};

use us_core::domain::entities::account::{AccountId, Profile};

/// Missing fields decode as empty strings so the service reports them
/// together as required fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub full_name: String,

    /// Must start with "+62", 10 to 13 characters
    #[serde(default)]
    pub phone_number: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: AccountId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone_number: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: AccountId,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub full_name: String,
    pub phone_number: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            full_name: profile.full_name,
            phone_number: profile.phone_number,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub message: String,
}
