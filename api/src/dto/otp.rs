use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of send-code and resend-code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Email address or phone number
    #[validate(length(min = 3, max = 254))]
    pub verification_type: String,
}

/// Body of verify-code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 3, max = 254))]
    pub verification_type: String,
    /// Numeric code; leading zeros are restored server-side
    #[validate(range(max = 999999))]
    pub otp_code: u32,
}
