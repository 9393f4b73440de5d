pub mod otp;

pub use otp::{SendCodeRequest, VerifyCodeRequest};
