pub mod error;

pub use error::{error_response, status_for, user_message};
