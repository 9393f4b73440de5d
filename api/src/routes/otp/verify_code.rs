use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use pp_core::domain::value_objects::ContactKind;
use pp_core::repositories::{OtpStore, UserRepository};
use pp_core::services::otp::{EmailSenderTrait, SmsSenderTrait};
use pp_shared::masking::mask_contact;
use pp_shared::ApiResponse;

use super::{AppState, EMAIL_VERIFIED_MESSAGE, PHONE_VERIFIED_MESSAGE};
use crate::dto::VerifyCodeRequest;
use crate::handlers::error::{error_response, INVALID_OR_EXPIRED_MESSAGE};

/// Handler for POST /api/v1/otp/verify-code
///
/// # Request Body
///
/// ```json
/// { "verification_type": "+2348012345678", "otp_code": 42 }
/// ```
///
/// `otp_code` is an integer; `42` checks against the stored code `000042`.
///
/// # Responses
///
/// - 200 `"Email verified successfully."` or `"Phone number verified successfully."`
/// - 400 `"Invalid or expired OTP."`
pub async fn verify_code<S, E, M, U>(
    state: web::Data<AppState<S, E, M, U>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    E: EmailSenderTrait + 'static,
    M: SmsSenderTrait + 'static,
    U: UserRepository + 'static,
{
    let request_id = Uuid::new_v4();
    let contact = mask_contact(request.verification_type.trim());

    if let Err(errors) = request.validate() {
        log::warn!("[{}] Validation failed for verify_code: {}", request_id, errors);
        return HttpResponse::BadRequest().json(ApiResponse::error(INVALID_OR_EXPIRED_MESSAGE));
    }

    match state
        .otp_service
        .verify_numeric(&request.verification_type, request.otp_code)
        .await
    {
        Ok(result) => {
            log::info!(
                "[{}] {} verified, user_marked: {}",
                request_id,
                contact,
                result.user_marked
            );
            let message = match result.channel() {
                ContactKind::Phone => PHONE_VERIFIED_MESSAGE,
                _ => EMAIL_VERIFIED_MESSAGE,
            };
            HttpResponse::Ok().json(ApiResponse::success(message))
        }
        Err(error) if error.is_client_error() => {
            log::warn!("[{}] Verification failed for {}: {}", request_id, contact, error);
            error_response(&error)
        }
        Err(error) => {
            log::error!(
                "[{}] Verification errored for {}: {}",
                request_id,
                contact,
                error
            );
            error_response(&error)
        }
    }
}
