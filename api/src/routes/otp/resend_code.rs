use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use pp_core::repositories::{OtpStore, UserRepository};
use pp_core::services::otp::{EmailSenderTrait, SmsSenderTrait};
use pp_shared::masking::mask_contact;
use pp_shared::ApiResponse;

use super::{AppState, RESENT_MESSAGE};
use crate::dto::SendCodeRequest;
use crate::handlers::error::{error_response, INVALID_CONTACT_MESSAGE};

/// Handler for POST /api/v1/otp/resend-code
///
/// Refused with 400 `"Cannot resend OTP, try again later."` while the
/// previous code is younger than the resend window.
pub async fn resend_code<S, E, M, U>(
    state: web::Data<AppState<S, E, M, U>>,
    request: web::Json<SendCodeRequest>,
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
        log::warn!("[{}] Validation failed for resend_code: {}", request_id, errors);
        return HttpResponse::BadRequest().json(ApiResponse::error(INVALID_CONTACT_MESSAGE));
    }

    log::info!("[{}] Processing resend_code for {}", request_id, contact);

    match state.otp_service.resend(&request.verification_type).await {
        Ok(result) => {
            log::info!(
                "[{}] Code resent to {} via {}, message_id: {}",
                request_id,
                contact,
                result.channel,
                result.message_id
            );
            HttpResponse::Ok().json(ApiResponse::success(RESENT_MESSAGE))
        }
        Err(error) if error.is_client_error() => {
            log::warn!("[{}] Resend refused for {}: {}", request_id, contact, error);
            error_response(&error)
        }
        Err(error) => {
            log::error!(
                "[{}] Failed to resend code to {}: {}",
                request_id,
                contact,
                error
            );
            error_response(&error)
        }
    }
}
