use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use pp_core::repositories::{OtpStore, UserRepository};
use pp_core::services::otp::{EmailSenderTrait, SmsSenderTrait};
use pp_shared::masking::mask_contact;
use pp_shared::ApiResponse;

use super::{AppState, SENT_MESSAGE};
use crate::dto::SendCodeRequest;
use crate::handlers::error::{error_response, INVALID_CONTACT_MESSAGE};

/// Handler for POST /api/v1/otp/send-code
///
/// Issues a code to the email address or phone number in
/// `verification_type`.
///
/// # Request Body
///
/// ```json
/// { "verification_type": "user@example.com" }
/// ```
///
/// # Responses
///
/// - 200 `{"success": true, "message": "OTP sent successfully."}`
/// - 400 `{"success": false, "error": "Invalid email or phone number."}`
/// - 503 when the email or SMS channel refused the message
pub async fn send_code<S, E, M, U>(
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
        log::warn!("[{}] Validation failed for send_code: {}", request_id, errors);
        return HttpResponse::BadRequest().json(ApiResponse::error(INVALID_CONTACT_MESSAGE));
    }

    log::info!("[{}] Processing send_code for {}", request_id, contact);

    match state.otp_service.send_code(&request.verification_type).await {
        Ok(result) => {
            log::info!(
                "[{}] Code sent to {} via {}, message_id: {}",
                request_id,
                contact,
                result.channel,
                result.message_id
            );
            HttpResponse::Ok().json(ApiResponse::success(SENT_MESSAGE))
        }
        Err(error) => {
            log::error!(
                "[{}] Failed to send code to {}: {}",
                request_id,
                contact,
                error
            );
            error_response(&error)
        }
    }
}
