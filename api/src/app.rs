//! Application factory
//!
//! Builds the Actix-web application around an already wired `AppState`.

use actix_web::{error::InternalError, middleware::Logger, web, App, HttpResponse};

use pp_core::repositories::{OtpStore, UserRepository};
use pp_core::services::otp::{EmailSenderTrait, SmsSenderTrait};
use pp_shared::{ApiResponse, Environment};

use crate::handlers::error::INVALID_BODY_MESSAGE;
use crate::middleware::create_cors;
use crate::routes::otp::{resend_code, send_code, verify_code, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S, E, M, U>(
    app_state: web::Data<AppState<S, E, M, U>>,
    environment: Environment,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: OtpStore + 'static,
    E: EmailSenderTrait + 'static,
    M: SmsSenderTrait + 'static,
    U: UserRepository + 'static,
{
    // Malformed bodies answer in the same envelope as every other failure
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err, _req| {
            log::warn!("Rejected request body: {}", err);
            let response = HttpResponse::BadRequest().json(ApiResponse::error(INVALID_BODY_MESSAGE));
            InternalError::from_response(err, response).into()
        });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(create_cors(environment))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/otp")
                        .route("/send-code", web::post().to(send_code::<S, E, M, U>))
                        .route("/resend-code", web::post().to(resend_code::<S, E, M, U>))
                        .route("/verify-code", web::post().to(verify_code::<S, E, M, U>)),
                )
                .route("/", web::get().to(api_documentation)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "payprotect-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "PayProtect API v1",
        "endpoints": {
            "health": "/health",
            "otp": {
                "send_code": {
                    "path": "/api/v1/otp/send-code",
                    "method": "POST",
                    "description": "Send a verification code by email or SMS",
                    "request_body": {
                        "verification_type": "string (email address or phone number)"
                    },
                    "responses": {
                        "200": "OTP sent successfully.",
                        "400": "Invalid email or phone number.",
                        "503": "Delivery failed"
                    }
                },
                "resend_code": {
                    "path": "/api/v1/otp/resend-code",
                    "method": "POST",
                    "description": "Send a fresh code, at most once every 5 minutes",
                    "request_body": {
                        "verification_type": "string (email address or phone number)"
                    },
                    "responses": {
                        "200": "OTP resent successfully.",
                        "400": "Cannot resend OTP, try again later.",
                        "503": "Delivery failed"
                    }
                },
                "verify_code": {
                    "path": "/api/v1/otp/verify-code",
                    "method": "POST",
                    "description": "Verify a code issued in the last 10 minutes",
                    "request_body": {
                        "verification_type": "string (email address or phone number)",
                        "otp_code": "integer (at most 999999)"
                    },
                    "responses": {
                        "200": "Email verified successfully. / Phone number verified successfully.",
                        "400": "Invalid or expired OTP."
                    }
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error("The requested resource was not found."))
}
