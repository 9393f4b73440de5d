use actix_web::{http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;

use pp_api::app::create_app;
use pp_api::routes::otp::AppState;
use pp_core::repositories::OtpStore;
use pp_core::services::otp::{ManualClock, OtpService, OtpServiceConfig};
use pp_infra::email::{EmailServiceAdapter, MockEmailService};
use pp_infra::memory::{InMemoryOtpStore, InMemoryUserRepository};
use pp_infra::sms::{MockSmsService, SmsServiceAdapter};
use pp_shared::{ApiResponse, Environment};

type TestState = AppState<InMemoryOtpStore, EmailServiceAdapter, SmsServiceAdapter, InMemoryUserRepository>;

struct TestContext {
    state: web::Data<TestState>,
    store: Arc<InMemoryOtpStore>,
    users: Arc<InMemoryUserRepository>,
    email: MockEmailService,
    sms: MockSmsService,
    clock: Arc<ManualClock>,
}

/// Helper function to create test application state
fn create_test_context() -> TestContext {
    let store = Arc::new(InMemoryOtpStore::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let email = MockEmailService::with_options(false, false);
    let sms = MockSmsService::with_options(false, false);
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let service = OtpService::new(
        store.clone(),
        Arc::new(EmailServiceAdapter::new(
            Box::new(email.clone()),
            "otp@payprotect.local",
        )),
        Arc::new(SmsServiceAdapter::new(Box::new(sms.clone()))),
        users.clone(),
        OtpServiceConfig::default(),
    )
    .with_clock(clock.clone());

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(service))),
        store,
        users,
        email,
        sms,
        clock,
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(create_app($ctx.state.clone(), Environment::Development, 16 * 1024)).await
    };
}

async fn latest_code(store: &InMemoryOtpStore, contact: &str) -> u32 {
    store
        .find_latest(contact)
        .await
        .unwrap()
        .expect("a code was stored")
        .code
        .parse()
        .unwrap()
}

#[actix_rt::test]
async fn test_send_and_verify_email() {
    let ctx = create_test_context();
    ctx.users.register("user@example.com").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send-code")
        .set_json(json!({ "verification_type": "user@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::success("OTP sent successfully."));
    assert_eq!(ctx.email.sent_messages().len(), 1);

    let code = latest_code(&ctx.store, "user@example.com").await;
    ctx.clock.advance(Duration::minutes(1));

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify-code")
        .set_json(json!({ "verification_type": "user@example.com", "otp_code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::success("Email verified successfully."));
    assert!(ctx.users.flags("user@example.com").await.unwrap().email_verified);

    // Second use of the same code fails
    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify-code")
        .set_json(json!({ "verification_type": "user@example.com", "otp_code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::error("Invalid or expired OTP."));
}

#[actix_rt::test]
async fn test_send_and_verify_phone() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send-code")
        .set_json(json!({ "verification_type": "+2348012345678" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.sms.get_message_count(), 1);

    let code = latest_code(&ctx.store, "+2348012345678").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify-code")
        .set_json(json!({ "verification_type": "+2348012345678", "otp_code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::success("Phone number verified successfully."));
}

#[actix_rt::test]
async fn test_send_code_invalid_contact() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    for contact in ["not-an-email", "12345", "user@@example.com"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/otp/send-code")
            .set_json(json!({ "verification_type": contact }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", contact);
        let body: ApiResponse = test::read_body_json(resp).await;
        assert_eq!(body, ApiResponse::error("Invalid email or phone number."));
    }

    assert!(ctx.store.is_empty().await);
}

#[actix_rt::test]
async fn test_resend_throttled_then_allowed() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let send = || {
        test::TestRequest::post()
            .uri("/api/v1/otp/resend-code")
            .set_json(json!({ "verification_type": "user@example.com" }))
            .to_request()
    };

    let resp = test::call_service(&app, send()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::success("OTP resent successfully."));

    ctx.clock.advance(Duration::minutes(2));
    let resp = test::call_service(&app, send()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers().get("Retry-After").unwrap().to_str().unwrap(),
        "180"
    );
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::error("Cannot resend OTP, try again later."));

    ctx.clock.advance(Duration::minutes(3));
    let resp = test::call_service(&app, send()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.email.sent_messages().len(), 2);
    assert_eq!(ctx.store.count_for("user@example.com").await.unwrap(), 1);
}

#[actix_rt::test]
async fn test_verify_after_expiry_fails() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send-code")
        .set_json(json!({ "verification_type": "user@example.com" }))
        .to_request();
    test::call_service(&app, req).await;
    let code = latest_code(&ctx.store, "user@example.com").await;

    ctx.clock.advance(Duration::minutes(10));
    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify-code")
        .set_json(json!({ "verification_type": "user@example.com", "otp_code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::error("Invalid or expired OTP."));
}

#[actix_rt::test]
async fn test_verify_rejects_out_of_range_and_malformed_codes() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify-code")
        .set_json(json!({ "verification_type": "user@example.com", "otp_code": 1_000_000 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::error("Invalid or expired OTP."));

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify-code")
        .set_json(json!({ "verification_type": "user@example.com", "otp_code": "abc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::error("Invalid request body."));
}

#[actix_rt::test]
async fn test_delivery_failure_returns_503() {
    let ctx = create_test_context();
    ctx.sms.set_simulate_failure(true);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send-code")
        .set_json(json!({ "verification_type": "+14155552671" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(
        body,
        ApiResponse::error("Failed to deliver OTP, please try again later.")
    );
}

#[actix_rt::test]
async fn test_health_and_not_found() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
