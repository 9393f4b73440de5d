use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;

use pp_api::app::create_app;
use pp_api::routes::otp::AppState;
use pp_core::repositories::{OtpStore, UserRepository};
use pp_core::services::otp::{OtpCleanupConfig, OtpCleanupService, OtpService, OtpServiceConfig};
use pp_infra::database::{DatabasePool, MySqlOtpStore, MySqlUserRepository};
use pp_infra::email::{create_email_service, EmailServiceAdapter};
use pp_infra::memory::{InMemoryOtpStore, InMemoryUserRepository};
use pp_infra::sms::{create_sms_service, SmsServiceAdapter};
use pp_shared::{AppConfig, Environment, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first, then the plain .env
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );

    info!(
        "Starting PayProtect API Server ({} environment, {:?} store)",
        config.environment, config.store_backend
    );

    match config.store_backend {
        StoreBackend::Memory => {
            serve(
                config,
                Arc::new(InMemoryOtpStore::new()),
                Arc::new(InMemoryUserRepository::new()),
            )
            .await
        }
        StoreBackend::Mysql => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("failed to connect to MySQL")?;
            if config.database.run_migrations {
                pool.run_migrations()
                    .await
                    .context("failed to run database migrations")?;
            }
            if !pool
                .health_check()
                .await
                .context("database health check failed")?
            {
                anyhow::bail!("database health check returned an unexpected result");
            }
            info!("{}", pool.get_statistics());

            let store = Arc::new(MySqlOtpStore::new(pool.get_pool().clone()));
            let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
            let result = serve(config, store, users).await;
            pool.close().await;
            result
        }
    }
}

/// Wire the services around `store` and `users` and run the HTTP server
async fn serve<S, U>(config: AppConfig, store: Arc<S>, users: Arc<U>) -> anyhow::Result<()>
where
    S: OtpStore + 'static,
    U: UserRepository + 'static,
{
    let email = EmailServiceAdapter::new(
        create_email_service(&config.email, config.environment)
            .context("failed to initialize email delivery")?,
        config.email.from_address.clone(),
    );
    let sms = SmsServiceAdapter::new(
        create_sms_service(&config.sms, config.environment)
            .context("failed to initialize SMS delivery")?,
    );
    info!(
        "Delivery providers: email={}, sms={}",
        email.provider_name(),
        sms.provider_name()
    );

    let otp_service = OtpService::new(
        store.clone(),
        Arc::new(email),
        Arc::new(sms),
        users,
        OtpServiceConfig::from(&config.otp),
    );

    let cleanup = Arc::new(OtpCleanupService::new(
        store,
        OtpCleanupConfig::from(&config.otp),
    ));
    let cleanup_handle = cleanup.spawn();

    let app_state = web::Data::new(AppState::new(Arc::new(otp_service)));
    let environment = config.environment;
    let max_payload_size = config.server.max_payload_size;
    let bind_address = (config.server.host.clone(), config.server.port);

    info!("Server will bind to: {}:{}", bind_address.0, bind_address.1);

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), environment, max_payload_size)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(bind_address)
        .context("failed to bind server address")?
        .run()
        .await?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    Ok(())
}
