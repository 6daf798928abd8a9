use newsroom::application::{
    notifications::{BackgroundEventConsumer, NotificationDispatcher},
    ports::{
        events::ArticleEventConsumer, mail::Mailer, notifications::NotificationLedger,
        security::TokenManager, time::Clock,
    },
    services::{ApplicationServices, Repositories},
};
use newsroom::config::AppConfig;
use newsroom::infrastructure::{
    database,
    mail::{LogMailer, SmtpMailer},
    repositories::{
        PostgresArticleReadRepository, PostgresArticleWriteRepository,
        PostgresJoinRequestRepository, PostgresNewsletterRepository, PostgresNotificationLedger,
        PostgresPublisherRepository, PostgresSubscriptionRepository, PostgresUserRepository,
    },
    security::token::BiscuitTokenManager,
    time::SystemClock,
};
use newsroom::presentation::http::{routes::build_router_with_options, state::HttpState};
use anyhow::Result;
use sqlx::PgPool;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const NOTIFICATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;

    let repos = repositories(&pool);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);

    let mailer: Arc<dyn Mailer> = match config.smtp() {
        Some(settings) => {
            tracing::info!(host = %settings.host, port = settings.port, "smtp delivery enabled");
            Arc::new(SmtpMailer::new(settings.clone())?)
        }
        None => {
            tracing::warn!("SMTP_HOST not set; notification mail is only logged");
            Arc::new(LogMailer)
        }
    };
    let ledger: Arc<dyn NotificationLedger> = Arc::new(PostgresNotificationLedger::new(pool.clone()));
    let dispatcher: Arc<dyn ArticleEventConsumer> = Arc::new(NotificationDispatcher::new(
        Arc::clone(&repos.subscriptions),
        Arc::clone(&repos.users),
        Arc::clone(&repos.publishers),
        ledger,
        mailer,
        Arc::clone(&clock),
    ));
    let background = config
        .notify_in_background()
        .then(|| Arc::new(BackgroundEventConsumer::new(Arc::clone(&dispatcher))));
    let article_events: Arc<dyn ArticleEventConsumer> = match &background {
        Some(background) => Arc::clone(background) as Arc<dyn ArticleEventConsumer>,
        None => dispatcher,
    };

    let services = Arc::new(ApplicationServices::new(
        repos,
        article_events,
        token_manager,
        clock,
    ));

    let state = HttpState { services };
    let app = build_router_with_options(
        state,
        config.rate_limit_enabled(),
        config.allowed_origins(),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(background) = background {
        let pending = background.in_flight();
        if pending > 0 {
            tracing::info!(pending, "waiting for notification dispatch to finish");
        }
        if tokio::time::timeout(NOTIFICATION_DRAIN_TIMEOUT, background.drain())
            .await
            .is_err()
        {
            tracing::warn!("notification dispatch still running at shutdown");
        }
    }

    Ok(())
}

fn repositories(pool: &PgPool) -> Repositories {
    Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        article_writes: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
        article_reads: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
        newsletters: Arc::new(PostgresNewsletterRepository::new(pool.clone())),
        publishers: Arc::new(PostgresPublisherRepository::new(pool.clone())),
        join_requests: Arc::new(PostgresJoinRequestRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
