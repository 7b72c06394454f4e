use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use qualtr_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes,
    services::storage_service::StorageService,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let storage = StorageService::connect(config).await;
    let app_state = AppState::new(pool, storage);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    // No token required: account creation, login, the public directories
    // and the chat socket.
    let public_api = Router::new()
        .route("/api/v1/user/register", post(routes::user_routes::register))
        .route("/api/v1/user/login", post(routes::user_routes::login))
        .route("/api/v1/agencies", get(routes::user_routes::list_agencies))
        .route(
            "/api/v1/marketer",
            get(routes::directory_routes::list_marketers)
                .post(routes::directory_routes::create_marketer),
        )
        .route(
            "/api/v1/vc",
            get(routes::directory_routes::list_vcs).post(routes::directory_routes::create_vc),
        )
        .route("/api/v1/chat/ws", get(routes::chat::ws_handler))
        .layer(axum::middleware::from_fn_with_state(
            qualtr_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            qualtr_backend::middleware::rate_limit::rps_middleware,
        ));

    let authed_api = Router::new()
        .route(
            "/api/v1/user/me",
            get(routes::user_routes::me).patch(routes::user_routes::update_me),
        )
        .route("/api/v1/user/logo", post(routes::user_routes::upload_logo))
        .route(
            "/api/v1/user/compare",
            get(routes::user_routes::get_compare_list).post(routes::user_routes::add_to_compare),
        )
        .route(
            "/api/v1/user/compare/:agency_id",
            delete(routes::user_routes::remove_from_compare),
        )
        .route(
            "/api/v1/job",
            get(routes::job_routes::list_jobs).post(routes::job_routes::create_job),
        )
        .route("/api/v1/job/:id", get(routes::job_routes::get_job))
        .route("/api/v1/job/:id/close", post(routes::job_routes::close_job))
        .route(
            "/api/v1/application/apply/:id",
            post(routes::application_routes::apply),
        )
        .route(
            "/api/v1/application/:id/applicants",
            get(routes::application_routes::list_applicants),
        )
        .route(
            "/api/v1/application/my-applications",
            get(routes::application_routes::my_applications),
        )
        .route(
            "/api/v1/application/status/:id/update",
            post(routes::application_routes::update_status),
        )
        .route(
            "/api/v1/message/send",
            post(routes::message_routes::send_message),
        )
        .route(
            "/api/v1/message/my-messages",
            get(routes::message_routes::my_messages),
        )
        .route(
            "/api/v1/message/all-messages",
            get(routes::message_routes::all_messages),
        )
        .route(
            "/api/v1/message/all-messages/:id",
            put(routes::message_routes::update_message),
        )
        .route(
            "/api/v1/post",
            get(routes::post_routes::list_posts).post(routes::post_routes::create_post),
        )
        .route("/api/v1/post/media", post(routes::post_routes::upload_media))
        .route("/api/v1/post/:id", get(routes::post_routes::get_post))
        .route(
            "/api/v1/post/:id/vote",
            post(routes::post_routes::vote_on_poll),
        )
        .route(
            "/api/v1/post/:id/comment",
            post(routes::post_routes::add_comment),
        )
        .layer(axum::middleware::from_fn(
            qualtr_backend::middleware::auth::require_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            qualtr_backend::middleware::rate_limit::new_rps_state(config.api_rps),
            qualtr_backend::middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/api/v1/admin/stats",
            get(routes::admin_routes::get_dashboard_stats),
        )
        .route("/api/v1/admin/users", get(routes::admin_routes::list_users))
        .layer(axum::middleware::from_fn(
            qualtr_backend::middleware::auth::require_admin,
        ))
        .layer(axum::middleware::from_fn_with_state(
            qualtr_backend::middleware::rate_limit::new_rps_state(config.api_rps),
            qualtr_backend::middleware::rate_limit::rps_middleware,
        ));

    let mut app = base_routes
        .merge(public_api)
        .merge(authed_api)
        .merge(admin_api)
        .with_state(app_state);

    // The built SPA ships alongside the API in production.
    if let Some(dir) = &config.frontend_dir {
        info!("Serving frontend from: {}", dir);
        app = app.fallback_service(tower_http::services::ServeDir::new(dir));
    }

    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
