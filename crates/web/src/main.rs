use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod auth;
mod config;
mod error;
mod features;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::login,
        features::auth::handlers::refresh_token,
        features::auth::handlers::validate_token,
        features::auth::handlers::logout,
        features::auth::handlers::get_profile,
        features::auth::handlers::update_profile,
        features::judges::handlers::create_judge,
        features::judges::handlers::list_judges,
        features::judges::handlers::get_judge_scores,
        features::scores::handlers::submit_score,
        features::scores::handlers::get_recent_scores,
        features::participants::handlers::list_participants,
        features::categories::handlers::list_categories,
        features::scoreboard::handlers::get_scoreboard,
        features::stats::handlers::get_stats,
    ),
    components(
        schemas(
            storage::dto::auth::LoginRequest,
            storage::dto::auth::RefreshRequest,
            storage::dto::auth::JudgeActivitySummary,
            storage::dto::auth::AuthUser,
            storage::dto::auth::TokenResponse,
            storage::dto::auth::ValidateResponse,
            storage::dto::auth::Profile,
            storage::dto::auth::ProfileResponse,
            storage::dto::auth::UpdateProfileRequest,
            storage::dto::judge::CreateJudgeRequest,
            storage::dto::judge::JudgeResponse,
            storage::dto::judge::CreateJudgeResponse,
            storage::dto::judge::JudgeStats,
            storage::dto::judge::JudgeWithStats,
            storage::dto::judge::JudgeListResponse,
            storage::dto::participant::ParticipantStats,
            storage::dto::participant::ParticipantWithStats,
            storage::dto::participant::ParticipantListResponse,
            storage::dto::category::CategoryStats,
            storage::dto::category::CategoryWithStats,
            storage::dto::category::CategoryListResponse,
            storage::dto::score::SubmitScoreRequest,
            storage::dto::score::AcceptedScore,
            storage::dto::score::SubmitScoreResponse,
            storage::dto::score::JudgeRef,
            storage::dto::score::ParticipantRef,
            storage::dto::score::CategoryRef,
            storage::dto::score::ScoreDetail,
            storage::dto::score::RecentScoreEntry,
            storage::dto::score::RecentScoresResponse,
            storage::dto::score::JudgeScoreEntry,
            storage::dto::score::JudgeScoreSummary,
            storage::dto::score::JudgeScoresResponse,
            storage::dto::scoreboard::CategoryScore,
            storage::dto::scoreboard::ScoreboardEntry,
            storage::dto::scoreboard::ScoreboardResponse,
            storage::dto::stats::OverviewStats,
            storage::dto::stats::CategoryBreakdown,
            storage::dto::stats::JudgeActivity,
            storage::dto::stats::TopParticipant,
            storage::dto::stats::DailyActivity,
            storage::dto::stats::StatsPayload,
            storage::dto::stats::StatsResponse,
            storage::dto::common::PaginationMeta,
            storage::models::Judge,
            storage::models::AuthenticatedJudge,
            storage::models::Role,
            storage::models::Participant,
            storage::models::Category,
            storage::models::Score,
        )
    ),
    tags(
        (name = "auth", description = "Judge authentication and profile endpoints"),
        (name = "judges", description = "Judge management endpoints"),
        (name = "scores", description = "Score submission and listing endpoints"),
        (name = "participants", description = "Public participant endpoints"),
        (name = "categories", description = "Public category endpoints"),
        (name = "scoreboard", description = "Public scoreboard endpoints"),
        (name = "stats", description = "Public statistics endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Opaque token")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting judging platform API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/auth", features::auth::routes::routes())
        .nest("/api/judges", features::judges::routes::routes())
        .nest("/api/scores", features::scores::routes::routes())
        .nest("/api/participants", features::participants::routes::routes())
        .nest("/api/categories", features::categories::routes::routes())
        .nest("/api/scoreboard", features::scoreboard::routes::routes())
        .nest("/api/stats", features::stats::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
