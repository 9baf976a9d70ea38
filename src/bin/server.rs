use anyhow::Context;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::{run_server, AppState, QuizRules};
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Settings::load()?;
    let pool = establish_connection(&settings.db_path)
        .await
        .with_context(|| format!("Cannot open database {}", settings.db_path))?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await?;

    let state = AppState::new(
        pool,
        QuizRules {
            max_category_id: settings.quiz_max_category_id,
        },
    );
    run_server(state, &settings.listen_addr).await
}
