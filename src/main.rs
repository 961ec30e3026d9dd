use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use itinera::application::services::JobService;
use itinera::infrastructure::auth::ServiceAccountMinter;
use itinera::infrastructure::llm::OpenAiGenerator;
use itinera::infrastructure::observability::{TracingConfig, init_tracing};
use itinera::infrastructure::persistence::FirestoreJobStore;
use itinera::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let minter = Arc::new(ServiceAccountMinter::new(
        settings.service_account.client_email.clone(),
        settings.service_account.private_key.clone(),
        settings.service_account.token_uri.clone(),
    ));

    let job_store = Arc::new(FirestoreJobStore::with_base_url(
        minter,
        settings.firestore.project_id.clone(),
        settings.firestore.base_url.clone(),
    ));

    let generator = Arc::new(OpenAiGenerator::new(
        settings.llm.base_url.clone(),
        settings.llm.api_key.clone(),
        settings.llm.model.clone(),
    ));

    let job_service = Arc::new(JobService::new(job_store, generator));

    let state = AppState { job_service };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
