use mpsync::replay::replay;
use mpsync::world::{Clock, InMemoryEngine, ManualClock, SystemClock, WorldDescription};
use mpsync::{ClientConfig, ClientError, ClientState};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mpsync=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Replay failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ClientError> {
    let config = ClientConfig::from_env()?;
    let engine = load_engine(&config).await?;

    // Replays are driven by explicit clock steps, starting from wall time
    let clock = Arc::new(ManualClock::new(SystemClock.now_ms()));
    let state = ClientState::new(&config, Arc::new(engine), clock.clone());
    let (_outbound, mut outbound) = state.attach_outbound();
    let sweep = state.spawn_dedup_sweep(&config);

    info!("Replaying events from stdin");
    let result = replay(
        &state,
        &clock,
        &mut outbound,
        BufReader::new(tokio::io::stdin()),
        &mut tokio::io::stdout(),
    )
    .await;

    if let Some(handle) = sweep {
        handle.abort();
    }
    result.map(|_| ())
}

async fn load_engine(config: &ClientConfig) -> Result<InMemoryEngine, ClientError> {
    let Some(path) = &config.world_path else {
        warn!("No world description configured, every target kind is unknown");
        return Ok(InMemoryEngine::new());
    };

    let raw = tokio::fs::read_to_string(path).await?;
    let description: WorldDescription = serde_json::from_str(&raw).map_err(ClientError::World)?;
    info!(
        path = %path.display(),
        objects = description.objects.len(),
        "Loaded world description"
    );
    Ok(InMemoryEngine::from_description(description))
}
