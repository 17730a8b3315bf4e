use std::sync::Arc;

use quill::{api, telemetry, Config, PostStore, Server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    telemetry::init(config.log_format);

    let store = Arc::new(PostStore::seeded());
    let server = Server::bind(config.addr()?).await?;
    info!(addr = %server.local_addr()?, "API is running");

    server.serve(api::router(store)).await?;
    Ok(())
}
