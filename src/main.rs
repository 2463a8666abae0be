use produto_dash::app;
use produto_dash::config::DashboardConfig;

const BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Fail fast: a missing variable is reported here with the complete list,
    // before the server ever binds.
    let config = DashboardConfig::from_env()?;

    app::run(config, BIND_ADDR).await
}
