use orbit_duel::frameworks::config::DemoConfig;
use orbit_duel::frameworks::runtime::init_runtime;
use orbit_duel::run_demo;

#[tokio::main]
async fn main() {
    init_runtime();

    let config = match DemoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return;
        }
    };

    // Report errors rather than panicking.
    if let Err(e) = run_demo(config).await {
        tracing::error!(error = %e, "demo failed");
    }
}
