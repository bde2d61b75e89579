use std::sync::Arc;

use rideplan::config::Config;
use rideplan::engine::Engine;
use rideplan::error::Error;
use rideplan::external::google_maps::GoogleMaps;
use rideplan::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let maps = Arc::new(GoogleMaps::new(&config));
    let engine = Engine::new(&config, maps);

    serve(engine, config.listen_addr).await
}
