use husky_map::config::{AppConfig, DEFAULT_LOG_FILTER};
use husky_map::net::CampusClient;
use husky_map::{ui, HuskyMap};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

fn main() -> iced::Result {
    init_tracing();

    let setup = AppConfig::from_env()
        .and_then(|config| CampusClient::new(&config.server_url).map(|client| (config, client)));
    let (config, client) = match setup {
        Ok(setup) => setup,
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            ui::alert::show(&err);
            return Ok(());
        }
    };

    iced::application("Husky Map", HuskyMap::update, HuskyMap::view)
        .theme(HuskyMap::theme)
        .centered()
        .run_with(move || HuskyMap::new(config, client))
}

