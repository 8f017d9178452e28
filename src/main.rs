use logofield::LogoField;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let logo = std::env::args().nth(1).unwrap_or_else(|| "logo.png".to_string());
    tracing::info!("logofield v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = LogoField::new(logo).run() {
        tracing::error!("session failed: {}", e);
        std::process::exit(1);
    }
}
