#[cfg(feature = "ssr")]
use mimalloc::MiMalloc;

#[cfg(feature = "ssr")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Spoofy
#[cfg(feature = "ssr")]
#[derive(clap::Parser)]
#[clap(version = "0.1")]
struct Opts {
    #[clap(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,
    /// Overrides the configured site address
    #[clap(short, long)]
    addr: Option<std::net::SocketAddr>,
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;
    use leptos::*;
    use spoofy::{config::Config, server};

    let opts = Opts::parse();
    let _ = dotenvy::dotenv();
    let config = Config::open_or_default(&opts.config)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level()))
        .init();

    let conf = get_configuration(None).await?;
    let mut leptos_options = conf.leptos_options;
    if let Some(addr) = opts.addr.or(config.site_addr) {
        leptos_options.site_addr = addr;
    }
    let addr = leptos_options.site_addr;
    let app = server::app_router(leptos_options);

    let token = server::shutdown_token();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on http://{}", &addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await?;
    log::info!("Server stopped");
    Ok(())
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // The browser entry point is `spoofy::hydrate`
}
