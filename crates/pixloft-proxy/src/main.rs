use pixloft_core::Config;

// Use mimalloc as the global allocator for better performance and lower
// fragmentation, especially when running on musl-based systems inside
// containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, store client, routes)
    let (_state, router) = pixloft_proxy::setup::initialize_app(config.clone())?;

    // Start the server
    pixloft_proxy::setup::server::start_server(&config, router).await?;

    Ok(())
}
