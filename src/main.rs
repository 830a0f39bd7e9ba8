//! Scout command-line entrypoint: `scout <query...>`.

use anyhow::bail;
use mimalloc::MiMalloc;

use scout::config::Config;
use scout::resolver::Resolver;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        bail!("usage: scout <query...>");
    }

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        docs_root = %config.docs_root.display(),
        catalog = %config.catalog_path().display(),
        provider = config.oracle.provider.as_str(),
        "Scout starting"
    );

    let resolver = Resolver::from_config(&config)?;
    let response = resolver.resolve(&query).await;

    println!("{}", serde_json::to_string_pretty(response.as_ref())?);
    Ok(())
}
