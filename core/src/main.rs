use items_core::{AppConfig, Item, ItemApi};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    let default_filter = if config.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(base_url = config.endpoint.base_url(), app = %config.app_name, "resolved configuration");

    let api = ItemApi::new(&config.endpoint);
    let items = api.list().await?;

    println!("{}", config.app_name);
    if items.is_empty() {
        println!("(no items)");
    }
    for item in &items {
        println!("{}", render(item));
    }
    Ok(())
}

fn render(item: &Item) -> String {
    let text = |field: &str| match item.get(field) {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
        None => None,
    };
    match (item.id(), text("name"), text("quantity")) {
        (Some(id), Some(name), Some(quantity)) => format!("{id:>4}  {name:<24} {quantity}"),
        _ => serde_json::to_string(item).unwrap_or_default(),
    }
}
