use anyhow::anyhow;
use log::{error, info, warn};
use rwis::{
    assemble_for, get_config_info, get_log_level, setup_logger, Catalog, MemoryStore, Resolver,
};
use std::{sync::Arc, time::Duration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = get_config_info()?;
    setup_logger().level(get_log_level(&cli)).apply()?;

    let catalog = Arc::new(Catalog::standard()?);
    info!("parameter catalog holds {} definitions", catalog.len());

    let store = Arc::new(MemoryStore::new());
    let descriptions_path = cli
        .descriptions
        .unwrap_or(String::from("./data/locations.json"));
    store
        .load_descriptions(&descriptions_path)
        .await
        .map_err(|e| anyhow!("error loading location descriptions: {}", e))?;
    let values_path = cli.values.unwrap_or(String::from("./data/values.json"));
    store
        .load_values(&values_path)
        .await
        .map_err(|e| anyhow!("error loading values: {}", e))?;

    let mut resolver = Resolver::new(catalog.clone(), store.clone(), store.clone());
    if let Some(timeout_ms) = cli.source_timeout_ms {
        resolver = resolver.with_source_timeout(Duration::from_millis(timeout_ms));
    }

    let mut runs = vec![];
    for description in store.descriptions().await {
        if let Some(model_id) = &cli.model_id {
            if description.model_id() != model_id {
                continue;
            }
        }
        if let Err(e) = description.check_sources(&catalog) {
            error!(
                "skipping {} / {}: {}",
                description.location(),
                description.model_id(),
                e
            );
            continue;
        }
        let inputs = assemble_for(&resolver, &description).await;
        if inputs.is_complete() {
            info!(
                "{} / {}: all inputs resolved",
                inputs.location, inputs.model_id
            );
        } else {
            warn!(
                "{} / {}: run would lack some inputs",
                inputs.location, inputs.model_id
            );
        }
        runs.push(inputs);
    }

    println!("{}", serde_json::to_string_pretty(&runs)?);
    Ok(())
}
