use evalset::config::AppConfig;
use evalset::database::{
    CollectionOps, Database, DatasetOps, ModelConfigOps,
};
use evalset::pagination::PageRequest;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    evalset::logging::init();
    tracing::info!("evalset v{} starting", evalset::VERSION);

    let config = AppConfig::load();
    let data_dir = config.data_dir();
    let db = Database::with_pool_size(&data_dir, config.database.max_connections).await?;
    tracing::info!("Database ready at {}", db.path().display());

    // Quick status report: one page per screen, default filters.
    let datasets = db.list_datasets(&Default::default(), PageRequest::first()).await;
    let collections = db.list_collections(&Default::default(), PageRequest::first()).await;
    let configs = db.list_model_configs(&Default::default(), PageRequest::first()).await;

    println!("datasets:      {}", datasets.total_items);
    println!("collections:   {}", collections.total_items);
    println!("model configs: {}", configs.total_items);

    Ok(())
}
