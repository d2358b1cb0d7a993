//! Model-Config Database Tests
//!
//! Global name uniqueness, JSON field round-trips, and the enum-label
//! filters on the model-config list.

use crate::database::model_configs::ModelConfigFilter;
use crate::database::{ConfigType, DbError, ModelConfigOps, ModelConfigRecord, ModelType};
use crate::pagination::PageRequest;
use crate::tests::common::{create_test_db, seed_model_config, stamp};

#[tokio::test]
async fn test_create_and_get_model_config() {
    let (db, _temp) = create_test_db().await;

    let mut config = ModelConfigRecord::new("gpt-referee");
    config.model_type = Some(ModelType::Remote);
    config.config_type = Some(ConfigType::RefereeModel);
    config.streaming = true;
    config.url = Some("https://api.example.com/v1/chat".to_string());
    config.headers = Some(r#"{"Authorization": "Bearer ..."}"#.to_string());
    config.body = Some(r#"{"model": "referee-1", "messages": []}"#.to_string());
    config.response_path = Some("choices.0.message.content".to_string());

    db.create_model_config(&config)
        .await
        .expect("Failed to create model config");

    let retrieved = db
        .get_model_config(&config.id)
        .await
        .expect("Failed to get model config")
        .expect("Model config not found");
    assert_eq!(retrieved.name, "gpt-referee");
    assert_eq!(retrieved.model_type, Some(ModelType::Remote));
    assert_eq!(retrieved.config_type, Some(ConfigType::RefereeModel));
    assert!(retrieved.streaming);
    assert_eq!(
        retrieved.response_path.as_deref(),
        Some("choices.0.message.content")
    );
}

#[tokio::test]
async fn test_config_name_is_globally_unique() {
    let (db, _temp) = create_test_db().await;

    seed_model_config(&db, "local-llama", &stamp(1, 10)).await;

    let dup = ModelConfigRecord::new("local-llama");
    let err = db.create_model_config(&dup).await.unwrap_err();
    assert!(matches!(err, DbError::DuplicateName(_)));

    // Renaming another config onto the taken name fails too.
    let mut other = seed_model_config(&db, "other", &stamp(2, 10)).await;
    other.name = "local-llama".to_string();
    let err = db.update_model_config(&other).await.unwrap_err();
    assert!(matches!(err, DbError::DuplicateName(_)));
}

#[tokio::test]
async fn test_find_model_config_id() {
    let (db, _temp) = create_test_db().await;

    let config = seed_model_config(&db, "needle", &stamp(1, 10)).await;

    let found = db
        .find_model_config_id("needle")
        .await
        .expect("Lookup failed");
    assert_eq!(found, Some(config.id.clone()));

    db.delete_model_config(&config.id)
        .await
        .expect("Failed to delete model config");
    let found = db
        .find_model_config_id("needle")
        .await
        .expect("Lookup failed");
    assert_eq!(found, None);
}

#[tokio::test]
async fn test_update_model_config_fields() {
    let (db, _temp) = create_test_db().await;

    let mut config = seed_model_config(&db, "local-llama", &stamp(1, 10)).await;
    config.model_type = Some(ModelType::Local);
    config.config_type = Some(ConfigType::TestModel);
    config.model_file = Some("/models/llama.gguf".to_string());

    db.update_model_config(&config)
        .await
        .expect("Failed to update model config");

    let retrieved = db
        .get_model_config(&config.id)
        .await
        .expect("Failed to get model config")
        .expect("Model config not found");
    assert_eq!(retrieved.model_type, Some(ModelType::Local));
    assert_eq!(retrieved.model_file.as_deref(), Some("/models/llama.gguf"));
}

#[tokio::test]
async fn test_type_label_filters() {
    let (db, _temp) = create_test_db().await;

    let mut remote = ModelConfigRecord::new("remote-1");
    remote.model_type = Some(ModelType::Remote);
    remote.config_type = Some(ConfigType::TestModel);
    remote.created_at = stamp(1, 10);
    remote.updated_at = stamp(1, 10);
    db.create_model_config(&remote)
        .await
        .expect("Failed to create model config");

    let mut local = ModelConfigRecord::new("local-1");
    local.model_type = Some(ModelType::Local);
    local.config_type = Some(ConfigType::RefereeModel);
    local.created_at = stamp(2, 10);
    local.updated_at = stamp(2, 10);
    db.create_model_config(&local)
        .await
        .expect("Failed to create model config");

    let remotes = db
        .list_model_configs(
            &ModelConfigFilter {
                model_type: Some("Remote model".to_string()),
                ..Default::default()
            },
            PageRequest::first(),
        )
        .await;
    assert_eq!(remotes.total_items, 1);
    assert_eq!(remotes.rows[0].name, "remote-1");

    let referees = db
        .list_model_configs(
            &ModelConfigFilter {
                config_type: Some("Referee model".to_string()),
                ..Default::default()
            },
            PageRequest::first(),
        )
        .await;
    assert_eq!(referees.total_items, 1);
    assert_eq!(referees.rows[0].name, "local-1");

    // "All" and unknown labels both leave the listing unconstrained.
    let all = db
        .list_model_configs(
            &ModelConfigFilter {
                model_type: Some("All".to_string()),
                config_type: Some("Mystery".to_string()),
                ..Default::default()
            },
            PageRequest::first(),
        )
        .await;
    assert_eq!(all.total_items, 2);
}

#[tokio::test]
async fn test_deleted_configs_excluded_from_listing() {
    let (db, _temp) = create_test_db().await;

    let keep = seed_model_config(&db, "keep", &stamp(1, 10)).await;
    let drop = seed_model_config(&db, "drop", &stamp(2, 10)).await;

    db.delete_model_config(&drop.id)
        .await
        .expect("Failed to delete model config");

    let listing = db
        .list_model_configs(&ModelConfigFilter::default(), PageRequest::first())
        .await;
    assert_eq!(listing.total_items, 1);
    assert_eq!(listing.rows[0].id, keep.id);
}
