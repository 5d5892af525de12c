use crate::config::mongo_conf::MongoConfig;
use crate::model::demand::Demand;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::doc;
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

#[async_trait]
pub trait DemandRepository: Send + Sync {
    /// All demands, newest (highest id) first.
    async fn list(&self) -> RepositoryResult<Vec<Demand>>;
    async fn get_by_id(&self, id: i64) -> RepositoryResult<Demand>;
    async fn insert(&self, demand: Demand) -> RepositoryResult<Demand>;
    async fn update_status(&self, id: i64, status: &str) -> RepositoryResult<Demand>;
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}

pub struct MongoDemandRepository {
    collection: mongodb::Collection<Demand>,
}

impl MongoDemandRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{options::{ClientOptions, Credential, ResolverConfig}, Client};
        let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
        client_options.app_name = Some("ResiteBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));
        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build());
        }
        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection = db.collection::<Demand>("demands");
        Ok(MongoDemandRepository { collection })
    }
}

#[async_trait]
impl DemandRepository for MongoDemandRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Demand>> {
        info!("Fetching demand collection");
        let options = FindOptions::builder().sort(doc! { "id": -1 }).build();
        let cursor = self.collection.find(None, options).await;
        match cursor {
            Ok(mut cursor) => {
                let mut demands = Vec::new();
                while let Some(demand) = cursor.next().await {
                    match demand {
                        Ok(d) => demands.push(d),
                        Err(e) => {
                            error!("Failed to deserialize demand: {}", e);
                            return Err(RepositoryError::serialization(format!("Failed to deserialize demand: {}", e)));
                        }
                    }
                }
                info!("Fetched {} demands", demands.len());
                Ok(demands)
            }
            Err(e) => {
                error!("Failed to list demands: {}", e);
                Err(RepositoryError::database(format!("Failed to list demands: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: i64) -> RepositoryResult<Demand> {
        let filter = doc! { "id": id };
        let result = self.collection.find_one(filter, None).await;
        match result {
            Ok(Some(demand)) => Ok(demand),
            Ok(None) => {
                error!("Demand not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Demand not found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch demand by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch demand by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %demand.id, name = %demand.name))]
    async fn insert(&self, demand: Demand) -> RepositoryResult<Demand> {
        info!("Creating new demand");
        let mut stored = demand;
        stored.object_id = Some(bson::oid::ObjectId::new());
        let result = self.collection.insert_one(stored.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Demand created successfully");
                Ok(stored)
            }
            Err(e) => {
                error!("Failed to create demand: {}", e);
                Err(RepositoryError::database(format!("Failed to create demand: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_status(&self, id: i64, status: &str) -> RepositoryResult<Demand> {
        info!(demand_id = %id, status = %status, "Updating demand status");
        let filter = doc! { "id": id };
        let update = doc! { "$set": { "status": status } };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Demand status updated successfully for ID: {}", id);
                self.get_by_id(id).await
            }
            Ok(_) => {
                error!("No demand found to update status for ID: {}", id);
                Err(RepositoryError::not_found(format!("No demand found to update status for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to update demand status: {}", e);
                Err(RepositoryError::database(format!("Failed to update demand status: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        info!("Deleting demand with ID: {}", id);
        let filter = doc! { "id": id };
        let result = self.collection.delete_one(filter, None).await;
        match result {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("Demand deleted successfully for ID: {}", id);
                Ok(())
            }
            Ok(_) => {
                error!("No demand found to delete for ID: {}", id);
                Err(RepositoryError::not_found(format!("No demand found to delete for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to delete demand: {}", e);
                Err(RepositoryError::database(format!("Failed to delete demand: {}", e)))
            }
        }
    }
}
