use crate::config::mongo_conf::MongoConfig;
use crate::model::property::Property;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use futures::stream::StreamExt;
use tracing::{error, info};

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// The whole collection; search and matching filter in memory.
    async fn list(&self) -> RepositoryResult<Vec<Property>>;
    async fn insert(&self, property: Property) -> RepositoryResult<Property>;
}

pub struct MongoPropertyRepository {
    collection: mongodb::Collection<Property>,
}

impl MongoPropertyRepository {
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
        let collection = db.collection::<Property>("properties");
        Ok(MongoPropertyRepository { collection })
    }
}

#[async_trait]
impl PropertyRepository for MongoPropertyRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Property>> {
        info!("Fetching property collection");
        let cursor = self.collection.find(None, None).await;
        match cursor {
            Ok(mut cursor) => {
                let mut properties = Vec::new();
                while let Some(property) = cursor.next().await {
                    match property {
                        Ok(p) => properties.push(p),
                        Err(e) => {
                            error!("Failed to deserialize property: {}", e);
                            return Err(RepositoryError::serialization(format!("Failed to deserialize property: {}", e)));
                        }
                    }
                }
                info!("Fetched {} properties", properties.len());
                Ok(properties)
            }
            Err(e) => {
                error!("Failed to list properties: {}", e);
                Err(RepositoryError::database(format!("Failed to list properties: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %property.id))]
    async fn insert(&self, property: Property) -> RepositoryResult<Property> {
        info!("Inserting property listing");
        // Business ids are timestamp-derived and not collision-checked; a
        // duplicate id coexists rather than being rejected.
        let mut stored = property;
        stored.object_id = Some(bson::oid::ObjectId::new());
        let result = self.collection.insert_one(stored.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Property inserted successfully");
                Ok(stored)
            }
            Err(e) => {
                error!("Failed to insert property: {}", e);
                Err(RepositoryError::database(format!("Failed to insert property: {}", e)))
            }
        }
    }
}
