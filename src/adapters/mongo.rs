use crate::config::toml_config::DatabaseConfig;
use crate::domain::model::TestUser;
use crate::domain::ports::{StoreConnector, UserStore};
use crate::utils::error::{DiagError, Result};
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Client, Collection};

#[derive(Debug, Clone)]
pub struct MongoConnector {
    config: DatabaseConfig,
}

impl MongoConnector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StoreConnector for MongoConnector {
    type Store = MongoUserStore;

    async fn connect(&self, connection_string: &str) -> Result<MongoUserStore> {
        let client = Client::with_uri_str(connection_string).await?;

        // 連線字串沒指定資料庫時用設定的預設值
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(&self.config.database));

        // driver 是延遲連線，先 ping 一次確認伺服器可達
        database.run_command(doc! { "ping": 1 }).await?;
        tracing::debug!(
            "Connected to database '{}', collection '{}'",
            database.name(),
            self.config.collection
        );

        let collection = database.collection::<Document>(&self.config.collection);
        Ok(MongoUserStore { client, collection })
    }
}

pub struct MongoUserStore {
    client: Client,
    collection: Collection<Document>,
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert_user(&self, user: &TestUser) -> Result<String> {
        let id = ObjectId::new();
        self.collection
            .insert_one(doc! {
                "_id": id,
                "name": user.name.as_str(),
                "email": user.email.as_str(),
                "password": user.password.as_str(),
            })
            .await?;
        Ok(id.to_hex())
    }

    async fn delete_user(&self, id: &str) -> Result<u64> {
        let oid = ObjectId::parse_str(id).map_err(|e| DiagError::StepError {
            step: "delete".to_string(),
            message: format!("invalid record id {}: {}", id, e),
        })?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count)
    }

    async fn close(&self) -> Result<()> {
        self.client.clone().shutdown().await;
        Ok(())
    }
}
