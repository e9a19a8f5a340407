use crate::domain::model::TestUser;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 一個已開啟的使用者集合連線
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 寫入一筆使用者，回傳其 id
    async fn insert_user(&self, user: &TestUser) -> Result<String>;
    /// 依 id 刪除，回傳刪除筆數
    async fn delete_user(&self, id: &str) -> Result<u64>;
    async fn close(&self) -> Result<()>;
}

#[async_trait]
pub trait StoreConnector: Send + Sync {
    type Store: UserStore;

    async fn connect(&self, connection_string: &str) -> Result<Self::Store>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStatus {
    pub success: bool,
    pub code: Option<i32>,
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandStatus>;
}
