use crate::domain::model::{User, UserContracts, UserPayload};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn default_headers(&self) -> HashMap<String, String>;
}

/// `/users` 資源
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn get_user(&self, id: u64) -> Result<User>;
    async fn create_user(&self, payload: &UserPayload) -> Result<User>;
    async fn update_user(&self, id: u64, payload: &UserPayload) -> Result<User>;
}

/// `/kontrak` 資源
#[async_trait]
pub trait ContractApi: Send + Sync {
    async fn list_contracts(&self) -> Result<Vec<UserContracts>>;
    async fn get_contracts(&self, user_id: u64) -> Result<UserContracts>;
    async fn create_contracts(&self, body: &UserContracts) -> Result<()>;
    async fn update_contracts(&self, user_id: u64, body: &UserContracts) -> Result<()>;
}
