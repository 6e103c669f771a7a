use crate::domain::model::UserContracts;
use crate::domain::ports::ContractApi;
use crate::utils::error::Result;

/// Client-side state for the `/kontrak` resource.
pub struct ContractStore<A: ContractApi> {
    api: A,
    contract_list: Vec<UserContracts>,
    selected_contract: Option<UserContracts>,
    error: Option<String>,
}

impl<A: ContractApi> ContractStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            contract_list: Vec::new(),
            selected_contract: None,
            error: None,
        }
    }

    pub fn contract_list(&self) -> &[UserContracts] {
        &self.contract_list
    }

    pub fn selected_contract(&self) -> Option<&UserContracts> {
        self.selected_contract.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_selected_contract(&mut self) {
        self.selected_contract = None;
    }

    pub async fn get_contracts(&mut self) {
        self.error = None;
        match self.api.list_contracts().await {
            Ok(list) => {
                tracing::debug!("Loaded contracts for {} users", list.len());
                self.contract_list = list;
            }
            Err(e) => {
                tracing::warn!("Failed to load contracts: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub async fn get_contract_by_user_id(&mut self, user_id: u64) {
        self.error = None;
        match self.api.get_contracts(user_id).await {
            Ok(contracts) => self.selected_contract = Some(contracts),
            Err(e) => {
                tracing::warn!("Failed to load contracts of user {}: {}", user_id, e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub async fn create_contract(&mut self, body: &UserContracts) -> Result<()> {
        self.api.create_contracts(body).await?;
        tracing::info!(
            "Created {} contract(s) for user {}",
            body.kontraks.len(),
            body.user_id
        );
        self.get_contracts().await;
        Ok(())
    }

    pub async fn update_contract(&mut self, user_id: u64, body: &UserContracts) -> Result<()> {
        self.api.update_contracts(user_id, body).await?;
        tracing::info!(
            "Updated {} contract(s) for user {}",
            body.kontraks.len(),
            user_id
        );
        self.get_contracts().await;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::error::HrError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// 以記憶體 map 模擬 /kontrak
    #[derive(Clone, Default)]
    pub(crate) struct MockContractApi {
        pub stored: Arc<Mutex<HashMap<u64, UserContracts>>>,
        pub calls: Arc<Mutex<Vec<String>>>,
        pub bodies: Arc<Mutex<Vec<UserContracts>>>,
        pub fail_writes_with: Arc<Mutex<Option<String>>>,
    }

    impl MockContractApi {
        pub async fn seed(&self, contracts: UserContracts) {
            self.stored.lock().await.insert(contracts.user_id, contracts);
        }

        pub async fn fail_writes(&self, message: &str) {
            *self.fail_writes_with.lock().await = Some(message.to_string());
        }

        pub async fn calls(&self) -> Vec<String> {
            self.calls.lock().await.clone()
        }

        async fn write(&self, call: String, body: &UserContracts) -> Result<()> {
            self.calls.lock().await.push(call);
            if let Some(message) = self.fail_writes_with.lock().await.clone() {
                return Err(HrError::Api {
                    status: 422,
                    message,
                });
            }
            self.bodies.lock().await.push(body.clone());
            self.stored.lock().await.insert(body.user_id, body.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl ContractApi for MockContractApi {
        async fn list_contracts(&self) -> Result<Vec<UserContracts>> {
            self.calls.lock().await.push("GET /kontrak".to_string());
            Ok(self.stored.lock().await.values().cloned().collect())
        }

        async fn get_contracts(&self, user_id: u64) -> Result<UserContracts> {
            self.calls.lock().await.push(format!("GET /kontrak/{}", user_id));
            self.stored
                .lock()
                .await
                .get(&user_id)
                .cloned()
                .ok_or_else(|| HrError::Api {
                    status: 404,
                    message: "Kontrak not found".to_string(),
                })
        }

        async fn create_contracts(&self, body: &UserContracts) -> Result<()> {
            self.write("POST /kontrak".to_string(), body).await
        }

        async fn update_contracts(&self, user_id: u64, body: &UserContracts) -> Result<()> {
            self.write(format!("PUT /kontrak/{}", user_id), body).await
        }
    }

    #[tokio::test]
    async fn test_create_refreshes_list() {
        let api = MockContractApi::default();
        let mut store = ContractStore::new(api.clone());

        let body = UserContracts {
            user_id: 4,
            kontraks: vec![Default::default()],
        };
        store.create_contract(&body).await.unwrap();

        assert_eq!(api.calls().await, vec!["POST /kontrak", "GET /kontrak"]);
        assert_eq!(store.contract_list().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_previous_selection() {
        let api = MockContractApi::default();
        api.seed(UserContracts {
            user_id: 1,
            kontraks: vec![Default::default()],
        })
        .await;

        let mut store = ContractStore::new(api);
        store.get_contract_by_user_id(1).await;
        store.get_contract_by_user_id(2).await;

        assert_eq!(store.error(), Some("Kontrak not found"));
        assert_eq!(store.selected_contract().map(|c| c.user_id), Some(1));

        store.clear_selected_contract();
        assert!(store.selected_contract().is_none());
    }

    #[tokio::test]
    async fn test_failed_update_skips_refresh() {
        let api = MockContractApi::default();
        api.fail_writes("golongan_pajak is invalid").await;

        let mut store = ContractStore::new(api.clone());
        let err = store
            .update_contract(3, &UserContracts::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "golongan_pajak is invalid");
        assert_eq!(api.calls().await, vec!["PUT /kontrak/3"]);
    }
}
