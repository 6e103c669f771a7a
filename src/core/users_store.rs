use crate::domain::model::{User, UserPayload};
use crate::domain::ports::UserApi;
use crate::utils::error::Result;

/// Client-side state for the `/users` resource.
///
/// Fetches store their failure in `error` for inline display; writes hand the
/// error back so a caller can abort a multi-step submission.
pub struct UsersStore<A: UserApi> {
    api: A,
    user_list: Vec<User>,
    user_data: Option<User>,
    error: Option<String>,
}

impl<A: UserApi> UsersStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            user_list: Vec::new(),
            user_data: None,
            error: None,
        }
    }

    pub fn user_list(&self) -> &[User] {
        &self.user_list
    }

    pub fn user_data(&self) -> Option<&User> {
        self.user_data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn get_users(&mut self) {
        self.error = None;
        match self.api.list_users().await {
            Ok(users) => {
                tracing::debug!("Loaded {} users", users.len());
                self.user_list = users;
            }
            Err(e) => {
                tracing::warn!("Failed to load users: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub async fn get_user_by_id(&mut self, id: u64) {
        self.error = None;
        match self.api.get_user(id).await {
            Ok(user) => self.user_data = Some(user),
            Err(e) => {
                tracing::warn!("Failed to load user {}: {}", id, e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub async fn create(&mut self, payload: &UserPayload) -> Result<User> {
        let created = self.api.create_user(payload).await?;
        tracing::info!("Created user {}", payload.username);
        Ok(created)
    }

    pub async fn update(&mut self, id: u64, payload: &UserPayload) -> Result<User> {
        let updated = self.api.update_user(id, payload).await?;
        tracing::info!("Updated user {}", id);
        Ok(updated)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::error::HrError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// 記錄呼叫並回傳預設結果的 UserApi
    #[derive(Clone, Default)]
    pub(crate) struct MockUserApi {
        pub users: Arc<Mutex<Vec<User>>>,
        pub calls: Arc<Mutex<Vec<String>>>,
        pub payloads: Arc<Mutex<Vec<UserPayload>>>,
        pub fail_with: Arc<Mutex<Option<String>>>,
    }

    impl MockUserApi {
        pub async fn fail(&self, message: &str) {
            *self.fail_with.lock().await = Some(message.to_string());
        }

        async fn check(&self, call: String) -> Result<()> {
            self.calls.lock().await.push(call);
            match self.fail_with.lock().await.clone() {
                Some(message) => Err(HrError::Api {
                    status: 500,
                    message,
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl UserApi for MockUserApi {
        async fn list_users(&self) -> Result<Vec<User>> {
            self.check("GET /users".to_string()).await?;
            Ok(self.users.lock().await.clone())
        }

        async fn get_user(&self, id: u64) -> Result<User> {
            self.check(format!("GET /users/{}", id)).await?;
            self.users
                .lock()
                .await
                .iter()
                .find(|u| u.id == Some(id))
                .cloned()
                .ok_or_else(|| HrError::Api {
                    status: 404,
                    message: "User not found".to_string(),
                })
        }

        async fn create_user(&self, payload: &UserPayload) -> Result<User> {
            self.check("POST /users".to_string()).await?;
            self.payloads.lock().await.push(payload.clone());
            Ok(User {
                id: Some(100),
                name: payload.name.clone(),
                email: payload.email.clone(),
                username: payload.username.clone(),
                phone: payload.phone.clone(),
                gender: payload.gender.clone(),
                ..Default::default()
            })
        }

        async fn update_user(&self, id: u64, payload: &UserPayload) -> Result<User> {
            self.check(format!("PUT /users/{}", id)).await?;
            self.payloads.lock().await.push(payload.clone());
            Ok(User {
                id: Some(id),
                name: payload.name.clone(),
                ..Default::default()
            })
        }
    }

    fn sample_user(id: u64) -> User {
        User {
            id: Some(id),
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
            username: format!("user{}", id),
            phone: "0812".to_string(),
            gender: "Male".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_users_stores_list() {
        let api = MockUserApi::default();
        api.users.lock().await.extend([sample_user(1), sample_user(2)]);

        let mut store = UsersStore::new(api);
        store.get_users().await;

        assert_eq!(store.user_list().len(), 2);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_kept_as_state() {
        let api = MockUserApi::default();
        api.fail("Server down").await;

        let mut store = UsersStore::new(api);
        store.get_user_by_id(1).await;

        assert_eq!(store.error(), Some("Server down"));
        assert!(store.user_data().is_none());
    }

    #[tokio::test]
    async fn test_write_failure_is_returned() {
        let api = MockUserApi::default();
        api.fail("Email already taken").await;

        let mut store = UsersStore::new(api);
        let err = store.create(&UserPayload::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "Email already taken");
        // 寫入失敗不寫進 store 狀態
        assert!(store.error().is_none());
    }
}
