use crate::domain::model::{User, UserContracts, UserPayload};
use crate::domain::ports::{ConfigProvider, ContractApi, UserApi};
use crate::utils::error::{HrError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// REST client for the `/users` and `/kontrak` resources.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: String,
    client: Client,
}

impl HttpApiClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (key, value) in config.default_headers() {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                HrError::InvalidConfigValueError {
                    field: "api.headers".to_string(),
                    value: key.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let value = HeaderValue::from_str(&value).map_err(|e| {
                HrError::InvalidConfigValueError {
                    field: format!("api.headers.{}", key),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                }
            })?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("📡 {} {}", method, url);
        self.client.request(method, url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let response = self.request(method, path).json(body).send().await?;
        ensure_success(response).await
    }
}

/// 非 2xx 回應轉成 HrError::Api，訊息優先使用 body 的 `message`
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("📡 API response status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_server_message(&body)
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    Err(HrError::Api {
        status: status.as_u16(),
        message,
    })
}

fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
}

/// 2xx 寫入的 body 可能是空的（204）或不是使用者物件
///
/// 這時以送出的資料代替
async fn written_user(response: Response, id: Option<u64>, payload: &UserPayload) -> Result<User> {
    let body = response.text().await?;
    let value = serde_json::from_str::<serde_json::Value>(&body).ok();
    let is_user = value
        .as_ref()
        .and_then(|v| v.as_object())
        .map(|o| o.contains_key("id") || o.contains_key("username"))
        .unwrap_or(false);

    if let Some(value) = value.filter(|_| is_user) {
        match serde_json::from_value::<User>(value) {
            Ok(mut user) => {
                user.id = user.id.or(id);
                return Ok(user);
            }
            Err(e) => tracing::debug!("Write response is not a user: {}", e),
        }
    }
    tracing::debug!("Using the sent payload as the saved user");
    Ok(User::from_payload(id, payload))
}

#[async_trait]
impl UserApi for HttpApiClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("/users").await
    }

    async fn get_user(&self, id: u64) -> Result<User> {
        self.get_json(&format!("/users/{}", id)).await
    }

    async fn create_user(&self, payload: &UserPayload) -> Result<User> {
        let response = self.send_json(Method::POST, "/users", payload).await?;
        written_user(response, None, payload).await
    }

    async fn update_user(&self, id: u64, payload: &UserPayload) -> Result<User> {
        let response = self
            .send_json(Method::PUT, &format!("/users/{}", id), payload)
            .await?;
        written_user(response, Some(id), payload).await
    }
}

#[async_trait]
impl ContractApi for HttpApiClient {
    async fn list_contracts(&self) -> Result<Vec<UserContracts>> {
        self.get_json("/kontrak").await
    }

    async fn get_contracts(&self, user_id: u64) -> Result<UserContracts> {
        self.get_json(&format!("/kontrak/{}", user_id)).await
    }

    async fn create_contracts(&self, body: &UserContracts) -> Result<()> {
        self.send_json(Method::POST, "/kontrak", body).await?;
        Ok(())
    }

    async fn update_contracts(&self, user_id: u64, body: &UserContracts) -> Result<()> {
        self.send_json(Method::PUT, &format!("/kontrak/{}", user_id), body)
            .await?;
        Ok(())
    }
}
