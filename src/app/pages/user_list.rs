use crate::app::pages::Flash;
use crate::app::render::{render_user_table, users_to_csv, users_to_json};
use crate::core::users_store::UsersStore;
use crate::domain::ports::UserApi;
use crate::utils::error::{HrError, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(ExportFormat::Table),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unsupported format {:?} (table, csv, json)", other)),
        }
    }
}

/// Data User: list of all users.
pub struct UserListPage<U: UserApi> {
    store: UsersStore<U>,
    flash: Option<Flash>,
}

impl<U: UserApi> UserListPage<U> {
    pub fn new(api: U) -> Self {
        Self {
            store: UsersStore::new(api),
            flash: None,
        }
    }

    pub fn with_flash(mut self, flash: Option<Flash>) -> Self {
        self.flash = flash;
        self
    }

    pub fn store(&self) -> &UsersStore<U> {
        &self.store
    }

    pub async fn load(&mut self) -> Result<()> {
        self.store.get_users().await;
        match self.store.error() {
            Some(message) => Err(HrError::LoadFailed {
                resource: "users".to_string(),
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        let users = self.store.user_list();
        match format {
            ExportFormat::Csv => users_to_csv(users),
            ExportFormat::Json => users_to_json(users),
            ExportFormat::Table => {
                let mut out = Vec::new();
                if let Some(flash) = self.flash {
                    out.push(flash.message().to_string());
                    out.push(String::new());
                }
                out.push("List User".to_string());
                out.push(render_user_table(users));
                Ok(out.join("\n"))
            }
        }
    }
}
