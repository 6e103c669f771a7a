use crate::app::pages::{form_payload, message_or, Flash};
use crate::core::contract_editor::ContractEditor;
use crate::core::contract_store::ContractStore;
use crate::core::user_form::UserForm;
use crate::core::users_store::UsersStore;
use crate::domain::model::User;
use crate::domain::ports::{ContractApi, UserApi};
use crate::utils::error::{FieldErrors, HrError, Result};

/// Edit page: profile form plus the contract editor.
///
/// Submitting saves the contracts first; the profile update is only sent
/// once the contracts were saved.
pub struct EditUserPage<U: UserApi, C: ContractApi> {
    user_id: u64,
    users: UsersStore<U>,
    contracts: ContractStore<C>,
    form: UserForm,
    editor: ContractEditor,
    field_errors: FieldErrors,
    error_message: Option<String>,
}

impl<U: UserApi, C: ContractApi> EditUserPage<U, C> {
    pub fn new(user_id: u64, user_api: U, contract_api: C) -> Self {
        Self {
            user_id,
            users: UsersStore::new(user_api),
            contracts: ContractStore::new(contract_api),
            form: UserForm::new(),
            editor: ContractEditor::new(user_id),
            field_errors: FieldErrors::new(),
            error_message: None,
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn user(&self) -> Option<&User> {
        self.users.user_data()
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    pub fn editor(&self) -> &ContractEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ContractEditor {
        &mut self.editor
    }

    pub fn form_and_editor_mut(&mut self) -> (&mut UserForm, &mut ContractEditor) {
        (&mut self.form, &mut self.editor)
    }

    pub fn contracts(&self) -> &ContractStore<C> {
        &self.contracts
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// 載入使用者與其合約；使用者讀取失敗時回傳錯誤
    ///
    /// 合約讀不到只代表尚無合約
    pub async fn load(&mut self) -> Result<()> {
        self.users.get_user_by_id(self.user_id).await;
        if let Some(message) = self.users.error() {
            return Err(HrError::LoadFailed {
                resource: format!("user {}", self.user_id),
                message: message.to_string(),
            });
        }
        if let Some(user) = self.users.user_data() {
            self.form.reset(user);
        }

        self.editor.load(&mut self.contracts).await;
        if let Some(message) = self.contracts.error() {
            tracing::debug!("No contracts loaded for user {}: {}", self.user_id, message);
        }
        Ok(())
    }

    pub async fn submit(&mut self) -> Result<(User, Flash)> {
        self.error_message = None;
        let payload = form_payload(&self.form, &mut self.field_errors, &mut self.error_message)?;

        if let Err(e) = self.editor.submit_contracts(&mut self.contracts).await {
            self.error_message = Some(message_or(&e, "Failed to submit user."));
            return Err(e);
        }

        match self.users.update(self.user_id, &payload).await {
            Ok(user) => Ok((user, Flash::Updated)),
            Err(e) => {
                tracing::error!("update of user {} failed: {}", self.user_id, e);
                self.error_message = Some(message_or(&e, "Failed to submit user."));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contract_editor::{ContractField, CONTRACT_VALIDATION_FAILED};
    use crate::core::contract_store::tests::MockContractApi;
    use crate::core::user_form::BIRTH_DATE_REQUIRED;
    use crate::core::users_store::tests::MockUserApi;
    use crate::domain::model::{Kontrak, UserContracts};
    use chrono::NaiveDate;

    async fn seeded() -> (MockUserApi, MockContractApi) {
        let users = MockUserApi::default();
        users.users.lock().await.push(User {
            id: Some(7),
            name: "Gita".to_string(),
            email: "gita@example.com".to_string(),
            username: "gita".to_string(),
            phone: "0821".to_string(),
            gender: "Female".to_string(),
            tanggal_lahir: Some("1993-08-09".to_string()),
            ..Default::default()
        });

        let contracts = MockContractApi::default();
        contracts
            .seed(UserContracts {
                user_id: 7,
                kontraks: vec![Kontrak {
                    masa_berlaku_start: "01/01/2024".to_string(),
                    masa_berlaku_end: "31/12/2024".to_string(),
                    golongan_pajak: 1,
                    ..Default::default()
                }],
            })
            .await;

        (users, contracts)
    }

    #[tokio::test]
    async fn test_load_fills_form_and_editor() {
        let (users, contracts) = seeded().await;
        let mut page = EditUserPage::new(7, users, contracts);
        page.load().await.unwrap();

        assert_eq!(page.form().name, "Gita");
        assert_eq!(page.form().birth_date, NaiveDate::from_ymd_opt(1993, 8, 9));
        assert_eq!(page.editor().kontraks().len(), 1);
        assert_eq!(page.user().and_then(|u| u.id), Some(7));
    }

    #[tokio::test]
    async fn test_unknown_user_fails_to_load() {
        let (users, contracts) = seeded().await;
        let mut page = EditUserPage::new(99, users, contracts);
        let err = page.load().await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_successful_submit_saves_contracts_then_user() {
        let (users, contracts) = seeded().await;
        let mut page = EditUserPage::new(7, users.clone(), contracts.clone());
        page.load().await.unwrap();
        page.form_mut().phone = "0899".to_string();

        let (_, flash) = page.submit().await.unwrap();

        assert_eq!(flash, Flash::Updated);
        assert!(contracts.calls().await.contains(&"PUT /kontrak/7".to_string()));
        assert_eq!(*users.calls.lock().await.last().unwrap(), "PUT /users/7");
        assert_eq!(users.payloads.lock().await[0].phone, "0899");
    }

    #[tokio::test]
    async fn test_failed_contract_save_skips_user_update() {
        let (users, contracts) = seeded().await;
        contracts.fail_writes("Kontrak tidak valid").await;

        let mut page = EditUserPage::new(7, users.clone(), contracts);
        page.load().await.unwrap();

        let err = page.submit().await.unwrap_err();

        assert_eq!(err.to_string(), "Kontrak tidak valid");
        assert_eq!(page.error_message(), Some("Kontrak tidak valid"));
        assert!(!users
            .calls
            .lock()
            .await
            .iter()
            .any(|c| c.starts_with("PUT /users")));
    }

    #[tokio::test]
    async fn test_incomplete_contract_skips_user_update() {
        let (users, contracts) = seeded().await;
        let mut page = EditUserPage::new(7, users.clone(), contracts.clone());
        page.load().await.unwrap();
        page.editor_mut()
            .set_field(0, ContractField::Start(None))
            .unwrap();

        let err = page.submit().await.unwrap_err();

        assert_eq!(err.to_string(), CONTRACT_VALIDATION_FAILED);
        assert_eq!(
            page.editor().error_message(),
            Some("Please fill in all required fields for Contract #1.")
        );
        assert!(users.payloads.lock().await.is_empty());
        assert!(!contracts.calls().await.iter().any(|c| c.starts_with("PUT")));
    }

    #[tokio::test]
    async fn test_missing_birth_date_stops_before_contracts() {
        let (users, contracts) = seeded().await;
        let mut page = EditUserPage::new(7, users, contracts.clone());
        page.load().await.unwrap();
        page.form_mut().birth_date = None;

        assert!(page.submit().await.is_err());
        assert_eq!(page.error_message(), Some(BIRTH_DATE_REQUIRED));
        assert_eq!(contracts.calls().await, vec!["GET /kontrak/7"]);
    }
}
