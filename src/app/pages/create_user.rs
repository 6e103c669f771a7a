use crate::app::pages::{form_payload, message_or, Flash};
use crate::core::user_form::UserForm;
use crate::core::users_store::UsersStore;
use crate::domain::model::User;
use crate::domain::ports::UserApi;
use crate::utils::error::{FieldErrors, Result};

pub struct CreateUserPage<U: UserApi> {
    store: UsersStore<U>,
    form: UserForm,
    field_errors: FieldErrors,
    error_message: Option<String>,
}

impl<U: UserApi> CreateUserPage<U> {
    pub fn new(api: U) -> Self {
        Self {
            store: UsersStore::new(api),
            form: UserForm::new(),
            field_errors: FieldErrors::new(),
            error_message: None,
        }
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub async fn submit(&mut self) -> Result<(User, Flash)> {
        self.error_message = None;
        let payload = form_payload(&self.form, &mut self.field_errors, &mut self.error_message)?;

        match self.store.create(&payload).await {
            Ok(user) => Ok((user, Flash::Created)),
            Err(e) => {
                tracing::error!("create failed: {}", e);
                self.error_message = Some(message_or(&e, "Failed to create user."));
                Err(e)
            }
        }
    }
}
