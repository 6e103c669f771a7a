pub mod create_user;
pub mod edit_user;
pub mod user_list;

pub use create_user::CreateUserPage;
pub use edit_user::EditUserPage;
pub use user_list::{ExportFormat, UserListPage};

use crate::core::user_form::UserForm;
use crate::domain::model::UserPayload;
use crate::utils::error::{FieldErrors, HrError, Result};

/// 成功後顯示在使用者列表上方的訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Created,
    Updated,
}

impl Flash {
    /// `?success=create` / `?success=update`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "create" => Some(Flash::Created),
            "update" => Some(Flash::Updated),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Flash::Created => "create",
            Flash::Updated => "update",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Flash::Created => "User successfully created!",
            Flash::Updated => "User successfully updated!",
        }
    }
}

/// Field errors go to `field_errors`, anything else to `error_message`.
fn form_payload(
    form: &UserForm,
    field_errors: &mut FieldErrors,
    error_message: &mut Option<String>,
) -> Result<UserPayload> {
    *field_errors = FieldErrors::new();
    match form.to_payload() {
        Ok(payload) => Ok(payload),
        Err(HrError::FormValidation(errors)) => {
            *field_errors = errors.clone();
            Err(HrError::FormValidation(errors))
        }
        Err(e) => {
            *error_message = Some(e.to_string());
            Err(e)
        }
    }
}

/// 錯誤訊息為空時使用預設文字
fn message_or(e: &HrError, fallback: &str) -> String {
    let message = e.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_codes() {
        assert_eq!(Flash::from_code("create"), Some(Flash::Created));
        assert_eq!(
            Flash::from_code("update").map(|f| f.message()),
            Some("User successfully updated!")
        );
        assert_eq!(Flash::from_code("delete"), None);
        assert_eq!(Flash::Created.code(), "create");
    }

    #[test]
    fn test_empty_message_falls_back() {
        let err = HrError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(message_or(&err, "Failed to create user."), "Failed to create user.");
    }
}
