use crate::core::dates::{format_display_date, parse_birth_date};
use crate::domain::model::{User, UserPayload};
use crate::utils::error::{FieldErrors, HrError, Result};
use crate::utils::validation::{is_blank, is_valid_email};
use chrono::NaiveDate;

pub const BIRTH_DATE_REQUIRED: &str = "Tanggal Lahir harus diisi";

/// 建立/編輯使用者的表單狀態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub username: String,
    pub phone: String,
    pub gender: String,
    pub tempat_lahir: String,
    pub birth_date: Option<NaiveDate>,
    pub bank: String,
    pub no_rekening: String,
    pub status: String,
    pub alamat: String,
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用伺服器資料覆蓋整個表單
    pub fn reset(&mut self, user: &User) {
        *self = Self {
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            phone: user.phone.clone(),
            gender: user.gender.clone(),
            tempat_lahir: user.tempat_lahir.clone().unwrap_or_default(),
            birth_date: user.tanggal_lahir.as_deref().and_then(parse_birth_date),
            bank: user.bank.clone().unwrap_or_default(),
            no_rekening: user.no_rekening.clone().unwrap_or_default(),
            status: user.status.clone().unwrap_or_default(),
            alamat: user.alamat.clone().unwrap_or_default(),
        };
    }

    /// 必填欄位檢查，回傳欄位層級的訊息
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if is_blank(&self.name) {
            errors.insert("name", "Name is required");
        }
        if is_blank(&self.email) {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Invalid email");
        }
        if is_blank(&self.username) {
            errors.insert("username", "Username is required");
        }
        if is_blank(&self.phone) {
            errors.insert("phone", "Phone is required");
        }
        if is_blank(&self.gender) {
            errors.insert("gender", "Gender is required");
        }

        errors
    }

    pub fn to_payload(&self) -> Result<UserPayload> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(HrError::FormValidation(errors));
        }

        let birth_date = self
            .birth_date
            .ok_or_else(|| HrError::validation("tanggal_lahir", BIRTH_DATE_REQUIRED))?;

        Ok(UserPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            phone: self.phone.trim().to_string(),
            gender: self.gender.trim().to_string(),
            tempat_lahir: optional(&self.tempat_lahir),
            tanggal_lahir: Some(format_display_date(birth_date)),
            bank: optional(&self.bank),
            no_rekening: optional(&self.no_rekening),
            status: optional(&self.status),
            alamat: optional(&self.alamat),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}
