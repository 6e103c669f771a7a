//! TOML documents read by the CLI for `users create`, `users edit` and
//! `contracts edit`. Dates are written as `yyyy-MM-dd`.

use crate::core::contract_editor::{ContractEditor, ContractField, LineItemField};
use crate::core::dates::parse_display_date;
use crate::core::user_form::UserForm;
use crate::domain::codes::{
    cuti_options, BANKS, BPJS, GENDERS, MARITAL_STATUSES, MAX_CUTI_PERTAHUN,
};
use crate::utils::error::{HrError, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

fn from_toml_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = std::fs::read_to_string(&path)?;
    from_toml_str(&content)
}

fn from_toml_str<T: DeserializeOwned>(content: &str) -> Result<T> {
    toml::from_str(content).map_err(|e| HrError::TomlParseError {
        message: e.to_string(),
    })
}

fn parse_date_field(field: &str, value: &str) -> Result<NaiveDate> {
    parse_display_date(value).ok_or_else(|| {
        HrError::validation(
            field,
            format!("{} must be a date in YYYY-MM-DD form, got {:?}", field, value),
        )
    })
}

/// 下拉選單欄位只接受表中的值；空白代表清除
fn check_choice(field: &str, value: &Option<String>, allowed: &[&str]) -> Result<()> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(()),
        Some(text) if allowed.contains(&text) => Ok(()),
        Some(text) => Err(HrError::validation(
            field,
            format!("{} must be one of {}, got {:?}", field, allowed.join(", "), text),
        )),
    }
}

/// 使用者資料；每個欄位都可省略，只覆蓋有寫的部分
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDocument {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub tempat_lahir: Option<String>,
    pub tanggal_lahir: Option<String>,
    pub bank: Option<String>,
    pub no_rekening: Option<String>,
    pub status: Option<String>,
    pub alamat: Option<String>,
}

impl UserDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        from_toml_file(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        from_toml_str(content)
    }

    pub fn apply_to(&self, form: &mut UserForm) -> Result<()> {
        check_choice("gender", &self.gender, GENDERS)?;
        check_choice("bank", &self.bank, BANKS)?;
        check_choice("status", &self.status, MARITAL_STATUSES)?;

        let text_fields = [
            (&self.name, &mut form.name),
            (&self.email, &mut form.email),
            (&self.username, &mut form.username),
            (&self.phone, &mut form.phone),
            (&self.gender, &mut form.gender),
            (&self.tempat_lahir, &mut form.tempat_lahir),
            (&self.bank, &mut form.bank),
            (&self.no_rekening, &mut form.no_rekening),
            (&self.status, &mut form.status),
            (&self.alamat, &mut form.alamat),
        ];
        for (value, target) in text_fields {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        if let Some(date) = &self.tanggal_lahir {
            form.birth_date = if date.trim().is_empty() {
                None
            } else {
                Some(parse_date_field("tanggal_lahir", date)?)
            };
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItemDocument {
    #[serde(default)]
    pub nama: i32,
    #[serde(default)]
    pub tipe: i32,
    #[serde(default)]
    pub nominal: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractDocument {
    pub masa_berlaku_start: Option<String>,
    pub masa_berlaku_end: Option<String>,
    #[serde(default)]
    pub golongan_pajak: i32,
    #[serde(default)]
    pub bpjs: Vec<i32>,
    #[serde(default)]
    pub posisi: i32,
    #[serde(default)]
    pub cuti_pertahun: i32,
    #[serde(default)]
    pub jenis_kontrak: i32,
    #[serde(default)]
    pub minim_jam: i32,
    #[serde(default)]
    pub catatan: String,
    #[serde(default)]
    pub pendapatans: Vec<LineItemDocument>,
    #[serde(default)]
    pub potongans: Vec<LineItemDocument>,
}

impl ContractDocument {
    fn optional_date(field: &str, value: &Option<String>) -> Result<Option<NaiveDate>> {
        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_date_field(field, text).map(Some),
        }
    }

    /// 透過編輯器的列操作加入一筆合約
    fn append_to(&self, editor: &mut ContractEditor) -> Result<()> {
        let start = Self::optional_date("masa_berlaku_start", &self.masa_berlaku_start)?;
        let end = Self::optional_date("masa_berlaku_end", &self.masa_berlaku_end)?;
        if let Some(code) = self.bpjs.iter().find(|code| !BPJS.contains(**code)) {
            return Err(HrError::validation("bpjs", format!("Unknown BPJS code {}", code)));
        }
        if !cuti_options().any(|days| days == self.cuti_pertahun) {
            return Err(HrError::validation(
                "cuti_pertahun",
                format!(
                    "cuti_pertahun must be between 0 and {}, got {}",
                    MAX_CUTI_PERTAHUN, self.cuti_pertahun
                ),
            ));
        }

        let i = editor.add_contract();
        let fields = [
            ContractField::Start(start),
            ContractField::End(end),
            ContractField::GolonganPajak(self.golongan_pajak),
            ContractField::Posisi(self.posisi),
            ContractField::CutiPertahun(self.cuti_pertahun),
            ContractField::JenisKontrak(self.jenis_kontrak),
            ContractField::MinimJam(self.minim_jam),
            ContractField::Catatan(self.catatan.clone()),
        ];
        for field in fields {
            editor.set_field(i, field)?;
        }
        for code in &self.bpjs {
            editor.set_bpjs(i, *code, true)?;
        }
        for item in &self.pendapatans {
            let row = editor.add_pendapatan(i)?;
            editor.update_pendapatan(i, row, LineItemField::Nama(item.nama))?;
            editor.update_pendapatan(i, row, LineItemField::Tipe(item.tipe))?;
            editor.update_pendapatan(i, row, LineItemField::Nominal(item.nominal))?;
        }
        for item in &self.potongans {
            let row = editor.add_potongan(i)?;
            editor.update_potongan(i, row, LineItemField::Nama(item.nama))?;
            editor.update_potongan(i, row, LineItemField::Tipe(item.tipe))?;
            editor.update_potongan(i, row, LineItemField::Nominal(item.nominal))?;
        }
        Ok(())
    }
}

/// 取代編輯器中全部合約；任一筆日期格式錯誤時編輯器保持原狀
pub fn replace_contracts(editor: &mut ContractEditor, docs: &[ContractDocument]) -> Result<()> {
    let mut staged = ContractEditor::new(editor.user_id());
    for doc in docs {
        doc.append_to(&mut staged)?;
    }

    editor.clear();
    for doc in docs {
        doc.append_to(editor)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractsDocument {
    #[serde(default)]
    pub kontraks: Vec<ContractDocument>,
}

impl ContractsDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        from_toml_file(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        from_toml_str(content)
    }

    pub fn apply_to(&self, editor: &mut ContractEditor) -> Result<()> {
        replace_contracts(editor, &self.kontraks)
    }
}

/// `users edit` 的輸入：個人資料與（可選的）整組合約
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditDocument {
    pub profile: Option<UserDocument>,
    pub kontraks: Option<Vec<ContractDocument>>,
}

impl EditDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        from_toml_file(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        from_toml_str(content)
    }

    pub fn apply_to(&self, form: &mut UserForm, editor: &mut ContractEditor) -> Result<()> {
        if let Some(profile) = &self.profile {
            profile.apply_to(form)?;
        }
        if let Some(kontraks) = &self.kontraks {
            replace_contracts(editor, kontraks)?;
        }
        Ok(())
    }
}

/// 由後往前刪除，前面的編號才不會位移；重複的編號只刪一次
fn descending_unique(refs: &[RowRef]) -> Vec<RowRef> {
    let mut refs = refs.to_vec();
    refs.sort_by(|a, b| (b.contract, b.row).cmp(&(a.contract, a.row)));
    refs.dedup();
    refs
}

/// Removes the given income and deduction rows (numbered from 1).
pub fn remove_rows(
    editor: &mut ContractEditor,
    pendapatan: &[RowRef],
    potongan: &[RowRef],
) -> Result<()> {
    for r in descending_unique(pendapatan) {
        editor.remove_pendapatan(r.contract - 1, r.row - 1)?;
    }
    for r in descending_unique(potongan) {
        editor.remove_potongan(r.contract - 1, r.row - 1)?;
    }
    Ok(())
}

/// `C:NAMA:TIPE:NOMINAL`, contract number counted from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemArg {
    pub contract: usize,
    pub nama: i32,
    pub tipe: i32,
    pub nominal: i64,
}

impl FromStr for LineItemArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected C:NAMA:TIPE:NOMINAL, got {:?}", s));
        }
        Ok(Self {
            contract: parse_position(parts[0])?,
            nama: parts[1]
                .parse()
                .map_err(|_| format!("invalid nama code {:?}", parts[1]))?,
            tipe: parts[2]
                .parse()
                .map_err(|_| format!("invalid tipe code {:?}", parts[2]))?,
            nominal: parts[3]
                .replace('.', "")
                .parse()
                .map_err(|_| format!("invalid nominal {:?}", parts[3]))?,
        })
    }
}

/// `C:R`, contract and row numbers counted from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    pub contract: usize,
    pub row: usize,
}

impl FromStr for RowRef {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (contract, row) = s
            .split_once(':')
            .ok_or_else(|| format!("expected C:R, got {:?}", s))?;
        Ok(Self {
            contract: parse_position(contract.trim())?,
            row: parse_position(row.trim())?,
        })
    }
}

fn parse_position(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("positions start at 1, got {:?}", value)),
    }
}
