//! Editing state for a user's contracts: a list of contracts, each carrying
//! its own list of income (pendapatan) and deduction (potongan) rows.
//!
//! Dates are kept as calendar dates while editing and only turned into the
//! `dd/MM/yyyy` wire form when the payload is built.

use crate::core::contract_store::ContractStore;
use crate::core::dates::{format_wire_date, parse_wire_date};
use crate::domain::model::{Kontrak, Pendapatan, Potongan, UserContracts};
use crate::domain::ports::ContractApi;
use crate::utils::error::{HrError, Result};
use chrono::NaiveDate;

pub const NO_CONTRACTS: &str = "At least one contract is required.";
pub const CONTRACT_VALIDATION_FAILED: &str = "Contract form validation failed.";

/// 編輯中的單筆合約
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractDraft {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub golongan_pajak: i32,
    pub bpjs: Vec<i32>,
    pub posisi: i32,
    pub cuti_pertahun: i32,
    pub jenis_kontrak: i32,
    pub minim_jam: i32,
    pub catatan: String,
    pub pendapatans: Vec<Pendapatan>,
    pub potongans: Vec<Potongan>,
}

impl ContractDraft {
    /// 無效或空白的日期變成未填
    pub fn from_wire(kontrak: &Kontrak) -> Self {
        Self {
            start: parse_wire_date(&kontrak.masa_berlaku_start),
            end: parse_wire_date(&kontrak.masa_berlaku_end),
            golongan_pajak: kontrak.golongan_pajak,
            bpjs: kontrak.bpjs.clone().unwrap_or_default(),
            posisi: kontrak.posisi.unwrap_or(0),
            cuti_pertahun: kontrak.cuti_pertahun.unwrap_or(0),
            jenis_kontrak: kontrak.jenis_kontrak.unwrap_or(0),
            minim_jam: kontrak.minim_jam.unwrap_or(0),
            catatan: kontrak.catatan.clone().unwrap_or_default(),
            pendapatans: kontrak.pendapatans.clone().unwrap_or_default(),
            potongans: kontrak.potongans.clone().unwrap_or_default(),
        }
    }

    pub fn to_wire(&self) -> Kontrak {
        Kontrak {
            masa_berlaku_start: self.start.map(format_wire_date).unwrap_or_default(),
            masa_berlaku_end: self.end.map(format_wire_date).unwrap_or_default(),
            golongan_pajak: self.golongan_pajak,
            bpjs: Some(self.bpjs.clone()),
            posisi: Some(self.posisi),
            cuti_pertahun: Some(self.cuti_pertahun),
            jenis_kontrak: Some(self.jenis_kontrak),
            minim_jam: Some(self.minim_jam),
            catatan: Some(self.catatan.clone()),
            pendapatans: Some(self.pendapatans.clone()),
            potongans: Some(self.potongans.clone()),
        }
    }

    /// Total Pendapatan Kotor
    pub fn total_pendapatan(&self) -> i64 {
        self.pendapatans.iter().map(|p| p.nominal).sum()
    }

    /// Total Pengurangan
    pub fn total_potongan(&self) -> i64 {
        self.potongans.iter().map(|p| p.nominal).sum()
    }

    fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContractField {
    Start(Option<NaiveDate>),
    End(Option<NaiveDate>),
    GolonganPajak(i32),
    Posisi(i32),
    CutiPertahun(i32),
    JenisKontrak(i32),
    MinimJam(i32),
    Catatan(String),
}

/// Field of an income or deduction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemField {
    Nama(i32),
    Tipe(i32),
    Nominal(i64),
}

#[derive(Debug, Clone, Default)]
pub struct ContractEditor {
    user_id: u64,
    kontraks: Vec<ContractDraft>,
    error_message: Option<String>,
    is_submitting: bool,
}

impl ContractEditor {
    pub fn new(user_id: u64) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn kontraks(&self) -> &[ContractDraft] {
        &self.kontraks
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn total_pendapatan(&self, index: usize) -> Option<i64> {
        self.kontraks.get(index).map(ContractDraft::total_pendapatan)
    }

    pub fn total_potongan(&self, index: usize) -> Option<i64> {
        self.kontraks.get(index).map(ContractDraft::total_potongan)
    }

    /// 先清掉舊的選取，再抓這個使用者的合約
    pub async fn load<A: ContractApi>(&mut self, store: &mut ContractStore<A>) {
        store.clear_selected_contract();
        store.get_contract_by_user_id(self.user_id).await;
        self.sync_from_selected(store.selected_contract());
    }

    pub fn sync_from_selected(&mut self, selected: Option<&UserContracts>) {
        self.kontraks = selected
            .map(|c| c.kontraks.iter().map(ContractDraft::from_wire).collect())
            .unwrap_or_default();
    }

    pub fn clear(&mut self) {
        self.kontraks.clear();
    }

    pub fn add_contract(&mut self) -> usize {
        self.kontraks.push(ContractDraft::default());
        self.kontraks.len() - 1
    }

    pub fn remove_contract(&mut self, index: usize) -> Result<ContractDraft> {
        self.check_contract(index)?;
        Ok(self.kontraks.remove(index))
    }

    pub fn set_field(&mut self, index: usize, field: ContractField) -> Result<()> {
        let draft = self.draft_mut(index)?;
        match field {
            ContractField::Start(date) => draft.start = date,
            ContractField::End(date) => draft.end = date,
            ContractField::GolonganPajak(code) => draft.golongan_pajak = code,
            ContractField::Posisi(code) => draft.posisi = code,
            ContractField::CutiPertahun(days) => draft.cuti_pertahun = days,
            ContractField::JenisKontrak(code) => draft.jenis_kontrak = code,
            ContractField::MinimJam(hours) => draft.minim_jam = hours,
            ContractField::Catatan(text) => draft.catatan = text,
        }
        Ok(())
    }

    /// 勾選時加入（不重複），取消時移除
    pub fn set_bpjs(&mut self, index: usize, code: i32, checked: bool) -> Result<()> {
        let draft = self.draft_mut(index)?;
        if checked {
            if !draft.bpjs.contains(&code) {
                draft.bpjs.push(code);
            }
        } else {
            draft.bpjs.retain(|c| *c != code);
        }
        Ok(())
    }

    pub fn add_pendapatan(&mut self, index: usize) -> Result<usize> {
        let draft = self.draft_mut(index)?;
        draft.pendapatans.push(Pendapatan::default());
        Ok(draft.pendapatans.len() - 1)
    }

    pub fn remove_pendapatan(&mut self, index: usize, row: usize) -> Result<Pendapatan> {
        let draft = self.draft_mut(index)?;
        check_row("pendapatans", index, row, draft.pendapatans.len())?;
        Ok(draft.pendapatans.remove(row))
    }

    pub fn update_pendapatan(
        &mut self,
        index: usize,
        row: usize,
        field: LineItemField,
    ) -> Result<()> {
        let draft = self.draft_mut(index)?;
        check_row("pendapatans", index, row, draft.pendapatans.len())?;
        let item = &mut draft.pendapatans[row];
        match field {
            LineItemField::Nama(code) => item.nama_pendapatan = code,
            LineItemField::Tipe(code) => item.tipe_pendapatan = code,
            LineItemField::Nominal(amount) => item.nominal = amount,
        }
        Ok(())
    }

    pub fn add_potongan(&mut self, index: usize) -> Result<usize> {
        let draft = self.draft_mut(index)?;
        draft.potongans.push(Potongan::default());
        Ok(draft.potongans.len() - 1)
    }

    pub fn remove_potongan(&mut self, index: usize, row: usize) -> Result<Potongan> {
        let draft = self.draft_mut(index)?;
        check_row("potongans", index, row, draft.potongans.len())?;
        Ok(draft.potongans.remove(row))
    }

    pub fn update_potongan(
        &mut self,
        index: usize,
        row: usize,
        field: LineItemField,
    ) -> Result<()> {
        let draft = self.draft_mut(index)?;
        check_row("potongans", index, row, draft.potongans.len())?;
        let item = &mut draft.potongans[row];
        match field {
            LineItemField::Nama(code) => item.nama_potongan = code,
            LineItemField::Tipe(code) => item.tipe_potongan = code,
            LineItemField::Nominal(amount) => item.nominal = amount,
        }
        Ok(())
    }

    pub fn to_payload(&self) -> UserContracts {
        UserContracts {
            user_id: self.user_id,
            kontraks: self.kontraks.iter().map(ContractDraft::to_wire).collect(),
        }
    }

    /// Validates and saves every contract, then reloads them from the server.
    ///
    /// Any failure is recorded in `error_message` and returned, so the edit
    /// page can stop before updating the user profile.
    pub async fn submit_contracts<A: ContractApi>(
        &mut self,
        store: &mut ContractStore<A>,
    ) -> Result<()> {
        self.error_message = None;
        self.is_submitting = true;

        let result = self.save(store).await;

        self.is_submitting = false;
        if let Err(e) = &result {
            tracing::warn!("Saving contracts of user {} failed: {}", self.user_id, e);
            if self.error_message.is_none() {
                self.error_message = Some(e.to_string());
            }
        }
        result
    }

    async fn save<A: ContractApi>(&mut self, store: &mut ContractStore<A>) -> Result<()> {
        if self.kontraks.is_empty() {
            self.error_message = Some(NO_CONTRACTS.to_string());
            return Err(HrError::validation("kontraks", NO_CONTRACTS));
        }

        if let Some(position) = self.kontraks.iter().position(|k| !k.is_complete()) {
            self.error_message = Some(format!(
                "Please fill in all required fields for Contract #{}.",
                position + 1
            ));
            return Err(HrError::validation("kontraks", CONTRACT_VALIDATION_FAILED));
        }

        let payload = self.to_payload();
        let has_existing = store
            .selected_contract()
            .map(UserContracts::has_contracts)
            .unwrap_or(false);

        if has_existing {
            store.update_contract(self.user_id, &payload).await?;
        } else {
            store.create_contract(&payload).await?;
        }

        store.get_contract_by_user_id(self.user_id).await;
        // 重新載入失敗時保留目前的編輯內容
        if store.error().is_none() {
            self.sync_from_selected(store.selected_contract());
        }
        Ok(())
    }

    fn check_contract(&self, index: usize) -> Result<()> {
        if index >= self.kontraks.len() {
            return Err(HrError::validation(
                "kontraks",
                format!("Contract #{} does not exist", index + 1),
            ));
        }
        Ok(())
    }

    fn draft_mut(&mut self, index: usize) -> Result<&mut ContractDraft> {
        self.check_contract(index)?;
        Ok(&mut self.kontraks[index])
    }
}

fn check_row(list: &str, index: usize, row: usize, len: usize) -> Result<()> {
    if row >= len {
        return Err(HrError::validation(
            list,
            format!("Row {} does not exist in Contract #{}", row + 1, index + 1),
        ));
    }
    Ok(())
}
