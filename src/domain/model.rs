use serde::{Deserialize, Deserializer, Serialize};

/// 伺服器回傳的使用者資料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default)]
    pub tempat_lahir: Option<String>,
    #[serde(default)]
    pub tanggal_lahir: Option<String>,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub no_rekening: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub alamat: Option<String>,
}

/// POST/PUT /users 的 body；tanggal_lahir 為 YYYY-MM-DD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub username: String,
    pub phone: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempat_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_rekening: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,
}

/// 收入項目
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pendapatan {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nama_pendapatan: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tipe_pendapatan: i32,
    #[serde(default, deserialize_with = "lenient_nominal")]
    pub nominal: i64,
}

/// 扣款項目
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potongan {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nama_potongan: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tipe_potongan: i32,
    #[serde(default, deserialize_with = "lenient_nominal")]
    pub nominal: i64,
}

/// 單筆合約，日期在傳輸格式 dd/MM/yyyy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kontrak {
    #[serde(default, deserialize_with = "null_as_default")]
    pub masa_berlaku_start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub masa_berlaku_end: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub golongan_pajak: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpjs: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posisi: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuti_pertahun: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jenis_kontrak: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minim_jam: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pendapatans: Option<Vec<Pendapatan>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potongans: Option<Vec<Potongan>>,
}

/// /kontrak 的請求與回應結構
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContracts {
    pub user_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kontraks: Vec<Kontrak>,
}

impl User {
    /// 伺服器未回傳使用者時，以送出的資料組回
    pub fn from_payload(id: Option<u64>, payload: &UserPayload) -> Self {
        Self {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
            username: payload.username.clone(),
            phone: payload.phone.clone(),
            gender: payload.gender.clone(),
            tempat_lahir: payload.tempat_lahir.clone(),
            tanggal_lahir: payload.tanggal_lahir.clone(),
            bank: payload.bank.clone(),
            no_rekening: payload.no_rekening.clone(),
            status: payload.status.clone(),
            alamat: payload.alamat.clone(),
        }
    }
}

impl UserContracts {
    pub fn has_contracts(&self) -> bool {
        !self.kontraks.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// nominal 可能是整數、浮點數或數字字串（例如 "1500000.00"）
fn lenient_nominal<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(0),
        Some(serde_json::Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                n.as_f64()
                    .map(|f| f.round() as i64)
                    .ok_or_else(|| D::Error::custom(format!("invalid nominal: {}", n)))
            }
        }
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed
                .parse::<i64>()
                .or_else(|_| trimmed.parse::<f64>().map(|f| f.round() as i64))
                .map_err(|_| D::Error::custom(format!("invalid nominal: {:?}", s)))
        }
        Some(other) => Err(D::Error::custom(format!("invalid nominal: {}", other))),
    }
}
