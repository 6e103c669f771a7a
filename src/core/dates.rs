use chrono::{DateTime, NaiveDate};

/// 合約日期的傳輸格式
pub const WIRE_DATE_FORMAT: &str = "%d/%m/%Y";
/// 畫面/輸入檔使用的格式，也是生日的傳輸格式
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT).ok()
}

pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

pub fn parse_display_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DISPLAY_DATE_FORMAT).ok()
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// 生日可能是 `YYYY-MM-DD` 或完整的 RFC 3339 時間戳；
/// 時間戳只取日曆日期，不做時區換算
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Some(date) = parse_display_date(value) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DISPLAY_DATE_FORMAT).ok())
}
