use crate::core::contract_editor::ContractDraft;
use crate::core::currency::format_rupiah;
use crate::core::dates::format_display_date;
use crate::domain::codes::{
    CodeTable, BPJS, GOLONGAN_PAJAK, JENIS_KONTRAK, NAMA_PENDAPATAN, NAMA_POTONGAN, POSISI,
    TIPE_LINE_ITEM,
};
use crate::domain::model::{User, UserContracts};
use crate::utils::error::Result;

/// 純文字表格，欄寬依內容自動調整
fn table(headers: &[&str], rows: &[Vec<String>], footer: Option<&[String]>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows.iter().map(Vec::as_slice).chain(footer) {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = *w)
            })
            .collect();
        padded.join(" | ").trim_end().to_string()
    };
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = vec![line(header_cells.as_slice()), separator.clone()];
    out.extend(rows.iter().map(|r| line(r.as_slice())));
    if let Some(footer) = footer {
        out.push(separator);
        out.push(line(footer));
    }
    out.join("\n")
}

pub fn render_user_table(users: &[User]) -> String {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                u.id.map(|id| id.to_string()).unwrap_or_default(),
                u.name.clone(),
                u.email.clone(),
                u.username.clone(),
                u.phone.clone(),
            ]
        })
        .collect();
    table(&["No", "Name", "Email", "Username", "Phone"], &rows, None)
}

pub fn users_to_csv(users: &[User]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "name", "email", "username", "phone", "gender"])?;
    for u in users {
        writer.write_record([
            u.id.map(|id| id.to_string()).unwrap_or_default(),
            u.name.clone(),
            u.email.clone(),
            u.username.clone(),
            u.phone.clone(),
            u.gender.clone(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn users_to_json(users: &[User]) -> Result<String> {
    Ok(serde_json::to_string_pretty(users)?)
}

pub fn render_user_detail(user: &User) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let fields = [
        ("Name", user.name.clone()),
        ("Email", user.email.clone()),
        ("Username", user.username.clone()),
        ("Phone", user.phone.clone()),
        ("Gender", user.gender.clone()),
        ("Tempat Lahir", opt(&user.tempat_lahir)),
        ("Tanggal Lahir", opt(&user.tanggal_lahir)),
        ("Bank", opt(&user.bank)),
        ("No. Rekening", opt(&user.no_rekening)),
        ("Status", opt(&user.status)),
        ("Alamat", opt(&user.alamat)),
    ];

    let mut out = vec![format!("Data User {}", user.name)];
    out.extend(fields.iter().map(|(label, value)| format!("  {:<14} {}", label, value)));
    out.join("\n")
}

fn line_item_table<T>(
    items: &[T],
    nama: CodeTable,
    row: impl Fn(&T) -> (i32, i32, i64),
    total_label: &str,
    total: i64,
) -> String {
    let rows: Vec<Vec<String>> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (n, t, nominal) = row(item);
            vec![
                (i + 1).to_string(),
                nama.label(n),
                TIPE_LINE_ITEM.label(t),
                format_rupiah(nominal),
            ]
        })
        .collect();
    let footer = vec![
        String::new(),
        total_label.to_string(),
        String::new(),
        format_rupiah(total),
    ];
    table(&["#", nama.name, "Tipe", "Nominal"], &rows, Some(footer.as_slice()))
}

pub fn render_contract(index: usize, draft: &ContractDraft) -> String {
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(format_display_date).unwrap_or_else(|| "-".to_string())
    };
    let bpjs = if draft.bpjs.is_empty() {
        "-".to_string()
    } else {
        draft
            .bpjs
            .iter()
            .map(|c| BPJS.label(*c))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = vec![
        format!("Kontrak #{}", index + 1),
        format!("  Masa Berlaku    {} s/d {}", date(draft.start), date(draft.end)),
        format!("  Golongan Pajak  {}", GOLONGAN_PAJAK.label(draft.golongan_pajak)),
        format!("  Golongan BPJS   {}", bpjs),
        format!("  Posisi          {}", POSISI.label(draft.posisi)),
        format!("  Cuti Pertahun   {}", draft.cuti_pertahun),
        format!("  Jenis Kontrak   {}", JENIS_KONTRAK.label(draft.jenis_kontrak)),
        format!("  Minim Jam       {}", draft.minim_jam),
    ];
    if !draft.catatan.trim().is_empty() {
        out.push(format!("  Catatan         {}", draft.catatan));
    }

    out.push(String::new());
    out.push(line_item_table(
        &draft.pendapatans,
        NAMA_PENDAPATAN,
        |p| (p.nama_pendapatan, p.tipe_pendapatan, p.nominal),
        "Total Pendapatan Kotor",
        draft.total_pendapatan(),
    ));
    out.push(String::new());
    out.push(line_item_table(
        &draft.potongans,
        NAMA_POTONGAN,
        |p| (p.nama_potongan, p.tipe_potongan, p.nominal),
        "Total Pengurangan",
        draft.total_potongan(),
    ));
    out.join("\n")
}

pub fn render_contracts(drafts: &[ContractDraft]) -> String {
    if drafts.is_empty() {
        return "Belum ada kontrak".to_string();
    }
    drafts
        .iter()
        .enumerate()
        .map(|(i, d)| render_contract(i, d))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_contract_summary(list: &[UserContracts]) -> String {
    let rows: Vec<Vec<String>> = list
        .iter()
        .map(|entry| {
            let drafts: Vec<ContractDraft> =
                entry.kontraks.iter().map(ContractDraft::from_wire).collect();
            let pendapatan: i64 = drafts.iter().map(ContractDraft::total_pendapatan).sum();
            let potongan: i64 = drafts.iter().map(ContractDraft::total_potongan).sum();
            vec![
                entry.user_id.to_string(),
                drafts.len().to_string(),
                format_rupiah(pendapatan),
                format_rupiah(potongan),
            ]
        })
        .collect();
    table(
        &["User ID", "Kontrak", "Total Pendapatan", "Total Potongan"],
        &rows,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Pendapatan, Potongan};
    use chrono::NaiveDate;

    fn user(id: u64, name: &str) -> User {
        User {
            id: Some(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            username: name.to_lowercase(),
            phone: "0812".to_string(),
            gender: "Male".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_user_table_has_expected_columns() {
        let out = render_user_table(&[user(1, "Andi"), user(12, "Bambang")]);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("No | Name"));
        assert!(lines[0].contains("Username | Phone"));
        assert!(lines[2].starts_with("1  | Andi"));
        assert!(lines[3].contains("bambang@example.com"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_users_to_csv() {
        let csv = users_to_csv(&[user(3, "Citra")]).unwrap();
        assert_eq!(
            csv,
            "id,name,email,username,phone,gender\n3,Citra,citra@example.com,citra,0812,Male\n"
        );
    }

    #[test]
    fn test_contract_render_shows_labels_and_totals() {
        let draft = ContractDraft {
            start: NaiveDate::from_ymd_opt(2024, 1, 1),
            end: NaiveDate::from_ymd_opt(2024, 12, 31),
            golongan_pajak: 1,
            bpjs: vec![1, 3],
            posisi: 3,
            pendapatans: vec![
                Pendapatan {
                    nama_pendapatan: 1,
                    tipe_pendapatan: 1,
                    nominal: 7_000_000,
                },
                Pendapatan {
                    nama_pendapatan: 2,
                    tipe_pendapatan: 2,
                    nominal: 1_000_000,
                },
            ],
            potongans: vec![Potongan {
                nama_potongan: 2,
                tipe_potongan: 4,
                nominal: 150_000,
            }],
            ..Default::default()
        };

        let out = render_contract(0, &draft);
        assert!(out.contains("Kontrak #1"));
        assert!(out.contains("2024-01-01 s/d 2024-12-31"));
        assert!(out.contains("Tidak Kawin/1"));
        assert!(out.contains("Ketenagakerjaan, Askes"));
        assert!(out.contains("Backend Developer"));
        assert!(out.contains("Gaji Pokok"));
        assert!(out.contains("Total Pendapatan Kotor"));
        assert!(out.contains("Rp 8.000.000"));
        assert!(out.contains("BPJS Kesehatan"));
        assert!(out.contains("Tipe D"));
        assert!(out.contains("Total Pengurangan"));
        assert!(out.contains("Rp 150.000"));
    }

    #[test]
    fn test_empty_contract_list() {
        assert_eq!(render_contracts(&[]), "Belum ada kontrak");
    }
}
