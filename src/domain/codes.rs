//! Option tables for the select boxes and checkboxes on the user and
//! contract forms. Codes are what travels on the wire; labels are for display.

/// A fixed code -> label table.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    pub name: &'static str,
    pub entries: &'static [(i32, &'static str)],
}

impl CodeTable {
    pub fn label(&self, code: i32) -> String {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| format!("#{}", code))
    }

    pub fn contains(&self, code: i32) -> bool {
        self.entries.iter().any(|(c, _)| *c == code)
    }
}

pub const GENDERS: &[&str] = &["Male", "Female"];
pub const BANKS: &[&str] = &["BRI", "BCA", "BNI", "Mandiri"];
pub const MARITAL_STATUSES: &[&str] = &["Married", "Single"];

pub const BPJS: CodeTable = CodeTable {
    name: "BPJS",
    entries: &[(1, "Ketenagakerjaan"), (2, "Kesehatan"), (3, "Askes")],
};

pub const GOLONGAN_PAJAK: CodeTable = CodeTable {
    name: "Golongan Pajak",
    entries: &[
        (0, "Kawin/0"),
        (1, "Tidak Kawin/1"),
        (2, "Tokoh/2"),
        (3, "Golongan 3"),
        (5, "Golongan 5"),
    ],
};

pub const POSISI: CodeTable = CodeTable {
    name: "Posisi",
    entries: &[
        (1, "Fullstack Developer"),
        (2, "Frontend Developer"),
        (3, "Backend Developer"),
        (4, "Wordpress Developer"),
    ],
};

pub const JENIS_KONTRAK: CodeTable = CodeTable {
    name: "Jenis Kontrak",
    entries: &[
        (1, "Karyawan Tetap"),
        (2, "Probation"),
        (3, "Kontrak"),
        (4, "Magang"),
    ],
};

pub const NAMA_PENDAPATAN: CodeTable = CodeTable {
    name: "Nama Pendapatan",
    entries: &[(1, "Gaji Pokok"), (2, "Investasi"), (3, "Warisan")],
};

pub const NAMA_POTONGAN: CodeTable = CodeTable {
    name: "Nama Potongan",
    entries: &[(1, "BPJS TK"), (2, "BPJS Kesehatan"), (3, "Meal")],
};

/// Shared by tipe_pendapatan and tipe_potongan.
pub const TIPE_LINE_ITEM: CodeTable = CodeTable {
    name: "Tipe",
    entries: &[(1, "Tipe A"), (2, "Tipe B"), (3, "Tipe C"), (4, "Tipe D")],
};

pub const MAX_CUTI_PERTAHUN: i32 = 14;

pub fn cuti_options() -> impl Iterator<Item = i32> {
    0..=MAX_CUTI_PERTAHUN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_unknown_codes() {
        assert_eq!(BPJS.label(2), "Kesehatan");
        assert_eq!(GOLONGAN_PAJAK.label(5), "Golongan 5");
        assert_eq!(GOLONGAN_PAJAK.label(4), "#4");
        assert!(!POSISI.contains(0));
        assert_eq!(cuti_options().count(), 15);
    }
}
