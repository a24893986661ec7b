//! City/county → archive code table.
//!
//! Each season archive names its members `<code>_lvr_land_<kind>.csv`; kind
//! `A` is the sales (買賣) table, the only one analyzed here.

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jurisdiction {
    pub name: &'static str,
    pub code: char,
}

pub const JURISDICTIONS: [Jurisdiction; 21] = [
    Jurisdiction { name: "臺北市", code: 'A' },
    Jurisdiction { name: "新北市", code: 'F' },
    Jurisdiction { name: "桃園市", code: 'H' },
    Jurisdiction { name: "臺中市", code: 'B' },
    Jurisdiction { name: "臺南市", code: 'D' },
    Jurisdiction { name: "高雄市", code: 'E' },
    Jurisdiction { name: "基隆市", code: 'C' },
    Jurisdiction { name: "新竹市", code: 'O' },
    Jurisdiction { name: "新竹縣", code: 'J' },
    Jurisdiction { name: "宜蘭縣", code: 'G' },
    Jurisdiction { name: "苗栗縣", code: 'K' },
    Jurisdiction { name: "彰化縣", code: 'N' },
    Jurisdiction { name: "南投縣", code: 'L' },
    Jurisdiction { name: "雲林縣", code: 'P' },
    Jurisdiction { name: "嘉義市", code: 'I' },
    Jurisdiction { name: "嘉義縣", code: 'Q' },
    Jurisdiction { name: "屏東縣", code: 'T' },
    Jurisdiction { name: "花蓮縣", code: 'U' },
    Jurisdiction { name: "臺東縣", code: 'V' },
    Jurisdiction { name: "澎湖縣", code: 'X' },
    Jurisdiction { name: "金門縣", code: 'W' },
];

impl Jurisdiction {
    /// Resolve a city by name (`臺北市`, also `台北市`) or archive code (`A`).
    pub fn lookup(input: &str) -> Result<Self, AppError> {
        let input = input.trim();
        let name = input.replace('台', "臺");

        let mut chars = input.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
            _ => None,
        };

        JURISDICTIONS
            .iter()
            .copied()
            .find(|j| j.name == name || Some(j.code) == code)
            .ok_or_else(|| {
                AppError::input(format!(
                    "Unknown city/county '{input}'. Run `lvr cities` for the list."
                ))
            })
    }

    /// Archive member holding this jurisdiction's sales records.
    pub fn member_name(self) -> String {
        format!("{}_lvr_land_A.csv", self.code)
    }
}
