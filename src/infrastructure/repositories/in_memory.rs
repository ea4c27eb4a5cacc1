use async_trait::async_trait;

use crate::domain::{models::Country, repositories::CountryDirectory};

const COUNTRIES: &[(&str, &str, &str)] = &[
    ("US", "United States", "+1"),
    ("CA", "Canada", "+1"),
    ("GB", "United Kingdom", "+44"),
    ("DE", "Germany", "+49"),
    ("FR", "France", "+33"),
    ("IT", "Italy", "+39"),
    ("ES", "Spain", "+34"),
    ("NL", "Netherlands", "+31"),
    ("PT", "Portugal", "+351"),
    ("PL", "Poland", "+48"),
    ("UA", "Ukraine", "+380"),
    ("RU", "Russia", "+7"),
    ("KZ", "Kazakhstan", "+7"),
    ("TR", "Turkey", "+90"),
    ("IL", "Israel", "+972"),
    ("AE", "United Arab Emirates", "+971"),
    ("SA", "Saudi Arabia", "+966"),
    ("EG", "Egypt", "+20"),
    ("NG", "Nigeria", "+234"),
    ("KE", "Kenya", "+254"),
    ("ZA", "South Africa", "+27"),
    ("IN", "India", "+91"),
    ("PK", "Pakistan", "+92"),
    ("BD", "Bangladesh", "+880"),
    ("ID", "Indonesia", "+62"),
    ("MY", "Malaysia", "+60"),
    ("SG", "Singapore", "+65"),
    ("PH", "Philippines", "+63"),
    ("CN", "China", "+86"),
    ("JP", "Japan", "+81"),
    ("KR", "South Korea", "+82"),
    ("AU", "Australia", "+61"),
    ("NZ", "New Zealand", "+64"),
    ("BR", "Brazil", "+55"),
    ("AR", "Argentina", "+54"),
    ("MX", "Mexico", "+52"),
    ("CO", "Colombia", "+57"),
    ("CL", "Chile", "+56"),
];

/// Fixed country list, used for display only.
#[derive(Default)]
pub struct StaticCountryDirectory;

impl StaticCountryDirectory {
    pub fn new() -> Self {
        Self
    }
}

fn to_country(&(code, name, dial_code): &(&str, &str, &str)) -> Country {
    Country {
        code: code.to_string(),
        name: name.to_string(),
        dial_code: dial_code.to_string(),
    }
}

#[async_trait]
impl CountryDirectory for StaticCountryDirectory {
    async fn list(&self) -> anyhow::Result<Vec<Country>> {
        Ok(COUNTRIES.iter().map(to_country).collect())
    }
}
