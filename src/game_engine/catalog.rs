//! Static country catalog for the flag and map quizzes.
//!
//! Tiers grade how recognisable a country is: 1 is the easiest, 3 the
//! hardest. Map questions can only be asked about countries listed in
//! [`MAP_ASSETS`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_engine::difficulty::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Continent {
    Americas,
    Europe,
    Asia,
    Africa,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 5] = [
        Continent::Americas,
        Continent::Europe,
        Continent::Asia,
        Continent::Africa,
        Continent::Oceania,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Continent::Americas => "AMERICAS",
            Continent::Europe   => "EUROPE",
            Continent::Asia     => "ASIA",
            Continent::Africa   => "AFRICA",
            Continent::Oceania  => "OCEANIA",
        }
    }

    pub fn parse(s: &str) -> Option<Continent> {
        let s = s.trim();
        Continent::ALL.into_iter().find(|c| c.tag().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2.
    pub code: &'static str,
    pub name: &'static str,
    pub continent: Continent,
    pub tier: u8,
}

impl Country {
    pub fn display_name(&self) -> &'static str {
        self.name
    }

    /// Flag emoji built from the two regional indicator symbols of the code.
    pub fn flag_emoji(&self) -> String {
        flag_emoji(self.code)
    }

    pub fn map_asset(&self) -> Option<&'static str> {
        map_asset(self.code)
    }

    pub fn in_region(&self, region: Option<Region>) -> bool {
        match region {
            Some(Region::Continent(c)) => self.continent == c,
            Some(Region::World) | None => true,
        }
    }
}

const fn country(code: &'static str, name: &'static str, continent: Continent, tier: u8) -> Country {
    Country { code, name, continent, tier }
}

pub fn flag_emoji(code: &str) -> String {
    code.trim()
        .chars()
        .filter(char::is_ascii_alphabetic)
        .filter_map(|c| char::from_u32(0x1F1E6 + (c.to_ascii_uppercase() as u32 - 'A' as u32)))
        .collect()
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

pub static COUNTRIES: &[Country] = &[
    // Americas
    country("BR", "Brazil", Continent::Americas, 1),
    country("AR", "Argentina", Continent::Americas, 1),
    country("UY", "Uruguay", Continent::Americas, 2),
    country("PY", "Paraguay", Continent::Americas, 2),
    country("CL", "Chile", Continent::Americas, 1),
    country("BO", "Bolivia", Continent::Americas, 2),
    country("PE", "Peru", Continent::Americas, 2),
    country("EC", "Ecuador", Continent::Americas, 2),
    country("CO", "Colombia", Continent::Americas, 1),
    country("VE", "Venezuela", Continent::Americas, 2),
    country("GY", "Guyana", Continent::Americas, 3),
    country("SR", "Suriname", Continent::Americas, 3),
    country("US", "United States", Continent::Americas, 1),
    country("CA", "Canada", Continent::Americas, 1),
    country("MX", "Mexico", Continent::Americas, 1),
    country("GT", "Guatemala", Continent::Americas, 2),
    country("BZ", "Belize", Continent::Americas, 3),
    country("SV", "El Salvador", Continent::Americas, 2),
    country("HN", "Honduras", Continent::Americas, 2),
    country("NI", "Nicaragua", Continent::Americas, 2),
    country("CR", "Costa Rica", Continent::Americas, 2),
    country("PA", "Panama", Continent::Americas, 2),
    country("CU", "Cuba", Continent::Americas, 1),
    country("JM", "Jamaica", Continent::Americas, 1),
    country("HT", "Haiti", Continent::Americas, 3),
    country("DO", "Dominican Republic", Continent::Americas, 2),
    country("BS", "Bahamas", Continent::Americas, 3),
    country("BB", "Barbados", Continent::Americas, 3),
    country("TT", "Trinidad and Tobago", Continent::Americas, 3),
    country("LC", "Saint Lucia", Continent::Americas, 3),
    country("GD", "Grenada", Continent::Americas, 3),
    country("AG", "Antigua and Barbuda", Continent::Americas, 3),
    country("DM", "Dominica", Continent::Americas, 3),
    country("KN", "Saint Kitts and Nevis", Continent::Americas, 3),
    country("VC", "Saint Vincent and the Grenadines", Continent::Americas, 3),

    // Europe
    country("PT", "Portugal", Continent::Europe, 1),
    country("ES", "Spain", Continent::Europe, 1),
    country("FR", "France", Continent::Europe, 1),
    country("DE", "Germany", Continent::Europe, 1),
    country("IT", "Italy", Continent::Europe, 1),
    country("GB", "United Kingdom", Continent::Europe, 1),
    country("IE", "Ireland", Continent::Europe, 1),
    country("NL", "Netherlands", Continent::Europe, 1),
    country("BE", "Belgium", Continent::Europe, 1),
    country("LU", "Luxembourg", Continent::Europe, 2),
    country("CH", "Switzerland", Continent::Europe, 1),
    country("AT", "Austria", Continent::Europe, 2),
    country("SE", "Sweden", Continent::Europe, 1),
    country("NO", "Norway", Continent::Europe, 1),
    country("DK", "Denmark", Continent::Europe, 2),
    country("FI", "Finland", Continent::Europe, 2),
    country("IS", "Iceland", Continent::Europe, 2),
    country("PL", "Poland", Continent::Europe, 2),
    country("CZ", "Czechia", Continent::Europe, 2),
    country("SK", "Slovakia", Continent::Europe, 3),
    country("HU", "Hungary", Continent::Europe, 2),
    country("RO", "Romania", Continent::Europe, 2),
    country("BG", "Bulgaria", Continent::Europe, 2),
    country("GR", "Greece", Continent::Europe, 1),
    country("HR", "Croatia", Continent::Europe, 1),
    country("RS", "Serbia", Continent::Europe, 2),
    country("BA", "Bosnia and Herzegovina", Continent::Europe, 3),
    country("SI", "Slovenia", Continent::Europe, 3),
    country("MK", "North Macedonia", Continent::Europe, 3),
    country("AL", "Albania", Continent::Europe, 3),
    country("ME", "Montenegro", Continent::Europe, 3),
    country("RU", "Russia", Continent::Europe, 1),
    country("UA", "Ukraine", Continent::Europe, 1),
    country("BY", "Belarus", Continent::Europe, 3),
    country("MD", "Moldova", Continent::Europe, 3),
    country("EE", "Estonia", Continent::Europe, 3),
    country("LV", "Latvia", Continent::Europe, 3),
    country("LT", "Lithuania", Continent::Europe, 3),
    country("MT", "Malta", Continent::Europe, 3),
    country("CY", "Cyprus", Continent::Europe, 3),
    country("AD", "Andorra", Continent::Europe, 3),
    country("MC", "Monaco", Continent::Europe, 3),
    country("LI", "Liechtenstein", Continent::Europe, 3),
    country("SM", "San Marino", Continent::Europe, 3),
    country("VA", "Vatican City", Continent::Europe, 2),

    // Asia
    country("CN", "China", Continent::Asia, 1),
    country("JP", "Japan", Continent::Asia, 1),
    country("IN", "India", Continent::Asia, 1),
    country("KR", "South Korea", Continent::Asia, 1),
    country("KP", "North Korea", Continent::Asia, 2),
    country("ID", "Indonesia", Continent::Asia, 2),
    country("PK", "Pakistan", Continent::Asia, 2),
    country("BD", "Bangladesh", Continent::Asia, 2),
    country("VN", "Vietnam", Continent::Asia, 2),
    country("PH", "Philippines", Continent::Asia, 2),
    country("TR", "Turkey", Continent::Asia, 1),
    country("IR", "Iran", Continent::Asia, 2),
    country("TH", "Thailand", Continent::Asia, 1),
    country("MM", "Myanmar", Continent::Asia, 3),
    country("IQ", "Iraq", Continent::Asia, 2),
    country("AF", "Afghanistan", Continent::Asia, 2),
    country("SA", "Saudi Arabia", Continent::Asia, 1),
    country("UZ", "Uzbekistan", Continent::Asia, 3),
    country("MY", "Malaysia", Continent::Asia, 2),
    country("YE", "Yemen", Continent::Asia, 3),
    country("NP", "Nepal", Continent::Asia, 2),
    country("LK", "Sri Lanka", Continent::Asia, 2),
    country("KZ", "Kazakhstan", Continent::Asia, 2),
    country("SY", "Syria", Continent::Asia, 2),
    country("KH", "Cambodia", Continent::Asia, 3),
    country("JO", "Jordan", Continent::Asia, 3),
    country("AZ", "Azerbaijan", Continent::Asia, 3),
    country("AE", "United Arab Emirates", Continent::Asia, 2),
    country("TJ", "Tajikistan", Continent::Asia, 3),
    country("IL", "Israel", Continent::Asia, 1),
    country("LA", "Laos", Continent::Asia, 3),
    country("KG", "Kyrgyzstan", Continent::Asia, 3),
    country("TM", "Turkmenistan", Continent::Asia, 3),
    country("SG", "Singapore", Continent::Asia, 2),
    country("OM", "Oman", Continent::Asia, 3),
    country("PS", "Palestine", Continent::Asia, 2),
    country("KW", "Kuwait", Continent::Asia, 3),
    country("GE", "Georgia", Continent::Asia, 3),
    country("MN", "Mongolia", Continent::Asia, 3),
    country("AM", "Armenia", Continent::Asia, 3),
    country("QA", "Qatar", Continent::Asia, 2),
    country("BH", "Bahrain", Continent::Asia, 3),
    country("TL", "Timor-Leste", Continent::Asia, 3),
    country("LB", "Lebanon", Continent::Asia, 2),
    country("BT", "Bhutan", Continent::Asia, 3),
    country("MV", "Maldives", Continent::Asia, 3),
    country("BN", "Brunei", Continent::Asia, 3),

    // Africa
    country("NG", "Nigeria", Continent::Africa, 2),
    country("ET", "Ethiopia", Continent::Africa, 2),
    country("EG", "Egypt", Continent::Africa, 1),
    country("CD", "DR Congo", Continent::Africa, 3),
    country("ZA", "South Africa", Continent::Africa, 1),
    country("TZ", "Tanzania", Continent::Africa, 2),
    country("KE", "Kenya", Continent::Africa, 2),
    country("UG", "Uganda", Continent::Africa, 3),
    country("DZ", "Algeria", Continent::Africa, 2),
    country("SD", "Sudan", Continent::Africa, 3),
    country("MA", "Morocco", Continent::Africa, 2),
    country("AO", "Angola", Continent::Africa, 2),
    country("MZ", "Mozambique", Continent::Africa, 2),
    country("GH", "Ghana", Continent::Africa, 2),
    country("MG", "Madagascar", Continent::Africa, 2),
    country("CM", "Cameroon", Continent::Africa, 2),
    country("CI", "Ivory Coast", Continent::Africa, 2),
    country("NE", "Niger", Continent::Africa, 3),
    country("BF", "Burkina Faso", Continent::Africa, 3),
    country("ML", "Mali", Continent::Africa, 3),
    country("MW", "Malawi", Continent::Africa, 3),
    country("ZM", "Zambia", Continent::Africa, 3),
    country("SN", "Senegal", Continent::Africa, 2),
    country("TD", "Chad", Continent::Africa, 3),
    country("SO", "Somalia", Continent::Africa, 3),
    country("ZW", "Zimbabwe", Continent::Africa, 3),
    country("GN", "Guinea", Continent::Africa, 3),
    country("RW", "Rwanda", Continent::Africa, 3),
    country("BJ", "Benin", Continent::Africa, 3),
    country("BI", "Burundi", Continent::Africa, 3),
    country("TN", "Tunisia", Continent::Africa, 2),
    country("SS", "South Sudan", Continent::Africa, 3),
    country("TG", "Togo", Continent::Africa, 3),
    country("SL", "Sierra Leone", Continent::Africa, 3),
    country("LY", "Libya", Continent::Africa, 3),
    country("CG", "Congo", Continent::Africa, 3),
    country("LR", "Liberia", Continent::Africa, 3),
    country("CF", "Central African Republic", Continent::Africa, 3),
    country("MR", "Mauritania", Continent::Africa, 3),
    country("ER", "Eritrea", Continent::Africa, 3),
    country("NA", "Namibia", Continent::Africa, 3),
    country("GM", "Gambia", Continent::Africa, 3),
    country("BW", "Botswana", Continent::Africa, 3),
    country("GA", "Gabon", Continent::Africa, 3),
    country("LS", "Lesotho", Continent::Africa, 3),
    country("GW", "Guinea-Bissau", Continent::Africa, 3),
    country("GQ", "Equatorial Guinea", Continent::Africa, 3),
    country("MU", "Mauritius", Continent::Africa, 3),
    country("SZ", "Eswatini", Continent::Africa, 3),
    country("DJ", "Djibouti", Continent::Africa, 3),
    country("KM", "Comoros", Continent::Africa, 3),
    country("CV", "Cape Verde", Continent::Africa, 2),
    country("ST", "Sao Tome and Principe", Continent::Africa, 3),
    country("SC", "Seychelles", Continent::Africa, 3),

    // Oceania
    country("AU", "Australia", Continent::Oceania, 1),
    country("PG", "Papua New Guinea", Continent::Oceania, 3),
    country("NZ", "New Zealand", Continent::Oceania, 1),
    country("FJ", "Fiji", Continent::Oceania, 3),
    country("SB", "Solomon Islands", Continent::Oceania, 3),
    country("VU", "Vanuatu", Continent::Oceania, 3),
    country("NC", "New Caledonia", Continent::Oceania, 3),
    country("PF", "French Polynesia", Continent::Oceania, 3),
    country("WS", "Samoa", Continent::Oceania, 3),
    country("GU", "Guam", Continent::Oceania, 3),
    country("KI", "Kiribati", Continent::Oceania, 3),
    country("TO", "Tonga", Continent::Oceania, 3),
    country("FM", "Micronesia", Continent::Oceania, 3),
    country("MH", "Marshall Islands", Continent::Oceania, 3),
    country("PW", "Palau", Continent::Oceania, 3),
    country("NR", "Nauru", Continent::Oceania, 3),
    country("TV", "Tuvalu", Continent::Oceania, 3),
];

/// Country used when no candidate has a map.
pub const FALLBACK_MAP_COUNTRY: &str = "AU";
/// Generic asset shown if even the fallback country has no map.
pub const FALLBACK_MAP_ASSET: &str = "ic_game_map";

/// Country code to map image resource.
pub static MAP_ASSETS: &[(&str, &str)] = &[
    ("BR", "map_br"),
    ("AR", "map_ar"),
    ("UY", "map_uy"),
    ("PY", "map_py"),
    ("CL", "map_cl"),
    ("BO", "map_bo"),
    ("PE", "map_pe"),
    ("EC", "map_ec"),
    ("CO", "map_co"),
    ("VE", "map_ve"),
    ("US", "map_us"),
    ("CA", "map_ca"),
    ("MX", "map_mx"),
    ("GT", "map_gt"),
    ("SV", "map_sv"),
    ("HN", "map_hn"),
    ("NI", "map_ni"),
    ("CR", "map_cr"),
    ("PA", "map_pa"),
    ("CU", "map_cu"),
    ("JM", "map_jm"),
    ("DO", "map_do"),
    ("PT", "map_pt"),
    ("ES", "map_es"),
    ("FR", "map_fr"),
    ("DE", "map_de"),
    ("IT", "map_it"),
    ("GB", "map_gb"),
    ("IE", "map_ie"),
    ("NL", "map_nl"),
    ("BE", "map_be"),
    ("LU", "map_lu"),
    ("CH", "map_ch"),
    ("AT", "map_at"),
    ("SE", "map_se"),
    ("NO", "map_no"),
    ("DK", "map_dk"),
    ("FI", "map_fi"),
    ("IS", "map_is"),
    ("PL", "map_pl"),
    ("CZ", "map_cz"),
    ("HU", "map_hu"),
    ("RO", "map_ro"),
    ("BG", "map_bg"),
    ("GR", "map_gr"),
    ("HR", "map_hr"),
    ("RS", "map_rs"),
    ("RU", "map_ru"),
    ("UA", "map_ua"),
    ("VA", "map_va"),
    ("CN", "map_cn"),
    ("JP", "map_jp"),
    ("IN", "map_in"),
    ("KR", "map_kr"),
    ("KP", "map_kp"),
    ("ID", "map_id"),
    ("PK", "map_pk"),
    ("BD", "map_bd"),
    ("VN", "map_vn"),
    ("PH", "map_ph"),
    ("TR", "map_tr"),
    ("IR", "map_ir"),
    ("TH", "map_th"),
    ("IQ", "map_iq"),
    ("AF", "map_af"),
    ("SA", "map_sa"),
    ("MY", "map_my"),
    ("NP", "map_np"),
    ("LK", "map_lk"),
    ("KZ", "map_kz"),
    ("SY", "map_sy"),
    ("AE", "map_ae"),
    ("IL", "map_il"),
    ("SG", "map_sg"),
    ("PS", "map_ps"),
    ("QA", "map_qa"),
    ("LB", "map_lb"),
    ("NG", "map_ng"),
    ("ET", "map_et"),
    ("EG", "map_eg"),
    ("ZA", "map_za"),
    ("TZ", "map_tz"),
    ("KE", "map_ke"),
    ("DZ", "map_dz"),
    ("MA", "map_ma"),
    ("AO", "map_ao"),
    ("MZ", "map_mz"),
    ("GH", "map_gh"),
    ("MG", "map_mg"),
    ("CM", "map_cm"),
    ("CI", "map_ci"),
    ("SN", "map_sn"),
    ("TN", "map_tn"),
    ("CV", "map_cv"),
    ("AU", "map_au"),
    ("NZ", "map_nz"),
];

pub fn map_asset(code: &str) -> Option<&'static str> {
    MAP_ASSETS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, asset)| *asset)
}

pub fn find(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// All countries in `region`. `None` and `World` both mean the whole catalog.
pub fn countries_in(region: Option<Region>) -> impl Iterator<Item = &'static Country> {
    COUNTRIES.iter().filter(move |c| c.in_region(region))
}
