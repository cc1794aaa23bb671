//! The 81 provinces of Turkey, ordered by plate number.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// Official plate number, also the EzanVakti city id.
    pub plate: u8,
    /// ASCII name used for API queries and output file names.
    pub slug: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn city(
    plate: u8,
    slug: &'static str,
    name: &'static str,
    latitude: f64,
    longitude: f64,
) -> City {
    City {
        plate,
        slug,
        name,
        latitude,
        longitude,
    }
}

pub static CITIES: [City; 81] = [
    city(1, "adana", "Adana", 37.00, 35.32),
    city(2, "adiyaman", "Adıyaman", 37.76, 38.28),
    city(3, "afyonkarahisar", "Afyonkarahisar", 38.76, 30.54),
    city(4, "agri", "Ağrı", 39.72, 43.05),
    city(5, "amasya", "Amasya", 40.65, 35.83),
    city(6, "ankara", "Ankara", 39.93, 32.86),
    city(7, "antalya", "Antalya", 36.89, 30.71),
    city(8, "artvin", "Artvin", 41.18, 41.82),
    city(9, "aydin", "Aydın", 37.85, 27.85),
    city(10, "balikesir", "Balıkesir", 39.65, 27.88),
    city(11, "bilecik", "Bilecik", 40.14, 29.98),
    city(12, "bingol", "Bingöl", 38.88, 40.50),
    city(13, "bitlis", "Bitlis", 38.40, 42.11),
    city(14, "bolu", "Bolu", 40.74, 31.61),
    city(15, "burdur", "Burdur", 37.72, 30.29),
    city(16, "bursa", "Bursa", 40.19, 29.06),
    city(17, "canakkale", "Çanakkale", 40.15, 26.41),
    city(18, "cankiri", "Çankırı", 40.60, 33.62),
    city(19, "corum", "Çorum", 40.55, 34.95),
    city(20, "denizli", "Denizli", 37.78, 29.09),
    city(21, "diyarbakir", "Diyarbakır", 37.91, 40.24),
    city(22, "edirne", "Edirne", 41.68, 26.56),
    city(23, "elazig", "Elazığ", 38.67, 39.22),
    city(24, "erzincan", "Erzincan", 39.75, 39.49),
    city(25, "erzurum", "Erzurum", 39.90, 41.27),
    city(26, "eskisehir", "Eskişehir", 39.78, 30.52),
    city(27, "gaziantep", "Gaziantep", 37.07, 37.38),
    city(28, "giresun", "Giresun", 40.91, 38.39),
    city(29, "gumushane", "Gümüşhane", 40.46, 39.48),
    city(30, "hakkari", "Hakkari", 37.57, 43.74),
    city(31, "hatay", "Hatay", 36.20, 36.16),
    city(32, "isparta", "Isparta", 37.76, 30.55),
    city(33, "mersin", "Mersin", 36.80, 34.63),
    city(34, "istanbul", "İstanbul", 41.01, 28.98),
    city(35, "izmir", "İzmir", 38.42, 27.14),
    city(36, "kars", "Kars", 40.60, 43.10),
    city(37, "kastamonu", "Kastamonu", 41.38, 33.78),
    city(38, "kayseri", "Kayseri", 38.73, 35.49),
    city(39, "kirklareli", "Kırklareli", 41.74, 27.22),
    city(40, "kirsehir", "Kırşehir", 39.15, 34.17),
    city(41, "kocaeli", "Kocaeli", 40.77, 29.92),
    city(42, "konya", "Konya", 37.87, 32.48),
    city(43, "kutahya", "Kütahya", 39.42, 29.98),
    city(44, "malatya", "Malatya", 38.36, 38.31),
    city(45, "manisa", "Manisa", 38.61, 27.43),
    city(46, "kahramanmaras", "Kahramanmaraş", 37.58, 36.94),
    city(47, "mardin", "Mardin", 37.31, 40.74),
    city(48, "mugla", "Muğla", 37.22, 28.36),
    city(49, "mus", "Muş", 38.75, 41.50),
    city(50, "nevsehir", "Nevşehir", 38.62, 34.71),
    city(51, "nigde", "Niğde", 37.97, 34.68),
    city(52, "ordu", "Ordu", 40.98, 37.88),
    city(53, "rize", "Rize", 41.02, 40.52),
    city(54, "sakarya", "Sakarya", 40.78, 30.40),
    city(55, "samsun", "Samsun", 41.29, 36.33),
    city(56, "siirt", "Siirt", 37.93, 41.94),
    city(57, "sinop", "Sinop", 42.03, 35.15),
    city(58, "sivas", "Sivas", 39.75, 37.02),
    city(59, "tekirdag", "Tekirdağ", 40.98, 27.51),
    city(60, "tokat", "Tokat", 40.31, 36.55),
    city(61, "trabzon", "Trabzon", 41.00, 39.72),
    city(62, "tunceli", "Tunceli", 39.11, 39.55),
    city(63, "sanliurfa", "Şanlıurfa", 37.16, 38.79),
    city(64, "usak", "Uşak", 38.68, 29.41),
    city(65, "van", "Van", 38.49, 43.38),
    city(66, "yozgat", "Yozgat", 39.82, 34.81),
    city(67, "zonguldak", "Zonguldak", 41.45, 31.79),
    city(68, "aksaray", "Aksaray", 38.37, 34.03),
    city(69, "bayburt", "Bayburt", 40.26, 40.23),
    city(70, "karaman", "Karaman", 37.18, 33.22),
    city(71, "kirikkale", "Kırıkkale", 39.85, 33.51),
    city(72, "batman", "Batman", 37.88, 41.13),
    city(73, "sirnak", "Şırnak", 37.52, 42.46),
    city(74, "bartin", "Bartın", 41.63, 32.34),
    city(75, "ardahan", "Ardahan", 41.11, 42.70),
    city(76, "igdir", "Iğdır", 39.92, 44.04),
    city(77, "yalova", "Yalova", 40.65, 29.27),
    city(78, "karabuk", "Karabük", 41.20, 32.62),
    city(79, "kilis", "Kilis", 36.72, 37.12),
    city(80, "osmaniye", "Osmaniye", 37.07, 36.25),
    city(81, "duzce", "Düzce", 40.84, 31.16),
];

pub fn all() -> &'static [City] {
    &CITIES
}

pub fn find(slug: &str) -> Option<&'static City> {
    let slug = slug.trim().to_ascii_lowercase();
    CITIES.iter().find(|city| city.slug == slug)
}

pub fn by_plate(plate: u8) -> Option<&'static City> {
    CITIES.iter().find(|city| city.plate == plate)
}

/// Resolves every slug, failing on the first one that is not a province.
pub fn select<S: AsRef<str>>(slugs: &[S]) -> Result<Vec<&'static City>> {
    slugs
        .iter()
        .map(|slug| {
            find(slug.as_ref()).ok_or_else(|| Error::UnknownCity(slug.as_ref().to_string()))
        })
        .collect()
}

/// Uppercases a Turkish name, keeping the dotted/dotless i distinction.
pub fn turkish_upper(name: &str) -> String {
    name.chars()
        .flat_map(|c| match c {
            'i' => vec!['İ'],
            'ı' => vec!['I'],
            c => c.to_uppercase().collect(),
        })
        .collect()
}
