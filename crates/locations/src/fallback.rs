/// Built-in names used when no database entry exists for a code.
static FALLBACK_COUNTRIES: &[(&str, &str)] = &[
    ("al", "Albania"),
    ("at", "Austria"),
    ("au", "Australia"),
    ("be", "Belgium"),
    ("bg", "Bulgaria"),
    ("br", "Brazil"),
    ("ca", "Canada"),
    ("ch", "Switzerland"),
    ("cl", "Chile"),
    ("co", "Colombia"),
    ("cy", "Cyprus"),
    ("cz", "Czech Republic"),
    ("de", "Germany"),
    ("dk", "Denmark"),
    ("ee", "Estonia"),
    ("es", "Spain"),
    ("fi", "Finland"),
    ("fr", "France"),
    ("gb", "United Kingdom"),
    ("gr", "Greece"),
    ("hk", "Hong Kong"),
    ("hr", "Croatia"),
    ("hu", "Hungary"),
    ("id", "Indonesia"),
    ("ie", "Ireland"),
    ("il", "Israel"),
    ("it", "Italy"),
    ("jp", "Japan"),
    ("mx", "Mexico"),
    ("my", "Malaysia"),
    ("ng", "Nigeria"),
    ("nl", "Netherlands"),
    ("no", "Norway"),
    ("nz", "New Zealand"),
    ("pe", "Peru"),
    ("ph", "Philippines"),
    ("pl", "Poland"),
    ("pt", "Portugal"),
    ("ro", "Romania"),
    ("rs", "Serbia"),
    ("se", "Sweden"),
    ("sg", "Singapore"),
    ("si", "Slovenia"),
    ("sk", "Slovakia"),
    ("th", "Thailand"),
    ("tr", "Turkey"),
    ("ua", "Ukraine"),
    ("us", "United States"),
    ("za", "South Africa"),
];

/// Static name for `code`, or the uppercased code when unknown.
pub fn fallback_country_name(code: &str) -> String {
    let code = code.trim().to_lowercase();
    FALLBACK_COUNTRIES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_any_case() {
        assert_eq!(fallback_country_name("fr"), "France");
        assert_eq!(fallback_country_name("GB"), "United Kingdom");
        assert_eq!(fallback_country_name("Us"), "United States");
    }

    #[test]
    fn test_unknown_code_is_uppercased() {
        assert_eq!(fallback_country_name("xq"), "XQ");
        assert_eq!(fallback_country_name(fallback_country_name("xq").as_str()), "XQ");
    }
}
