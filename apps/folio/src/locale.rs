use serde::Serialize;

/// Locales the site ships UI strings for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteLocale {
    #[default]
    En,
    Fr,
}

pub const SITE_LOCALES: [SiteLocale; 2] = [SiteLocale::En, SiteLocale::Fr];

impl SiteLocale {
    pub fn from_code(code: &str) -> Option<Self> {
        SITE_LOCALES.into_iter().find(|l| l.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            SiteLocale::En => "en",
            SiteLocale::Fr => "fr",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SiteLocale::En => "English",
            SiteLocale::Fr => "Français",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_default_is_english() {
        assert_eq!(SiteLocale::default(), SiteLocale::En);
    }

    #[test]
    fn test_only_known_codes_accepted() {
        assert_eq!(SiteLocale::from_code("fr"), Some(SiteLocale::Fr));
        assert_eq!(SiteLocale::from_code("de"), None);
        assert_eq!(SiteLocale::Fr.name(), "Français");
    }
}
