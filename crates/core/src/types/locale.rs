//! Supported locales and multi-language text.
//!
//! Every piece of catalog copy is stored once per language in a
//! [`LocalizedText`]. Resolution picks the active locale, then English, then
//! whatever language the record does have, so a lookup never fails.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error for an unrecognised locale code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct LocaleError(pub String);

/// Errors building a [`LocalizedText`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalizedTextError {
    /// The English fallback was blank.
    #[error("english fallback text cannot be blank")]
    MissingFallback,
    /// No locale carried any text.
    #[error("localized text needs at least one populated locale")]
    Empty,
}

/// A storefront language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Central Kurdish (Sorani), written in Arabic script.
    #[default]
    Ku,
    /// Northern Kurdish (Kurmanji), written in Latin script.
    Kmr,
    En,
    De,
}

/// Writing direction of a locale's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Value for an HTML `dir` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl Locale {
    /// Locale used when the active one has no text.
    pub const FALLBACK: Self = Self::En;

    /// All locales, in the order used for last-resort resolution.
    pub const ALL: [Self; 4] = [Self::Ku, Self::Kmr, Self::En, Self::De];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ku => "ku",
            Self::Kmr => "kmr",
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// The language's name in its own script, for the language switcher.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Ku => "کوردی",
            Self::Kmr => "Kurmancî",
            Self::En => "English",
            Self::De => "Deutsch",
        }
    }

    #[must_use]
    pub const fn direction(self) -> TextDirection {
        match self {
            Self::Ku => TextDirection::Rtl,
            Self::Kmr | Self::En | Self::De => TextDirection::Ltr,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // ISO 639-3 code for Sorani
            "ku" | "ckb" => Ok(Self::Ku),
            "kmr" => Ok(Self::Kmr),
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            _ => Err(LocaleError(s.to_string())),
        }
    }
}

/// Text with one optional value per supported locale.
///
/// Blank values are treated as absent. At least one locale is always
/// populated, which makes [`LocalizedText::resolve`] total.
///
/// ```
/// use kurdbook_core::{Locale, LocalizedText};
///
/// let title = LocalizedText::new("Poems of Nali")
///     .unwrap()
///     .with(Locale::Ku, "شیعرەکانی نالی");
///
/// assert_eq!(title.resolve(Locale::Ku), "شیعرەکانی نالی");
/// assert_eq!(title.resolve(Locale::De), "Poems of Nali");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LocalizedFields")]
pub struct LocalizedText {
    #[serde(skip_serializing_if = "Option::is_none")]
    ku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kmr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    de: Option<String>,
}

/// Unvalidated wire shape of [`LocalizedText`].
#[derive(Deserialize)]
struct LocalizedFields {
    #[serde(default)]
    ku: Option<String>,
    #[serde(default)]
    kmr: Option<String>,
    #[serde(default)]
    en: Option<String>,
    #[serde(default)]
    de: Option<String>,
}

impl TryFrom<LocalizedFields> for LocalizedText {
    type Error = LocalizedTextError;

    fn try_from(fields: LocalizedFields) -> Result<Self, Self::Error> {
        let text = Self {
            ku: non_blank(fields.ku),
            kmr: non_blank(fields.kmr),
            en: non_blank(fields.en),
            de: non_blank(fields.de),
        };
        if text.iter().next().is_none() {
            return Err(LocalizedTextError::Empty);
        }
        Ok(text)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl LocalizedText {
    /// Create a record from its mandatory English text.
    ///
    /// # Errors
    ///
    /// Returns `LocalizedTextError::MissingFallback` if `en` is blank.
    pub fn new(en: impl Into<String>) -> Result<Self, LocalizedTextError> {
        let en = non_blank(Some(en.into())).ok_or(LocalizedTextError::MissingFallback)?;
        Ok(Self {
            ku: None,
            kmr: None,
            en: Some(en),
            de: None,
        })
    }

    /// Set the text for one locale. Blank text leaves the record unchanged.
    #[must_use]
    pub fn with(mut self, locale: Locale, text: impl Into<String>) -> Self {
        if let Some(text) = non_blank(Some(text.into())) {
            *self.slot_mut(locale) = Some(text);
        }
        self
    }

    /// The text for exactly this locale, without fallback.
    #[must_use]
    pub fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::Ku => self.ku.as_deref(),
            Locale::Kmr => self.kmr.as_deref(),
            Locale::En => self.en.as_deref(),
            Locale::De => self.de.as_deref(),
        }
    }

    /// Resolve for `locale`, falling back to English, then to the first
    /// populated locale in [`Locale::ALL`] order.
    #[must_use]
    pub fn resolve(&self, locale: Locale) -> &str {
        self.get(locale)
            .or_else(|| self.get(Locale::FALLBACK))
            .or_else(|| self.iter().next().map(|(_, text)| text))
            .unwrap_or_default()
    }

    /// Populated locales and their text.
    pub fn iter(&self) -> impl Iterator<Item = (Locale, &str)> {
        Locale::ALL
            .into_iter()
            .filter_map(|locale| self.get(locale).map(|text| (locale, text)))
    }

    fn slot_mut(&mut self, locale: Locale) -> &mut Option<String> {
        match locale {
            Locale::Ku => &mut self.ku,
            Locale::Kmr => &mut self.kmr,
            Locale::En => &mut self.en,
            Locale::De => &mut self.de,
        }
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resolve(Locale::FALLBACK))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> LocalizedText {
        LocalizedText::new("Mem and Zin")
            .unwrap()
            .with(Locale::Ku, "مەم و زین")
            .with(Locale::Kmr, "Mem û Zîn")
    }

    #[test]
    fn test_resolve_active_locale() {
        let text = sample();
        assert_eq!(text.resolve(Locale::Ku), "مەم و زین");
        assert_eq!(text.resolve(Locale::Kmr), "Mem û Zîn");
        assert_eq!(text.resolve(Locale::En), "Mem and Zin");
    }

    #[test]
    fn test_resolve_missing_locale_falls_back_to_english() {
        for locale in Locale::ALL {
            let text = LocalizedText::new("Only English").unwrap();
            assert_eq!(text.resolve(locale), "Only English");
        }
        assert_eq!(sample().resolve(Locale::De), "Mem and Zin");
    }

    #[test]
    fn test_resolve_without_english_uses_first_populated() {
        let text: LocalizedText =
            serde_json::from_str(r#"{"de":"Gedichte","kmr":"Helbest"}"#).unwrap();
        assert_eq!(text.resolve(Locale::En), "Helbest");
        assert_eq!(text.resolve(Locale::De), "Gedichte");
        assert_eq!(text.resolve(Locale::Ku), "Helbest");
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        let text: LocalizedText = serde_json::from_str(r#"{"ku":"  ","en":"Poetry"}"#).unwrap();
        assert_eq!(text.get(Locale::Ku), None);
        assert_eq!(text.resolve(Locale::Ku), "Poetry");

        let unchanged = text.clone().with(Locale::De, "");
        assert_eq!(unchanged, text);
    }

    #[test]
    fn test_construction_requires_text() {
        assert_eq!(
            LocalizedText::new("   "),
            Err(LocalizedTextError::MissingFallback)
        );
        assert!(serde_json::from_str::<LocalizedText>("{}").is_err());
        assert!(serde_json::from_str::<LocalizedText>(r#"{"en":""}"#).is_err());
    }

    #[test]
    fn test_serialize_skips_missing_locales() {
        let json = serde_json::to_string(&LocalizedText::new("History").unwrap()).unwrap();
        assert_eq!(json, r#"{"en":"History"}"#);
    }

    #[test]
    fn test_locale_parsing_and_direction() {
        assert_eq!("CKB".parse::<Locale>().unwrap(), Locale::Ku);
        assert_eq!("kmr".parse::<Locale>().unwrap(), Locale::Kmr);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::Ku.direction(), TextDirection::Rtl);
        assert_eq!(Locale::Kmr.direction().as_str(), "ltr");
    }
}
