//! UI message translations.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use kurdbook_core::{Locale, LocalizedText};

static BUILTIN: LazyLock<Arc<Translations>> = LazyLock::new(|| Arc::new(Translations::seed()));

/// Message key to localized text.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    messages: HashMap<&'static str, LocalizedText>,
}

impl Translations {
    /// Storefront UI strings shipped with the binary.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Text for `key` in `locale`, with the usual locale fallback. Unknown
    /// keys come back unchanged so a missing translation stays visible.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str, locale: Locale) -> &'a str {
        self.messages
            .get(key)
            .map_or(key, |text| text.resolve(locale))
    }

    pub fn insert(&mut self, key: &'static str, text: LocalizedText) {
        self.messages.insert(key, text);
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn seed() -> Self {
        // (key, en, ku, kmr, de)
        const MESSAGES: &[(&str, &str, &str, &str, &str)] = &[
            ("nav.books", "Books", "کتێبەکان", "Pirtûk", "Bücher"),
            ("nav.art", "Art & Crafts", "هونەر و دەستکرد", "Huner û destkar", "Kunst & Handwerk"),
            ("nav.artisans", "Artisans", "وەستاکاران", "Hunermend", "Kunsthandwerker"),
            ("cart.title", "Shopping Cart", "سەبەتەی کڕین", "Selika kirînê", "Warenkorb"),
            ("cart.empty", "Your cart is empty", "سەبەتەکەت بەتاڵە", "Selika te vala ye", "Ihr Warenkorb ist leer"),
            ("cart.add", "Add to cart", "زیادکردن بۆ سەبەتە", "Têxe selikê", "In den Warenkorb"),
            ("cart.subtotal", "Subtotal", "کۆی گشتی", "Bihayê giştî", "Zwischensumme"),
            ("wishlist.title", "Wishlist", "لیستی خواستەکان", "Lîsteya daxwazan", "Wunschliste"),
            ("wishlist.move_to_cart", "Move to cart", "گواستنەوە بۆ سەبەتە", "Bibe selikê", "In den Warenkorb legen"),
            ("favorites.title", "Favorites", "دڵخوازەکان", "Bijarte", "Favoriten"),
            ("reviews.title", "Reviews", "هەڵسەنگاندنەکان", "Nirxandin", "Bewertungen"),
            ("reviews.write", "Write a review", "هەڵسەنگاندن بنووسە", "Nirxandinekê binivîse", "Bewertung schreiben"),
            ("auth.login", "Sign in", "چوونەژوورەوە", "Têkeve", "Anmelden"),
            ("auth.logout", "Sign out", "چوونەدەرەوە", "Derkeve", "Abmelden"),
            ("auth.register", "Create account", "دروستکردنی هەژمار", "Hesab çêke", "Konto erstellen"),
            ("auth.invalid_credentials", "Invalid email or password", "ئیمەیڵ یان وشەی نهێنی هەڵەیە", "E-name an şîfre xelet e", "Ungültige E-Mail oder Passwort"),
            ("catalog.in_stock", "In stock", "بەردەستە", "Heye", "Auf Lager"),
            ("catalog.out_of_stock", "Out of stock", "نەماوە", "Nemaye", "Ausverkauft"),
            ("catalog.new", "New", "نوێ", "Nû", "Neu"),
            ("catalog.bestseller", "Bestseller", "پڕفرۆشترین", "Herî zêde firotî", "Bestseller"),
            ("search.placeholder", "Search books and crafts", "گەڕان بۆ کتێب و دەستکرد", "Li pirtûk û destkaran bigere", "Bücher und Handwerk suchen"),
        ];

        let mut translations = Self::default();
        for &(key, en, ku, kmr, de) in MESSAGES {
            let Ok(text) = LocalizedText::new(en) else {
                continue;
            };
            translations.insert(
                key,
                text.with(Locale::Ku, ku)
                    .with(Locale::Kmr, kmr)
                    .with(Locale::De, de),
            );
        }
        translations
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_key() {
        let t = Translations::builtin();
        assert_eq!(t.translate("cart.title", Locale::De), "Warenkorb");
        assert_eq!(t.translate("cart.title", Locale::Ku), "سەبەتەی کڕین");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        let t = Translations::builtin();
        assert_eq!(t.translate("checkout.title", Locale::En), "checkout.title");
    }

    #[test]
    fn test_missing_locale_falls_back_to_english() {
        let mut t = Translations::default();
        t.insert("greeting", LocalizedText::new("Hello").unwrap().with(Locale::Ku, "سڵاو"));
        assert_eq!(t.translate("greeting", Locale::De), "Hello");
        assert_eq!(t.translate("greeting", Locale::Ku), "سڵاو");
        assert_eq!(t.len(), 1);
    }
}
