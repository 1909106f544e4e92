use super::Language;
use std::collections::HashMap;

const EN_TRANSLATIONS: &str = include_str!("locales/en.toml");
const FR_TRANSLATIONS: &str = include_str!("locales/fr.toml");

/// Looks up `section.key` strings. Keys missing from the selected locale
/// fall back to English, then to the key itself.
#[derive(Debug, Clone)]
pub struct Translator {
    translations: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        let translations = match language {
            Language::En => parse_translations(EN_TRANSLATIONS),
            Language::Fr => parse_translations(FR_TRANSLATIONS),
        };
        let fallback = match language {
            Language::En => HashMap::new(),
            Language::Fr => parse_translations(EN_TRANSLATIONS),
        };

        Self {
            translations,
            fallback,
        }
    }

    pub fn get(&self, key: &str) -> String {
        self.translations
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.get(key), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

fn parse_translations(content: &str) -> HashMap<String, String> {
    let Ok(toml::Value::Table(sections)) = toml::from_str::<toml::Value>(content) else {
        return HashMap::new();
    };

    sections
        .into_iter()
        .filter_map(|(section, values)| match values {
            toml::Value::Table(entries) => Some((section, entries)),
            _ => None,
        })
        .flat_map(|(section, entries)| {
            entries.into_iter().filter_map(move |(key, value)| match value {
                toml::Value::String(text) => Some((format!("{}.{}", section, key), text)),
                _ => None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_acknowledgments_match_phase() {
        let translator = Translator::new(Language::En);

        assert_eq!(
            translator.get("phase.focus_complete_body"),
            "Great work! Time for a break!"
        );
        assert_eq!(
            translator.get("phase.break_complete_body"),
            "Break's over! Ready for another focus session?"
        );
    }

    #[test]
    fn french_locale_is_loaded() {
        let translator = Translator::new(Language::Fr);

        assert_eq!(
            translator.get("phase.focus_complete_body"),
            "Beau travail ! C'est l'heure de la pause !"
        );
    }

    #[test]
    fn missing_key_returns_key() {
        let translator = Translator::new(Language::En);

        assert_eq!(translator.get("nonexistent.key"), "nonexistent.key");
    }

    #[test]
    fn format_replaces_placeholders() {
        let translator = Translator::new(Language::En);

        let result = translator.format("status.session", &[("index", "3"), ("state", "Paused")]);
        assert_eq!(result, "Session 3 • Paused");
    }

    #[test]
    fn every_english_key_exists_in_french() {
        let english = parse_translations(EN_TRANSLATIONS);
        let french = parse_translations(FR_TRANSLATIONS);

        let missing: Vec<_> = english.keys().filter(|key| !french.contains_key(*key)).collect();
        assert!(missing.is_empty(), "missing french keys: {:?}", missing);
    }
}
