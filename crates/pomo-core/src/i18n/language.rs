use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_its_code() {
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!(Language::Fr.to_string(), "fr");
    }

    #[test]
    fn deserializes_lowercase_codes() {
        #[derive(Deserialize)]
        struct General {
            language: Language,
        }

        let general: General = toml::from_str(r#"language = "fr""#).unwrap();
        assert_eq!(general.language, Language::Fr);
    }
}
