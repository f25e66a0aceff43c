use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ro,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ro, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ro => "ro",
            Locale::En => "en",
        }
    }

    /// Picks the Romanian or English variant of a label.
    pub fn pick<'a>(&self, ro: &'a str, en: &'a str) -> &'a str {
        match self {
            Locale::Ro => ro,
            Locale::En => en,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ro" => Ok(Locale::Ro),
            "en" => Ok(Locale::En),
            other => Err(format!("Unknown locale {}", other)),
        }
    }
}
