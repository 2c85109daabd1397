use serde::{Deserialize, Serialize};
use std::fmt;

// Language - supported notification languages; unknown codes fall back to
// the primary language instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  En,
  De,
  Es,
}

impl Language {
  pub const PRIMARY: Language = Language::En;

  pub fn from_code(code: &str) -> Self {
    match code.trim().to_lowercase().as_str() {
      "en" => Language::En,
      "de" => Language::De,
      "es" => Language::Es,
      _ => Language::PRIMARY,
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Language::En => "en",
      Language::De => "de",
      Language::Es => "es",
    }
  }
}

impl Default for Language {
  fn default() -> Self {
    Language::PRIMARY
  }
}

// Transport Kind - which configured SMTP transport handled a send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
  Primary,
  Secondary,
}

impl TransportKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      TransportKind::Primary => "primary",
      TransportKind::Secondary => "secondary",
    }
  }
}

impl fmt::Display for TransportKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
