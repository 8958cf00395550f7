//! Configuration management for Lectura
//!
//! Built once at process start from the environment and passed by
//! reference; nothing else in the pipeline reads environment state.

use serde::Deserialize;
use std::env;

/// Characters offered by the picker when `LECTURA_KEYBOARD` is unset:
/// the glyph inventory of early modern German prints (long s, macron
/// abbreviations, superscript-e umlauts, r rotunda, Tironian et,
/// ligatures, fractions, Greek minuscules).
const DEFAULT_KEYBOARD: &[&str] = &[
    "ſ", "ā", "ē", "ī", "ō", "ū", "n̄", "m̄", "p̄", "t̄", "q̄", "q̈", "Ā", "Ē", "Ī", "Ō", "Ū",
    "aͤ", "oͤ", "uͤ", "Aͤ", "Oͤ", "Uͤ", "ꝗ", "q́", "å", "ů", "ꝛ", "⁊", "Æ", "Œ", "æ", "œ", "ë",
    "ↄ", "ę", "｢", "｣", "⁰", "¹", "²", "³", "⁴", "⁵", "⁶", "⁷", "⁸", "⁹", "⸗", "—", "‹", "›",
    "»", "«", "„", "”", "’", "£", "§", "†", "½", "¼", "¾", "⅓", "⅔", "⅕", "⅖", "⅗", "⅘", "⅙",
    "⅐", "⅚", "⅛", "⅜", "⅝", "⅞", "⅑", "⅒", "Α", "Δ", "Κ", "Π", "Σ", "ά", "έ", "ή", "ί", "α",
    "β", "γ", "δ", "ε", "ζ", "η", "θ", "ι", "κ", "λ", "μ", "ν", "ξ", "ο", "π", "ρ", "ς", "σ",
    "τ", "υ", "φ", "χ", "ψ", "ω", "ό", "ύ", "ώ", "ϑ", "ϰ", "ϱ",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub review: ReviewConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewConfig {
    /// Reviewer session identifiers permitted to use the surface
    pub allowed_sessions: Vec<String>,
    /// Characters offered by the historical-character picker
    pub keyboard: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            review: ReviewConfig {
                allowed_sessions: Vec::new(),
                keyboard: DEFAULT_KEYBOARD.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

impl Config {
    /// Build configuration from the environment.
    ///
    /// `LECTURA_ALLOWED_SESSIONS` — comma-separated session allow-list.
    /// `LECTURA_KEYBOARD` — comma-separated picker characters, overriding
    /// the built-in set.
    pub fn from_env() -> Self {
        Config {
            review: ReviewConfig {
                allowed_sessions: env::var("LECTURA_ALLOWED_SESSIONS")
                    .map(|v| split_list(&v))
                    .unwrap_or_default(),
                keyboard: env::var("LECTURA_KEYBOARD")
                    .map(|v| split_list(&v))
                    .unwrap_or_else(|_| {
                        DEFAULT_KEYBOARD.iter().map(|s| s.to_string()).collect()
                    }),
            },
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_drops_blanks() {
        assert_eq!(split_list("anna, karl ,,  ,erik"), vec!["anna", "karl", "erik"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_default_keyboard_is_nonempty() {
        let config = Config::default();
        assert!(config.review.keyboard.iter().any(|c| c == "ſ"));
        assert!(config.review.allowed_sessions.is_empty());
    }
}
