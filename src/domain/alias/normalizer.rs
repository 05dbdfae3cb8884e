//! Utterance normalization

use super::table::AliasTable;

/// Lower-cases an utterance and substitutes aliases token by token.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    aliases: AliasTable,
}

impl TextNormalizer {
    /// Create a normalizer over a fixed alias table
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// The alias table used for substitution
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Normalize an utterance.
    ///
    /// Tokens are split on whitespace and rejoined with single spaces only
    /// when at least one alias matched; otherwise the lower-cased input is
    /// returned as is. Replacements are not re-scanned.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        let substituted = {
            let mut matched = false;
            let tokens: Vec<&str> = lowered
                .split_whitespace()
                .map(|token| match self.aliases.lookup(token) {
                    Some(replacement) => {
                        matched = true;
                        replacement
                    }
                    None => token,
                })
                .collect();

            matched.then(|| tokens.join(" "))
        };

        substituted.unwrap_or(lowered)
    }
}
