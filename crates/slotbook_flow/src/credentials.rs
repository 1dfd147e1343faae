use slotbook_common::CredentialResolver;
use slotbook_config::{AppConfig, SECRET_MARKER};
use std::collections::HashMap;
use tracing::warn;

/// Practitioner tokens held in memory, usually the `practitioners` table of
/// the configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    tokens: HashMap<String, String>,
}

impl StaticCredentials {
    /// Blank tokens and secrets that were never injected are left out, so
    /// they resolve to nothing instead of being sent as bearer tokens.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut tokens = HashMap::new();
        for (id, token) in pairs {
            let id: String = id.into();
            let token: String = token.into();
            let token = token.trim();
            if token.is_empty() || token == SECRET_MARKER {
                warn!("No usable token configured for practitioner {}", id);
                continue;
            }
            tokens.insert(id, token.to_string());
        }
        Self { tokens }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::from_pairs(
            config
                .practitioners
                .iter()
                .map(|(id, token)| (id.as_str(), token.as_str())),
        )
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl CredentialResolver for StaticCredentials {
    fn resolve_token(&self, practitioner_id: &str) -> Option<String> {
        self.tokens.get(practitioner_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_known_ids() {
        let creds = StaticCredentials::from_pairs([("123", "tok-123"), ("124", " tok-124 ")]);
        assert_eq!(creds.resolve_token("123").as_deref(), Some("tok-123"));
        assert_eq!(creds.resolve_token("124").as_deref(), Some("tok-124"));
        assert_eq!(creds.resolve_token("999"), None);
    }

    #[test]
    fn test_skips_blank_and_uninjected_tokens() {
        let creds = StaticCredentials::from_pairs([("1", ""), ("2", SECRET_MARKER), ("3", "ok")]);
        assert_eq!(creds.len(), 1);
        assert_eq!(creds.resolve_token("2"), None);
    }

    #[test]
    fn test_from_config() {
        let mut config = AppConfig::default();
        config
            .practitioners
            .insert("42".to_string(), "tok-42".to_string());
        let creds = StaticCredentials::from_config(&config);
        assert_eq!(creds.resolve_token("42").as_deref(), Some("tok-42"));
    }
}
