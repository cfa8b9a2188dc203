//! Recognized configuration keys. None of them are required and none are
//! validated; they are listed so callers do not scatter string literals.

pub const API_KEY: &str = "API_KEY";

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_BASE_URL: &str = "ANTHROPIC_BASE_URL";
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const GOOGLE_BASE_URL: &str = "GOOGLE_BASE_URL";

pub const SYSTEM_PROMPT: &str = "SYSTEM_PROMPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Anthropic, Provider::Google];

    fn prefix(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI",
            Provider::Anthropic => "ANTHROPIC",
            Provider::Google => "GOOGLE",
        }
    }

    pub fn api_key(self) -> &'static str {
        match self {
            Provider::OpenAi => OPENAI_API_KEY,
            Provider::Anthropic => ANTHROPIC_API_KEY,
            Provider::Google => GOOGLE_API_KEY,
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Provider::OpenAi => OPENAI_BASE_URL,
            Provider::Anthropic => ANTHROPIC_BASE_URL,
            Provider::Google => GOOGLE_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelTier {
    Small,
    Medium,
    Large,
}

impl ModelTier {
    pub const ALL: [ModelTier; 3] = [ModelTier::Small, ModelTier::Medium, ModelTier::Large];

    fn suffix(self) -> &'static str {
        match self {
            ModelTier::Small => "SMALL",
            ModelTier::Medium => "MEDIUM",
            ModelTier::Large => "LARGE",
        }
    }
}

/// e.g. `ANTHROPIC_MODEL_LARGE`
pub fn model_override_key(provider: Provider, tier: ModelTier) -> String {
    format!("{}_MODEL_{}", provider.prefix(), tier.suffix())
}

pub fn recognized_keys() -> Vec<String> {
    let mut keys: Vec<String> = [API_KEY, SYSTEM_PROMPT]
        .iter()
        .map(|k| k.to_string())
        .collect();

    for provider in Provider::ALL {
        keys.push(provider.api_key().to_string());
        keys.push(provider.base_url().to_string());
        for tier in ModelTier::ALL {
            keys.push(model_override_key(provider, tier));
        }
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_override_keys() {
        assert_eq!(
            model_override_key(Provider::OpenAi, ModelTier::Small),
            "OPENAI_MODEL_SMALL"
        );
        assert_eq!(
            model_override_key(Provider::Anthropic, ModelTier::Large),
            "ANTHROPIC_MODEL_LARGE"
        );
    }

    #[test]
    fn test_recognized_keys_are_unique() {
        let keys = recognized_keys();
        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();

        assert_eq!(keys.len(), 2 + 3 * (2 + 3));
        assert_eq!(deduped.len(), keys.len());
        assert!(keys.iter().any(|k| k == "GOOGLE_MODEL_MEDIUM"));
    }
}
