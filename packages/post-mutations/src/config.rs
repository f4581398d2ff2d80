use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Site configuration resolved once at startup.
///
/// Replaces the compile-time feature constants of the legacy deployment
/// with explicit named options passed down through `MutationDeps`.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Whether posts require admin approval before going live.
    pub moderation_enabled: bool,
    /// Whether the deployment tags posts with topic categories.
    pub categories_enabled: bool,
    /// Whether the deployment records "applies to" lists.
    pub applies_to_enabled: bool,
    /// Whether posts can reference other posts.
    pub references_enabled: bool,
    /// Whether the volunteering feature is deployed at all.
    pub volunteering_enabled: bool,
    /// Whether the volunteer sign-up route (and its form inputs) is live.
    pub volunteer_inputs_enabled: bool,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            moderation_enabled: bool_var("MODERATION_ENABLED", true)?,
            categories_enabled: bool_var("CATEGORIES_ENABLED", true)?,
            applies_to_enabled: bool_var("APPLIES_TO_ENABLED", false)?,
            references_enabled: bool_var("REFERENCES_ENABLED", true)?,
            volunteering_enabled: bool_var("VOLUNTEERING_ENABLED", false)?,
            volunteer_inputs_enabled: bool_var("VOLUNTEER_INPUTS_ENABLED", false)?,
        })
    }

    /// Configuration with every feature switched on (tests and demos).
    pub fn all_enabled() -> Self {
        Self {
            moderation_enabled: true,
            categories_enabled: true,
            applies_to_enabled: true,
            references_enabled: true,
            volunteering_enabled: true,
            volunteer_inputs_enabled: true,
        }
    }
}

fn bool_var(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(raw) => parse_bool(&raw).with_context(|| format!("{} must be a boolean", name)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
