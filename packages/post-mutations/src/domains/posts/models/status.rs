use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Status enum for custom posts.
///
/// These are the only statuses a create/update mutation may produce. A
/// stored value outside this set (e.g. `trash`) marks a post this layer
/// treats as deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Pending,
    /// Serialized as `publish`, matching the upstream CMS wire value.
    #[serde(rename = "publish")]
    Published,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Pending => write!(f, "pending"),
            PostStatus::Published => write!(f, "publish"),
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "pending" => Ok(PostStatus::Pending),
            "publish" => Ok(PostStatus::Published),
            _ => Err(anyhow::anyhow!("Invalid post status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fromstr_roundtrip() {
        for status in [PostStatus::Draft, PostStatus::Pending, PostStatus::Published] {
            let parsed: PostStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_trash_is_not_a_live_status() {
        assert!("trash".parse::<PostStatus>().is_err());
    }
}
