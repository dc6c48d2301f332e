//! Bearer token supply for outgoing requests

use async_trait::async_trait;

/// Supplies the bearer token attached to each request.
///
/// `None` sends the request without an `Authorization` header.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Option<String>;
}

/// A token fixed at construction, typically from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticToken {
    fn from(token: Option<String>) -> Self {
        // Blank values from the environment count as unset
        Self(token.filter(|t| !t.trim().is_empty()))
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        let token = StaticToken::new("abc");
        assert_eq!(tokio_test::block_on(token.bearer_token()), Some("abc".into()));
    }

    #[test]
    fn test_blank_token_is_unset() {
        let token = StaticToken::from(Some("  ".to_string()));
        assert_eq!(tokio_test::block_on(token.bearer_token()), None);
        assert_eq!(tokio_test::block_on(StaticToken::none().bearer_token()), None);
    }
}
