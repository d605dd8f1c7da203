use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ZENDESK_SUBDOMAIN environment variable is required")]
    MissingSubdomain,
    #[error("Must provide either ZENDESK_OAUTH_TOKEN or ZENDESK_EMAIL+ZENDESK_API_TOKEN")]
    MissingCredentials,
}

/// Account credentials. Exactly one scheme is in effect per client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Email + API token pair, sent as HTTP Basic auth.
    Basic { email: String, token: String },
    /// OAuth access token, sent as a bearer token.
    Bearer { token: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub subdomain: String,
    pub credentials: Credentials,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// An OAuth token takes precedence over the email + API token pair.
    /// Empty values are treated as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            env_var("ZENDESK_SUBDOMAIN"),
            env_var("ZENDESK_OAUTH_TOKEN"),
            env_var("ZENDESK_EMAIL"),
            env_var("ZENDESK_API_TOKEN"),
        )
    }

    pub fn resolve(
        subdomain: Option<String>,
        oauth_token: Option<String>,
        email: Option<String>,
        api_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        let subdomain = subdomain.ok_or(ConfigError::MissingSubdomain)?;

        let credentials = match (oauth_token, email, api_token) {
            (Some(token), _, _) => Credentials::Bearer { token },
            (None, Some(email), Some(token)) => Credentials::Basic { email, token },
            _ => return Err(ConfigError::MissingCredentials),
        };

        Ok(Self {
            subdomain,
            credentials,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_token_wins() {
        let config = Config::resolve(
            Some("acme".into()),
            Some("oauth123".into()),
            Some("agent@acme.com".into()),
            Some("api456".into()),
        )
        .unwrap();

        assert_eq!(
            config.credentials,
            Credentials::Bearer {
                token: "oauth123".into()
            }
        );
    }

    #[test]
    fn test_email_token_pair() {
        let config = Config::resolve(
            Some("acme".into()),
            None,
            Some("agent@acme.com".into()),
            Some("api456".into()),
        )
        .unwrap();

        assert_eq!(
            config.credentials,
            Credentials::Basic {
                email: "agent@acme.com".into(),
                token: "api456".into()
            }
        );
    }

    #[test]
    fn test_missing_subdomain() {
        let err = Config::resolve(None, Some("oauth123".into()), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSubdomain));
    }

    #[test]
    fn test_no_credentials_is_fatal() {
        let err = Config::resolve(Some("acme".into()), None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials));
    }

    #[test]
    fn test_partial_basic_pair_is_fatal() {
        let err = Config::resolve(
            Some("acme".into()),
            None,
            Some("agent@acme.com".into()),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials));
    }
}
