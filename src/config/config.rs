use crate::Result;
use crate::facts::CollectError;
use camino::Utf8Path;
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;

/// Per-invocation settings.
///
/// `user` and `repo` are optional; an empty value means unset.
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Token used to authenticate against the GitHub API
    pub access_token: String,

    /// Login that stands in for a wildcard owner, instead of the token's own account
    pub user: String,

    /// Repository name that stands in for a wildcard repository, instead of every owned repository
    pub repo: String,

    /// Alternate API endpoint, such as a GitHub Enterprise server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("access_token", &if self.access_token.is_empty() { "" } else { "<redacted>" })
            .field("user", &self.user)
            .field("repo", &self.repo)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML, YAML or JSON file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;

        let config: Self = match path.extension() {
            Some("toml") | None => toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?,
            Some("yml" | "yaml") => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?,
            Some("json") => serde_json::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?,
            Some(other) => bail!("unsupported configuration file extension '{other}' for '{path}'"),
        };

        Ok(config)
    }

    /// Check the settings needed before any remote call is made.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Configuration`] when the access token is missing or the API URL is malformed
    pub fn validate(&self) -> Result<(), CollectError> {
        if self.access_token.trim().is_empty() {
            return Err(CollectError::Configuration("access_token is required".into()));
        }

        if let Some(api_url) = self.api_url() {
            let _ = url::Url::parse(api_url)
                .map_err(|e| CollectError::Configuration(format!("api_url '{api_url}' is not a valid URL: {e}")))?;
        }

        Ok(())
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.trim()
    }

    #[must_use]
    pub fn pinned_user(&self) -> Option<&str> {
        non_empty(&self.user)
    }

    #[must_use]
    pub fn pinned_repo(&self) -> Option<&str> {
        non_empty(&self.repo)
    }

    #[must_use]
    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref().and_then(non_empty)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "gitstats.toml", "access_token = \"abc\"\nuser = \"acme\"\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.access_token(), "abc");
        assert_eq!(config.pinned_user(), Some("acme"));
        assert_eq!(config.pinned_repo(), None);
        assert_eq!(config.api_url(), None);
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "gitstats.yml", "access_token: abc\nrepo: widget\napi_url: https://ghe.example.com/api/v3\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.pinned_repo(), Some("widget"));
        assert_eq!(config.api_url(), Some("https://ghe.example.com/api/v3"));
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "gitstats.json", r#"{"access_token": "abc", "user": ""}"#);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.pinned_user(), None);
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "gitstats.toml", "access_token = \"abc\"\norganization = \"acme\"\n");
        let _ = Config::load(&path).unwrap_err();
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "gitstats.ini", "access_token=abc");
        let _ = Config::load(&path).unwrap_err();
    }

    #[test]
    fn test_load_missing_file() {
        let _ = Config::load(Utf8Path::new("/nonexistent/gitstats.toml")).unwrap_err();
    }

    #[test]
    fn test_validate() {
        assert!(Config::new("abc").validate().is_ok());

        let err = Config::default().validate().unwrap_err();
        assert!(matches!(err, CollectError::Configuration(_)));

        let err = Config::new("   ").validate().unwrap_err();
        assert!(matches!(err, CollectError::Configuration(_)));

        let config = Config {
            api_url: Some("::not a url".into()),
            ..Config::new("abc")
        };
        assert!(matches!(config.validate().unwrap_err(), CollectError::Configuration(_)));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = Config {
            user: "  ".into(),
            repo: String::new(),
            api_url: Some(String::new()),
            ..Config::new("abc")
        };
        assert_eq!(config.pinned_user(), None);
        assert_eq!(config.pinned_repo(), None);
        assert_eq!(config.api_url(), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", Config::new("secret-token"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
