//! Connection settings.
//!
//! The settings file holds one `key=value` pair per line:
//!
//! ```text
//! # SolverAI account
//! token=0123456789abcdef
//! datamanagerUrl=https://datamanager.example.com
//! computerUrl=https://compute.example.com
//! ```

use std::path::Path;
use std::{fs, io};

use solverai_api::{SolverAiCredentials, Url};

const TOKEN_KEY: &str = "token";
const DATAMANAGER_URL_KEY: &str = "datamanagerUrl";
const COMPUTER_URL_KEY: &str = "computerUrl";

const TOKEN_ENV: &str = "SOLVERAI_TOKEN";
const DATAMANAGER_URL_ENV: &str = "SOLVERAI_DATAMANAGER_URL";
const COMPUTER_URL_ENV: &str = "SOLVERAI_COMPUTER_URL";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Line {line} is not a key=value pair: '{content}'")]
    MalformedLine { line: usize, content: String },
    #[error("Missing settings: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
    #[error("Invalid url for {key}: {reason}")]
    InvalidUrl { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverAiConfig {
    pub credentials: SolverAiCredentials,
    pub datamanager_url: Url,
    pub computer_url: Url,
}

impl SolverAiConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Read `SOLVERAI_TOKEN`, `SOLVERAI_DATAMANAGER_URL` and `SOLVERAI_COMPUTER_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let var = |name: &str| std::env::var(name).ok();
        Self::from_values(
            var(TOKEN_ENV),
            var(DATAMANAGER_URL_ENV),
            var(COMPUTER_URL_ENV),
            [TOKEN_ENV, DATAMANAGER_URL_ENV, COMPUTER_URL_ENV],
        )
    }

    /// Parse the contents of a settings file.
    ///
    /// Blank lines and lines starting with `#` are skipped. Keys and values are trimmed, and
    /// a later line overrides an earlier one with the same key.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut token = None;
        let mut datamanager_url = None;
        let mut computer_url = None;

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::MalformedLine {
                    line: index + 1,
                    content: raw.to_string(),
                });
            };
            let value = Some(value.trim().to_string());
            match key.trim() {
                TOKEN_KEY => token = value,
                DATAMANAGER_URL_KEY => datamanager_url = value,
                COMPUTER_URL_KEY => computer_url = value,
                other => log::warn!("Ignoring unknown setting '{other}'"),
            }
        }

        Self::from_values(
            token,
            datamanager_url,
            computer_url,
            [TOKEN_KEY, DATAMANAGER_URL_KEY, COMPUTER_URL_KEY],
        )
    }

    fn from_values(
        token: Option<String>,
        datamanager_url: Option<String>,
        computer_url: Option<String>,
        names: [&'static str; 3],
    ) -> Result<Self, ConfigError> {
        let values = [token, datamanager_url, computer_url]
            .map(|value| value.filter(|v| !v.trim().is_empty()));
        let missing: Vec<&'static str> = names
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        let [Some(token), Some(datamanager_url), Some(computer_url)] = values else {
            return Err(ConfigError::MissingKeys(missing));
        };

        Ok(Self {
            credentials: SolverAiCredentials::new(token.trim()),
            datamanager_url: parse_url(names[1], &datamanager_url)?,
            computer_url: parse_url(names[2], &computer_url)?,
        })
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        key,
        reason: format!("{value}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn reads_the_three_settings() {
        let config = SolverAiConfig::parse(
            "# account\n\ntoken = abc \ndatamanagerUrl=https://dm.example.com\n  computerUrl=https://cp.example.com/api\n",
        )
        .unwrap();

        assert_eq!(config.credentials, SolverAiCredentials::new("abc"));
        assert_eq!(config.datamanager_url.as_str(), "https://dm.example.com/");
        assert_eq!(config.computer_url.as_str(), "https://cp.example.com/api");
    }

    #[test]
    fn every_missing_key_is_reported() {
        let err =
            SolverAiConfig::parse("computerUrl=https://cp.example.com\ntoken=\n").unwrap_err();

        let ConfigError::MissingKeys(missing) = &err else {
            panic!("expected missing keys, got {err:?}");
        };
        assert_eq!(missing, &vec!["token", "datamanagerUrl"]);
        assert_eq!(err.to_string(), "Missing settings: token, datamanagerUrl");
    }

    #[rstest]
    #[case("token abc", 1)]
    #[case("# header\ntoken=abc\njust text", 3)]
    fn lines_without_separator_are_rejected(#[case] contents: &str, #[case] line: usize) {
        let err = SolverAiConfig::parse(contents).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line: l, .. } if l == line));
    }

    #[test]
    fn values_may_contain_equal_signs() {
        let config = SolverAiConfig::parse(
            "token=a=b\ndatamanagerUrl=https://dm.example.com/?x=1\ncomputerUrl=https://cp.example.com\n",
        )
        .unwrap();
        assert_eq!(config.credentials, SolverAiCredentials::new("a=b"));
    }

    #[test]
    fn invalid_url_names_its_key() {
        let err = SolverAiConfig::parse("token=t\ndatamanagerUrl=nope\ncomputerUrl=https://c.io\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl { key: "datamanagerUrl", .. }
        ));
    }

    #[test]
    fn reads_a_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solverai.conf");
        fs::write(
            &path,
            "token=t\ndatamanagerUrl=https://dm.example.com\ncomputerUrl=https://cp.example.com\n",
        )
        .unwrap();

        let config = SolverAiConfig::from_file(&path).unwrap();

        assert_eq!(config.computer_url.host_str(), Some("cp.example.com"));
        assert!(matches!(
            SolverAiConfig::from_file(dir.path().join("absent.conf")),
            Err(ConfigError::Io(_))
        ));
    }
}
