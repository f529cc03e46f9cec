use std::str::FromStr;

/// Credentials to connect to the SolverAI services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverAiCredentials {
    token: String,
}

impl SolverAiCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Creates a new instance of `SolverAiCredentials` from environment variables.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let token = std::env::var("SOLVERAI_TOKEN")?;
        Ok(Self::new(token))
    }

    /// Value of the `Authorization` header sent with every request.
    pub fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }
}

impl FromStr for SolverAiCredentials {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err("Token cannot be empty".to_string())
        } else {
            Ok(Self::new(s))
        }
    }
}

impl From<&str> for SolverAiCredentials {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for SolverAiCredentials {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}
