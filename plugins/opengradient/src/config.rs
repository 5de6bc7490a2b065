//! Credential configuration.
//!
//! Values passed explicitly take precedence over the environment. A `.env`
//! file in the working directory is loaded before the environment is read.

use std::fmt;

use agent_actions_core::ProviderError;

pub const PRIVATE_KEY_VAR: &str = "OPENGRADIENT_PRIVATE_KEY";
pub const EMAIL_VAR: &str = "OPENGRADIENT_EMAIL";
pub const PASSWORD_VAR: &str = "OPENGRADIENT_PASSWORD";

/// Optional credential overrides for the OpenGradient provider.
#[derive(Clone, Default)]
pub struct OpenGradientConfig {
    pub private_key: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl OpenGradientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Fill missing values from `.env` and the process environment.
    pub fn resolve(self) -> Result<Credentials, ProviderError> {
        dotenv::dotenv().ok();
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Fill missing values through `lookup` (usually an environment reader).
    pub fn resolve_with<F>(self, lookup: F) -> Result<Credentials, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<String>, var: &str| {
            non_blank(explicit).or_else(|| non_blank(lookup(var)))
        };

        let private_key = pick(self.private_key, PRIVATE_KEY_VAR)
            .ok_or(ProviderError::MissingCredential(PRIVATE_KEY_VAR))?;

        Ok(Credentials {
            private_key,
            email: pick(self.email, EMAIL_VAR),
            password: pick(self.password, PASSWORD_VAR),
        })
    }
}

impl fmt::Debug for OpenGradientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenGradientConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolved credentials handed to the SDK initializer.
#[derive(Clone)]
pub struct Credentials {
    pub private_key: String,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &"<redacted>")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
