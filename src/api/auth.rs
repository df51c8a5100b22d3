//! IBM Cloud credentials
//!
//! Requests carry an IAM bearer token supplied by the caller. Obtaining and
//! refreshing that token is left to the surrounding tooling (`ibmcloud iam
//! oauth-tokens`); this module only picks it up and keeps it out of logs.

use anyhow::{anyhow, Result};
use std::fmt;

/// Environment variables checked for an IAM token, in order
pub const TOKEN_ENV_VARS: &[&str] = &["IC_IAM_TOKEN", "IBMCLOUD_IAM_TOKEN"];

/// Environment variables checked for a default region, in order
pub const REGION_ENV_VARS: &[&str] = &["IC_REGION", "IBMCLOUD_REGION"];

/// Bearer token holder
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Wrap a token, accepting the `Bearer ` prefix `ibmcloud` prints
    pub fn new(token: &str) -> Result<Self> {
        let token = token.trim();
        let token = match token.split_once(char::is_whitespace) {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
            _ if token.eq_ignore_ascii_case("bearer") => "",
            _ => token,
        };

        if token.is_empty() {
            return Err(anyhow!("IAM token is empty"));
        }

        Ok(Self {
            token: token.to_string(),
        })
    }

    /// Read the token from the environment
    pub fn from_env() -> Result<Self> {
        for var in TOKEN_ENV_VARS {
            if let Ok(value) = std::env::var(var) {
                if !value.trim().is_empty() {
                    tracing::debug!("Using IAM token from {}", var);
                    return Self::new(&value);
                }
            }
        }
        Err(anyhow!(
            "No IAM token found. Export IC_IAM_TOKEN, e.g. from 'ibmcloud iam oauth-tokens'"
        ))
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &mask_credential(&self.token))
            .finish()
    }
}

/// Mask sensitive credential values for logging
fn mask_credential(value: &str) -> String {
    let count = value.chars().count();
    if count <= 8 {
        "*".repeat(count)
    } else {
        let head: String = value.chars().take(4).collect();
        let tail: String = value.chars().skip(count - 4).collect();
        format!("{}...{}", head, tail)
    }
}

/// Validate a region name such as `us-south` or `eu-de`.
/// Lowercase letters, digits and hyphens; must start with a letter and not end with a hyphen.
pub fn validate_region(region: &str) -> bool {
    if region.len() < 2 || region.len() > 32 {
        return false;
    }

    match region.chars().next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }

    if region.ends_with('-') {
        return false;
    }

    region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Read the default region from the environment
/// Security: Validates region format before returning
pub fn get_default_region() -> Option<String> {
    for var in REGION_ENV_VARS {
        if let Ok(region) = std::env::var(var) {
            if validate_region(&region) {
                return Some(region);
            }
            tracing::warn!("Invalid region format in {}", var);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_prefix_is_stripped() {
        let creds = Credentials::new("Bearer eyJhbGciOi.payload.sig").unwrap();
        assert_eq!(creds.token(), "eyJhbGciOi.payload.sig");
    }

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(Credentials::new("  ").is_err());
        assert!(Credentials::new("Bearer ").is_err());
    }

    #[test]
    fn test_debug_masks_token() {
        let creds = Credentials::new("abcdefghijklmnop").unwrap();
        let printed = format!("{:?}", creds);
        assert!(printed.contains("abcd...mnop"));
        assert!(!printed.contains("efghijkl"));
    }

    #[test]
    fn test_debug_masks_non_ascii_token() {
        let creds = Credentials::new("ééééé-token-ééééé").unwrap();
        let printed = format!("{:?}", creds);
        assert!(printed.contains("éééé...éééé"));
        assert_eq!(mask_credential("ü-ü-ü"), "*****");
    }

    #[test]
    fn test_validate_region() {
        assert!(validate_region("us-south"));
        assert!(validate_region("eu-de"));
        assert!(!validate_region("US-South"));
        assert!(!validate_region("us-south-"));
        assert!(!validate_region("1us"));
        assert!(!validate_region("us/south"));
    }
}
