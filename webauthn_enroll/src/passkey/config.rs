use std::env;

use super::errors::PasskeyError;

/// Relying-party settings used to build registration options.
///
/// Built once at startup and handed to the registration service.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationConfig {
    pub rp_id: String,
    pub rp_name: String,
    /// Client-side ceremony timeout in milliseconds
    pub timeout_ms: u32,
    pub attestation: String,
    /// `None` lets the browser offer both platform and roaming authenticators
    pub authenticator_attachment: Option<String>,
    pub resident_key: String,
    pub require_resident_key: bool,
    pub user_verification: String,
}

impl RegistrationConfig {
    pub fn new(rp_id: impl Into<String>, rp_name: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            rp_id: rp_id.into(),
            rp_name: rp_name.into(),
            timeout_ms,
            attestation: "none".to_string(),
            authenticator_attachment: None,
            resident_key: "preferred".to_string(),
            require_resident_key: false,
            user_verification: "preferred".to_string(),
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `ORIGIN` is required. `PASSKEY_RP_ID` defaults to the host part of `ORIGIN`,
    /// `PASSKEY_RP_NAME` defaults to `ORIGIN` and `PASSKEY_TIMEOUT` is in seconds
    /// (default 60). Invalid enum-like values fall back to their default with a warning.
    pub fn from_env() -> Result<Self, PasskeyError> {
        let origin = env::var("ORIGIN")
            .map_err(|_| PasskeyError::Config("ORIGIN must be set".to_string()))?;

        let rp_id = match env::var("PASSKEY_RP_ID").ok() {
            Some(rp_id) => rp_id,
            None => rp_id_from_origin(&origin).ok_or_else(|| {
                PasskeyError::Config(format!("Could not extract RP ID from ORIGIN: {origin}"))
            })?,
        };

        let rp_name = env::var("PASSKEY_RP_NAME").unwrap_or_else(|_| origin.clone());

        Ok(Self {
            rp_id,
            rp_name,
            timeout_ms: parse_timeout_secs(env::var("PASSKEY_TIMEOUT").ok()).saturating_mul(1000),
            attestation: parse_attestation(env::var("PASSKEY_ATTESTATION").ok()),
            authenticator_attachment: parse_authenticator_attachment(
                env::var("PASSKEY_AUTHENTICATOR_ATTACHMENT").ok(),
            ),
            resident_key: parse_requirement(
                "resident key",
                env::var("PASSKEY_RESIDENT_KEY").ok(),
                "preferred",
            ),
            require_resident_key: parse_bool(
                "require_resident_key",
                env::var("PASSKEY_REQUIRE_RESIDENT_KEY").ok(),
                false,
            ),
            user_verification: parse_requirement(
                "user verification",
                env::var("PASSKEY_USER_VERIFICATION").ok(),
                "preferred",
            ),
        })
    }
}

pub(super) fn rp_id_from_origin(origin: &str) -> Option<String> {
    origin
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .split(['/', ':'])
        .next()
        .filter(|host| !host.is_empty())
        .map(|host| host.to_string())
}

fn parse_timeout_secs(value: Option<String>) -> u32 {
    value.map(|v| v.parse::<u32>().unwrap_or(60)).unwrap_or(60)
}

fn parse_attestation(value: Option<String>) -> String {
    match value {
        None => "none".to_string(),
        Some(v) => match v.to_lowercase().as_str() {
            "none" => "none".to_string(),
            "direct" => "direct".to_string(),
            "indirect" => "indirect".to_string(),
            "enterprise" => "enterprise".to_string(),
            invalid => {
                tracing::warn!("Invalid attestation: {}. Using default 'none'", invalid);
                "none".to_string()
            }
        },
    }
}

fn parse_authenticator_attachment(value: Option<String>) -> Option<String> {
    match value?.to_lowercase().as_str() {
        "platform" => Some("platform".to_string()),
        "cross-platform" => Some("cross-platform".to_string()),
        "none" | "" => None,
        invalid => {
            tracing::warn!(
                "Invalid authenticator attachment: {}. Leaving it unset",
                invalid
            );
            None
        }
    }
}

fn parse_requirement(label: &str, value: Option<String>, default: &str) -> String {
    match value {
        None => default.to_string(),
        Some(v) => match v.to_lowercase().as_str() {
            "required" => "required".to_string(),
            "preferred" => "preferred".to_string(),
            "discouraged" => "discouraged".to_string(),
            invalid => {
                tracing::warn!("Invalid {}: {}. Using default '{}'", label, invalid, default);
                default.to_string()
            }
        },
    }
}

fn parse_bool(label: &str, value: Option<String>, default: bool) -> bool {
    match value {
        None => default,
        Some(v) => match v.to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            invalid => {
                tracing::warn!("Invalid {}: {}. Using default '{}'", label, invalid, default);
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_rp_id_from_origin() {
        assert_eq!(
            rp_id_from_origin("https://example.com"),
            Some("example.com".to_string())
        );
        assert_eq!(
            rp_id_from_origin("http://localhost:3001"),
            Some("localhost".to_string())
        );
        assert_eq!(
            rp_id_from_origin("https://auth.example.com/path"),
            Some("auth.example.com".to_string())
        );
        assert_eq!(rp_id_from_origin("https://"), None);
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs(None), 60);
        assert_eq!(parse_timeout_secs(Some("120".to_string())), 120);
        assert_eq!(parse_timeout_secs(Some("soon".to_string())), 60);
    }

    #[test]
    fn test_parse_attestation() {
        assert_eq!(parse_attestation(None), "none");
        assert_eq!(parse_attestation(Some("DIRECT".to_string())), "direct");
        assert_eq!(parse_attestation(Some("bogus".to_string())), "none");
    }

    #[test]
    fn test_parse_authenticator_attachment() {
        assert_eq!(parse_authenticator_attachment(None), None);
        assert_eq!(
            parse_authenticator_attachment(Some("Platform".to_string())),
            Some("platform".to_string())
        );
        assert_eq!(
            parse_authenticator_attachment(Some("cross-platform".to_string())),
            Some("cross-platform".to_string())
        );
        assert_eq!(parse_authenticator_attachment(Some("none".to_string())), None);
        assert_eq!(parse_authenticator_attachment(Some("usb".to_string())), None);
    }

    #[test]
    fn test_parse_requirement_and_bool() {
        assert_eq!(parse_requirement("uv", None, "preferred"), "preferred");
        assert_eq!(
            parse_requirement("uv", Some("Required".to_string()), "preferred"),
            "required"
        );
        assert_eq!(
            parse_requirement("uv", Some("always".to_string()), "discouraged"),
            "discouraged"
        );
        assert!(parse_bool("rrk", Some("TRUE".to_string()), false));
        assert!(!parse_bool("rrk", Some("maybe".to_string()), false));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        let saved: Vec<(&str, Option<String>)> = [
            "ORIGIN",
            "PASSKEY_RP_ID",
            "PASSKEY_RP_NAME",
            "PASSKEY_TIMEOUT",
        ]
        .into_iter()
        .map(|k| (k, env::var(k).ok()))
        .collect();

        unsafe {
            env::set_var("ORIGIN", "https://login.example.org:8443");
            env::remove_var("PASSKEY_RP_ID");
            env::set_var("PASSKEY_RP_NAME", "Example Login");
            env::set_var("PASSKEY_TIMEOUT", "90");
        }

        let config = RegistrationConfig::from_env();

        unsafe {
            env::remove_var("ORIGIN");
        }
        let missing_origin = RegistrationConfig::from_env();

        for (key, value) in saved {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }

        let config = config.unwrap();
        assert_eq!(config.rp_id, "login.example.org");
        assert_eq!(config.rp_name, "Example Login");
        assert_eq!(config.timeout_ms, 90_000);
        assert!(matches!(missing_origin, Err(PasskeyError::Config(_))));
    }
}
