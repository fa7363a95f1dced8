use serde::{Deserialize, Serialize};

use crate::userdb::Authenticator;

/// Options for `navigator.credentials.create()`.
///
/// Serialized in the shape of WebAuthn `PublicKeyCredentialCreationOptions`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOptions {
    pub challenge: String,
    pub rp_id: String,
    pub rp: RelyingParty,
    pub user: PublicKeyCredentialUserEntity,
    pub pub_key_cred_params: Vec<PubKeyCredParam>,
    pub authenticator_selection: AuthenticatorSelection,
    pub timeout: u32,
    pub attestation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_credentials: Option<Vec<ExcludeCredential>>,
}

impl RegistrationOptions {
    pub fn exclude_credentials(&self) -> &[ExcludeCredential] {
        self.exclude_credentials.as_deref().unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RelyingParty {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PublicKeyCredentialUserEntity {
    /// User handle
    pub id: String,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PubKeyCredParam {
    #[serde(rename = "type")]
    pub type_: String,
    pub alg: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_attachment: Option<String>,
    pub resident_key: String,
    pub require_resident_key: bool,
    pub user_verification: String,
}

/// Credential the authenticator must refuse to register again.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExcludeCredential {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
}

impl From<&Authenticator> for ExcludeCredential {
    fn from(authenticator: &Authenticator) -> Self {
        Self {
            id: authenticator.cred_id.clone(),
            type_: authenticator.type_.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_options() -> RegistrationOptions {
        RegistrationOptions {
            challenge: "abc".to_string(),
            rp_id: "example.com".to_string(),
            rp: RelyingParty {
                id: "example.com".to_string(),
                name: "Example".to_string(),
            },
            user: PublicKeyCredentialUserEntity {
                id: "u1".to_string(),
                name: "alice".to_string(),
                display_name: "alice".to_string(),
            },
            pub_key_cred_params: vec![PubKeyCredParam {
                type_: "public-key".to_string(),
                alg: -7,
            }],
            authenticator_selection: AuthenticatorSelection {
                authenticator_attachment: None,
                resident_key: "preferred".to_string(),
                require_resident_key: false,
                user_verification: "preferred".to_string(),
            },
            timeout: 60000,
            attestation: "none".to_string(),
            exclude_credentials: None,
        }
    }

    #[test]
    fn test_registration_options_wire_shape() {
        let json = serde_json::to_value(sample_options()).unwrap();

        assert_eq!(json["challenge"], "abc");
        assert_eq!(json["rpId"], "example.com");
        assert_eq!(json["rp"]["id"], "example.com");
        assert_eq!(json["rp"]["name"], "Example");
        assert_eq!(json["user"]["id"], "u1");
        assert_eq!(json["user"]["displayName"], "alice");
        assert_eq!(json["pubKeyCredParams"][0]["type"], "public-key");
        assert_eq!(json["authenticatorSelection"]["residentKey"], "preferred");
        assert!(
            json["authenticatorSelection"]
                .get("authenticatorAttachment")
                .is_none()
        );
        assert_eq!(json["timeout"], 60000);
        assert!(json.get("excludeCredentials").is_none());
    }

    #[test]
    fn test_exclude_credentials_serialized_when_present() {
        let mut options = sample_options();
        options.exclude_credentials = Some(vec![ExcludeCredential {
            id: "cred-1".to_string(),
            type_: "public-key".to_string(),
        }]);

        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(
            json["excludeCredentials"],
            serde_json::json!([{"id": "cred-1", "type": "public-key"}])
        );
        assert_eq!(options.exclude_credentials().len(), 1);
    }

    #[test]
    fn test_exclude_credential_from_authenticator() {
        let authenticator = Authenticator {
            cred_id: "raw-id".to_string(),
            type_: "public-key".to_string(),
        };
        let exclude = ExcludeCredential::from(&authenticator);
        assert_eq!(exclude.id, "raw-id");
        assert_eq!(exclude.type_, "public-key");
    }
}
