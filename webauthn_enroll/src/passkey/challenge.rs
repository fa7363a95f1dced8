use super::config::RegistrationConfig;
use super::errors::PasskeyError;
use super::types::{
    AuthenticatorSelection, PubKeyCredParam, PublicKeyCredentialUserEntity, RegistrationOptions,
    RelyingParty,
};

use crate::utils::gen_random_string;

/// Number of random bytes in a registration challenge.
const CHALLENGE_LEN: usize = 32;

/// COSE algorithms offered to the authenticator: ES256 then RS256.
const PUB_KEY_ALGS: [i32; 2] = [-7, -257];

/// Source of registration options.
pub trait ChallengeGenerator: Send + Sync {
    /// Produce fresh registration options with a new random challenge.
    fn registration(
        &self,
        user_name: &str,
        display_name: &str,
        user_handle: &str,
    ) -> Result<RegistrationOptions, PasskeyError>;
}

/// Generator drawing challenges from the system CSPRNG.
#[derive(Debug, Clone)]
pub struct RandomChallengeGenerator {
    config: RegistrationConfig,
}

impl RandomChallengeGenerator {
    pub fn new(config: RegistrationConfig) -> Self {
        Self { config }
    }
}

impl ChallengeGenerator for RandomChallengeGenerator {
    fn registration(
        &self,
        user_name: &str,
        display_name: &str,
        user_handle: &str,
    ) -> Result<RegistrationOptions, PasskeyError> {
        let challenge = gen_random_string(CHALLENGE_LEN)?;

        let options = RegistrationOptions {
            challenge,
            rp_id: self.config.rp_id.clone(),
            rp: RelyingParty {
                id: self.config.rp_id.clone(),
                name: self.config.rp_name.clone(),
            },
            user: PublicKeyCredentialUserEntity {
                id: user_handle.to_string(),
                name: user_name.to_string(),
                display_name: display_name.to_string(),
            },
            pub_key_cred_params: PUB_KEY_ALGS
                .iter()
                .map(|alg| PubKeyCredParam {
                    type_: "public-key".to_string(),
                    alg: *alg,
                })
                .collect(),
            authenticator_selection: AuthenticatorSelection {
                authenticator_attachment: self.config.authenticator_attachment.clone(),
                resident_key: self.config.resident_key.clone(),
                require_resident_key: self.config.require_resident_key,
                user_verification: self.config.user_verification.clone(),
            },
            timeout: self.config.timeout_ms,
            attestation: self.config.attestation.clone(),
            exclude_credentials: None,
        };

        tracing::debug!("Registration options: {:?}", options);

        Ok(options)
    }
}
