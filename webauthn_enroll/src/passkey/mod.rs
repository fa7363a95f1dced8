mod challenge;
mod config;
mod errors;
mod types;

pub use challenge::{ChallengeGenerator, RandomChallengeGenerator};
pub use config::RegistrationConfig;
pub use errors::PasskeyError;
pub use types::{
    AuthenticatorSelection, ExcludeCredential, PubKeyCredParam, PublicKeyCredentialUserEntity,
    RegistrationOptions, RelyingParty,
};
