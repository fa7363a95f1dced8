//! Registration flow: session checks, user lookup and challenge issuance

mod errors;
mod registration;

pub use errors::CoordinationError;
pub use registration::{
    FailureKind, FailureResponse, IssuedChallenge, LookupMissPolicy, RegistrationChallengeService,
    RegistrationFailure, RegistrationOutcome,
};
