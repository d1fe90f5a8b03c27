pub mod claims;
pub mod errors;
pub mod issuer;
pub mod verifier;

pub use claims::SessionClaims;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;
