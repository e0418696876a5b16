pub mod claims;
pub mod errors;
pub mod issuer;
pub mod settings;
pub mod validator;

pub use claims::Principal;
pub use claims::TokenClaims;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use settings::TokenSettings;
pub use validator::TokenValidator;
