//! Session module - the authenticated user's context and the auth provider contract.

mod session_model;
mod session_traits;

pub use session_model::{AuthenticatedUser, Session};
pub use session_traits::AuthProviderTrait;
