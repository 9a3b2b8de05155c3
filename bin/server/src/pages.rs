//! Page components for the application.
//!
//! Each page mounts its own third-party-auth flow and renders the branch
//! the flow resolves to.

pub mod login;
pub mod register;

pub use login::LoginPage;
pub use register::RegisterPage;
