//! Bearer token verification
//!
//! Sessions are issued elsewhere; this crate only checks the tokens and can
//! mint access tokens for operators and tests.

mod jwt;

pub use jwt::{Claims, JwtService, TokenType};
