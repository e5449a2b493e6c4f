//! Signed preview links for unpublished posts

mod token;
mod validator;

pub use token::PreviewToken;
pub use validator::{Clock, FixedClock, PreviewDenied, PreviewValidator, SystemClock};

#[cfg(test)]
pub(crate) use token::signature;
