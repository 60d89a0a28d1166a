//! Identity provider abstractions and the SES implementation

mod ses;
mod traits;

#[cfg(test)]
pub mod mock;

pub use ses::{SesClientConfig, SesIdentityProvider};
pub use traits::*;

#[cfg(test)]
pub use mock::MockIdentityProvider;
