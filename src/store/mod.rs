pub mod clock;
pub mod domain;
pub mod identity;
pub mod seed;
pub mod session;

pub use domain::DataStore;
pub use identity::IdentityStore;
