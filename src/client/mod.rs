//! Query facade over the people directory
//!
//! `PeopleClient` issues searches and profile lookups through a
//! `DirectoryTransport` and maps the returned bags onto records.

#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod people_client;
pub mod query;
pub mod rest;
pub mod transport;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use people_client::PeopleClient;
pub use query::{SearchQuery, PEOPLE_RESULT_SOURCE_ID};
pub use rest::RestTransport;
pub use transport::DirectoryTransport;
