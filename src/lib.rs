//! Client library for querying people in a SharePoint directory
//!
//! People can be found by keyword search or loaded by account name from the
//! user profile service. Results arrive as loosely typed property bags and are
//! mapped onto records through per-field descriptors, see [`mapper`].

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod person;
pub mod term;

pub use client::{DirectoryTransport, PeopleClient, RestTransport, SearchQuery};
#[cfg(any(test, feature = "mock"))]
pub use client::MockTransport;
pub use config::{load_client_config, ClientConfig, Credentials};
pub use error::{PeopleError, PeopleResult};
pub use mapper::{map_from_bag, FieldMapping, MappedRecord, PropertyBag, RecordMapper, Shape};
pub use person::Person;
pub use term::KeywordTerm;
