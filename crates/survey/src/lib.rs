//! Survey state for Strategos: the question catalog, the answers a user has
//! given, the password-gated vault that persists them, and the prompt the
//! answers are serialized into.

pub mod access;
pub mod catalog;
pub mod legal;
pub mod prompt;
pub mod responses;
pub mod store;
pub mod transfer;
pub mod vault;

pub use access::{AccessEvent, AccessState};
pub use catalog::{Catalog, Question, Section};
pub use responses::ResponseMap;
pub use store::{FileKvStore, KvStore, MemoryKvStore};
pub use vault::Vault;
