//! Dog registrations per owner
//!
//! Records live in the hosted backend; [`RecordStore`] is the interface the
//! registration page talks to and [`MemoryRecordStore`] is the in-process
//! stand-in.
//!
//! ```text
//! User (1) ──< DogRecord (0..=4)
//! ```

mod dog_record;
mod store;

pub use dog_record::{DogClass, DogFields, DogRecord, DogRecordBuilder, Event};
pub use store::MemoryRecordStore;

use crate::Result;
use std::future::Future;

/// Default per-owner registration cap.
pub const MAX_DOGS: usize = 4;

/// Remote record store for dog registrations.
pub trait RecordStore: Send + Sync {
    /// Records owned by `owner_id`, oldest first.
    fn list(&self, owner_id: &str) -> impl Future<Output = Result<Vec<DogRecord>>> + Send;

    /// Insert a record; returns it with the assigned id.
    ///
    /// The per-owner cap is enforced by the caller before this is reached.
    fn insert(&self, record: DogRecord) -> impl Future<Output = Result<DogRecord>> + Send;

    /// Replace breed, class and events of record `id`.
    fn update(
        &self,
        id: &str,
        fields: DogFields,
    ) -> impl Future<Output = Result<DogRecord>> + Send;

    /// Remove record `id`.
    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}
