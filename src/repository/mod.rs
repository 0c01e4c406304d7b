//! Data access layer (Repository pattern)
//!
//! Durable storage belongs to each service's own store. The services only
//! depend on [`Repository`]; [`memory::InMemoryRepository`] backs it when
//! a service runs standalone and in tests.

pub mod memory;

pub use memory::InMemoryRepository;

use crate::domain::{
    CourtHearing, CrimeReport, DrivingBan, Plates, Suspension, TrafficPermit, TrafficStatistic,
    TrafficViolation, Vehicle, VehicleRegistration, Warrant,
};
use crate::error::Result;
use async_trait::async_trait;

/// Entity addressable by a string id
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Storage for one entity kind
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    async fn list(&self) -> Result<Vec<T>>;

    /// Store a new record; an empty id is replaced by a generated one.
    async fn create(&self, record: T) -> Result<T>;

    /// Replace an existing record. Fails with `NotFound` if it is absent.
    async fn update(&self, record: T) -> Result<T>;

    async fn delete(&self, id: &str) -> Result<()>;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )*
    };
}

impl_record!(
    Warrant,
    Suspension,
    CrimeReport,
    DrivingBan,
    TrafficPermit,
    Vehicle,
    VehicleRegistration,
    Plates,
    TrafficViolation,
    TrafficStatistic,
);

impl Record for CourtHearing {
    fn id(&self) -> &str {
        CourtHearing::id(self)
    }

    fn set_id(&mut self, id: String) {
        CourtHearing::set_id(self, id)
    }
}
