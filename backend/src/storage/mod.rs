//! Storage layer: trait boundary plus the CSV-file and in-memory backends.

pub mod csv;
pub mod memory;
pub mod traits;

pub use csv::CsvConnection;
pub use memory::MemoryKeyValueStore;
pub use traits::{
    Connection, DonationStorage, DonorStorage, ExpenseStorage, KeyValueStore, MemberStorage,
    StoreError,
};
