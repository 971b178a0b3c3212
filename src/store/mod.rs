mod fixed_store;
mod record_store;
mod split;

pub use self::fixed_store::FixedRecordStore;
pub use self::record_store::{RecordStore, StoreEntry, APEX_NAME};
pub use self::split::{split_domain, SplitName};
