//! Request dispatch: result records, status classification, per-host probing
//! and the cross-host dispatcher.
mod dispatcher;
mod policy;
mod prober;
mod record;


pub use dispatcher::{DispatchSettings, Dispatcher, HostRecords, RunResults, dedup_hosts};
pub use policy::StatusPolicy;
pub use record::{ConnectionErrorKind, Outcome, ResultRecord};
