pub mod config;
pub mod dates;
pub mod keywords;
pub mod progress;
pub mod session;
pub mod store;
pub mod streak;
pub mod words;

pub use config::Config;
pub use session::{HistoryEntry, LoadTicket, Session, SessionEvent, SessionWarning};
pub use store::EntryStore;

#[cfg(test)]
pub(crate) mod tests;
