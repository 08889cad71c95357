pub mod layout;
pub mod wal;
