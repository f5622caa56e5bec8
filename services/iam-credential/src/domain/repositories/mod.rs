mod user_record_store;

pub use user_record_store::*;
