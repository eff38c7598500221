mod entry;
mod user_record;

pub use entry::{Entry, UNSPECIFIED_CATEGORY, UNTITLED};
pub use user_record::UserRecord;
