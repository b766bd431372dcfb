pub mod format;
pub mod record_extractor;

pub use format::InputFormat;
pub use record_extractor::{extract, load_record, AddressSet, FileRecord};
