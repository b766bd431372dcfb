pub mod intersection;
pub mod occurrence;

pub use intersection::intersect_all;
pub use occurrence::{occurrences_across_files, OccurrenceMap};
