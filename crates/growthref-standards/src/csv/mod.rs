pub mod lms;

pub use lms::parse_lms_bytes;
