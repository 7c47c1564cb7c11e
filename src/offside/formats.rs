//! Output formats for token streams and block trees

pub mod dump;
pub mod treeviz;

pub use dump::{to_dump_str, to_json_str};
pub use treeviz::to_treeviz_str;
