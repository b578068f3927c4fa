pub mod json;
pub mod parse_api;

pub use json::{decode_json, decode_record};
pub use parse_api::ParseClient;
