pub mod from_json;
pub mod kind;

pub use from_json::FromJson;
pub use kind::JsonKind;
