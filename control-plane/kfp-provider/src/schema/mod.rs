mod id;
mod metadata;

pub use id::{build_id, parse_id};
pub use metadata::MetadataBlock;
