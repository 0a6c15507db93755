//! Codec Adapters
//!
//! Implementations of the `DatabaseCodec` trait.

mod bincode;
mod json;

pub use self::bincode::BincodeCodec;
pub use self::json::JsonCodec;

use crate::domain::config::DatabaseFormat;
use crate::ports::outbound::DatabaseCodec;

/// Codec for a configured format.
pub fn codec_for(format: DatabaseFormat) -> Box<dyn DatabaseCodec> {
    match format {
        DatabaseFormat::Json => Box::new(JsonCodec),
        DatabaseFormat::Bincode => Box::new(BincodeCodec),
    }
}
