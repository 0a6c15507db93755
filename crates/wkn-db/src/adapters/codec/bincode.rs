use crate::domain::database::Database;
use crate::ports::outbound::DatabaseCodec;

/// Compact binary encoding using bincode.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeCodec;

impl DatabaseCodec for BincodeCodec {
    fn encode(&self, db: &Database) -> Result<Vec<u8>, String> {
        bincode::serialize(db).map_err(|e| e.to_string())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Database, String> {
        bincode::deserialize(bytes).map_err(|e| e.to_string())
    }
}
