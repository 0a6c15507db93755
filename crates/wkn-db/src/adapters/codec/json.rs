use crate::domain::database::Database;
use crate::ports::outbound::DatabaseCodec;

/// JSON object of `name -> [int, ...]`. The default on-disk format.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl DatabaseCodec for JsonCodec {
    fn encode(&self, db: &Database) -> Result<Vec<u8>, String> {
        serde_json::to_vec(db).map_err(|e| e.to_string())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Database, String> {
        serde_json::from_slice(bytes).map_err(|e| e.to_string())
    }
}
