use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::adapters::codec::codec_for;
use crate::adapters::lock::DatabaseLock;
use crate::domain::config::{CorruptPolicy, StoreConfig};
use crate::domain::database::Database;
use crate::domain::errors::StoreError;
use crate::ports::outbound::{DatabaseCodec, DatabaseStore};

/// Lock-protected, file-backed database store.
///
/// Every `load` and `save` takes the database lock, touches the backing file,
/// and releases the lock before returning, on success and on every error path.
/// Saves write a sibling temp file and rename it over the backing file, so a
/// crash mid-write never leaves a truncated database.
///
/// Concurrent writers are last-writer-wins across the whole file: a save
/// replaces whatever another process saved after this process's last load.
pub struct FileDatabaseStore {
    config: StoreConfig,
    codec: Box<dyn DatabaseCodec>,
}

impl FileDatabaseStore {
    /// Create a store using the codec selected by `config.format`.
    pub fn new(config: StoreConfig) -> Self {
        let codec = codec_for(config.format);
        Self { config, codec }
    }

    /// Create a store with an explicit codec, ignoring `config.format`.
    pub fn with_codec<C: DatabaseCodec + 'static>(config: StoreConfig, codec: C) -> Self {
        Self {
            config,
            codec: Box::new(codec),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.config.db_path
    }

    /// Create an empty backing file if none exists.
    ///
    /// Returns `true` if the file was created, `false` if it already existed.
    pub fn ensure_exists(&self) -> Result<bool, StoreError> {
        let path = &self.config.db_path;
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => {
                debug!(path = %path.display(), "created empty database file");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if path.is_dir() {
                    return Err(StoreError::Io {
                        path: path.clone(),
                        source: io::Error::new(
                            io::ErrorKind::InvalidInput,
                            "database path is a directory",
                        ),
                    });
                }
                Ok(false)
            }
            Err(source) => Err(StoreError::Io {
                path: path.clone(),
                source,
            }),
        }
    }

    fn lock(&self) -> Result<DatabaseLock, StoreError> {
        Ok(DatabaseLock::acquire(
            &self.config.lock_path(),
            &self.config.lock,
        )?)
    }

    fn write_temp(path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }
}

impl DatabaseStore for FileDatabaseStore {
    fn load(&self) -> Result<Database, StoreError> {
        let _lock = self.lock()?;
        let path = &self.config.db_path;

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no database file, starting empty");
                return Ok(Database::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Database::new());
        }

        match self.codec.decode(&bytes) {
            Ok(db) => {
                debug!(path = %path.display(), arrays = db.len(), bytes = bytes.len(), "database loaded");
                Ok(db)
            }
            Err(message) => match self.config.corrupt_policy {
                CorruptPolicy::Fail => Err(StoreError::Corrupt {
                    path: path.clone(),
                    message,
                }),
                CorruptPolicy::Reset => {
                    warn!(
                        path = %path.display(),
                        error = %message,
                        "database file is corrupt, treating it as empty"
                    );
                    Ok(Database::new())
                }
            },
        }
    }

    fn save(&self, db: &Database) -> Result<(), StoreError> {
        let bytes = self
            .codec
            .encode(db)
            .map_err(|message| StoreError::Encode { message })?;

        let _lock = self.lock()?;
        let path = &self.config.db_path;
        let temp_path = self.config.temp_path();

        if let Err(source) = Self::write_temp(&temp_path, &bytes) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Io {
                path: temp_path,
                source,
            });
        }

        if let Err(source) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Io {
                path: path.clone(),
                source,
            });
        }

        debug!(path = %path.display(), arrays = db.len(), bytes = bytes.len(), "database saved");
        Ok(())
    }
}
