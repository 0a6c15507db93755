//! # Cross-Process Concurrency
//!
//! Threads with independent stores stand in for independent processes.
//!
//! ## Properties Tested
//!
//! 1. **Mutual exclusion**: no two holders of the database lock at once
//! 2. **No torn files**: concurrent saves never expose a partial file
//! 3. **Last writer wins**: a save replaces the whole file, including arrays
//!    another process added after this process loaded

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use tempfile::TempDir;
    use wkn_db::{Database, DatabaseLock, DatabaseStore, FileDatabaseStore, LockStrategy};

    use crate::integration::fixtures::patient_config;

    const THREADS: usize = 6;
    const ROUNDS: usize = 20;

    #[test]
    fn test_lock_is_never_held_twice() {
        for strategy in [LockStrategy::Token, LockStrategy::Flock] {
            let dir = TempDir::new().unwrap();
            let config = patient_config(dir.path(), strategy);
            let holders = Arc::new(AtomicUsize::new(0));
            let overlap = Arc::new(AtomicBool::new(false));

            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let config = config.clone();
                    let holders = Arc::clone(&holders);
                    let overlap = Arc::clone(&overlap);
                    thread::spawn(move || {
                        for _ in 0..ROUNDS {
                            let lock = DatabaseLock::acquire(&config.lock_path(), &config.lock)
                                .expect("patient lock should eventually be acquired");
                            if holders.fetch_add(1, Ordering::SeqCst) != 0 {
                                overlap.store(true, Ordering::SeqCst);
                            }
                            thread::sleep(Duration::from_micros(200));
                            holders.fetch_sub(1, Ordering::SeqCst);
                            drop(lock);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
            assert!(
                !overlap.load(Ordering::SeqCst),
                "{:?}: two holders overlapped",
                strategy
            );
        }
    }

    #[test]
    fn test_concurrent_saves_never_tear_file() {
        let dir = TempDir::new().unwrap();
        let config = patient_config(dir.path(), LockStrategy::Token);

        // Each writer always saves the same, writer-specific database.
        let versions: Vec<Database> = (0..THREADS)
            .map(|w| {
                (0..50)
                    .map(|i| (format!("w{}_{}", w, i), vec![w as i64; 64]))
                    .collect()
            })
            .collect();

        FileDatabaseStore::new(config.clone())
            .save(&versions[0])
            .unwrap();

        let writers: Vec<_> = versions
            .iter()
            .cloned()
            .map(|db| {
                let store = FileDatabaseStore::new(config.clone());
                thread::spawn(move || {
                    for _ in 0..ROUNDS {
                        store.save(&db).unwrap();
                    }
                })
            })
            .collect();

        let reader = FileDatabaseStore::new(config.clone());
        for _ in 0..ROUNDS * 2 {
            let seen = reader.load().expect("a load must never see a partial file");
            assert!(versions.contains(&seen));
        }

        for writer in writers {
            writer.join().unwrap();
        }
        assert!(versions.contains(&reader.load().unwrap()));
        assert!(!config.temp_path().exists());
        assert!(!config.lock_path().exists());
    }

    #[test]
    fn test_last_writer_wins_across_whole_file() {
        let dir = TempDir::new().unwrap();
        let config = patient_config(dir.path(), LockStrategy::Token);
        let a = FileDatabaseStore::new(config.clone());
        let b = FileDatabaseStore::new(config);

        let mut seen_by_a = a.load().unwrap();
        let mut seen_by_b = b.load().unwrap();

        seen_by_a.insert("from_a", vec![1]);
        a.save(&seen_by_a).unwrap();

        seen_by_b.insert("from_b", vec![2]);
        b.save(&seen_by_b).unwrap();

        let final_db = a.load().unwrap();
        assert!(final_db.contains("from_b"));
        assert!(!final_db.contains("from_a"), "b's save replaces a's array");
    }
}
