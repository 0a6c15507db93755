//! # Shared-File Command Flows
//!
//! Interpreters in separate "processes" working on one database file.
//!
//! ## Flows Tested
//!
//! 1. **Reload-before-dispatch**: one process sees another's committed writes
//! 2. **Busy lock**: commands abort with an error line; the loop survives
//! 3. **Corrupt file**: reported, never silently wiped (default policy)

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use wkn_db::{
        CorruptPolicy, DatabaseLock, DatabaseStore, FileDatabaseStore, LockStrategy,
    };

    use crate::integration::fixtures::{impatient_config, patient_config, process};

    #[test]
    fn test_processes_see_each_others_writes() {
        for strategy in [LockStrategy::Token, LockStrategy::Flock] {
            let dir = TempDir::new().unwrap();
            let config = patient_config(dir.path(), strategy);
            let mut first = process(&config);
            let mut second = process(&config);

            assert_eq!(first.execute("new a 1 2").lines, vec!["CREATED (2)"]);
            assert_eq!(second.execute("new b 3 4").lines, vec!["CREATED (2)"]);
            assert_eq!(first.execute("merge a b").lines, vec!["MERGED"]);
            assert_eq!(second.execute("show a").lines, vec!["a: [1, 2, 3, 4]"]);
            assert_eq!(second.execute("new a").lines, vec!["Error: Array 'a' already exists"]);
            assert_eq!(second.execute("del b").lines, vec!["DELETED"]);
            assert_eq!(
                first.execute("pow a.0 b.0").lines,
                vec!["Error: 'b' does not exist"]
            );
        }
    }

    #[test]
    fn test_busy_lock_aborts_command_but_not_loop() {
        let dir = TempDir::new().unwrap();
        let config = impatient_config(dir.path());
        let mut shell = process(&config);
        assert_eq!(shell.execute("new a 1").lines, vec!["CREATED (1)"]);

        let held = DatabaseLock::acquire(&config.lock_path(), &config.lock).unwrap();

        let reply = shell.execute("del a");
        assert!(!reply.is_exit());
        assert_eq!(reply.lines.len(), 1);
        assert!(reply.lines[0].starts_with("Error: failed to load database: couldn't acquire lock"));

        drop(held);
        assert_eq!(shell.execute("show a").lines, vec!["a: [1]"]);
        assert_eq!(shell.execute("del a").lines, vec!["DELETED"]);
    }

    #[test]
    fn test_leftover_token_from_crashed_process_blocks_commands() {
        let dir = TempDir::new().unwrap();
        let config = impatient_config(dir.path());
        fs::write(config.lock_path(), b"").unwrap();

        let mut shell = process(&config);
        let lines = shell.execute("show").lines;
        assert!(lines[0].contains("is locked"));

        // Clearing the stale token by hand unblocks the database
        fs::remove_file(config.lock_path()).unwrap();
        assert_eq!(shell.execute("show").lines, vec!["No arrays present"]);
    }

    #[test]
    fn test_corrupt_file_is_reported_and_preserved() {
        let dir = TempDir::new().unwrap();
        let config = impatient_config(dir.path());
        fs::write(&config.db_path, b"{\"a\": [1, 2,").unwrap();

        let mut shell = process(&config);
        let lines = shell.execute("new b 1").lines;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("is corrupt"));
        assert_eq!(fs::read(&config.db_path).unwrap(), b"{\"a\": [1, 2,");

        let mut resetting = process(&config.clone().with_corrupt_policy(CorruptPolicy::Reset));
        assert_eq!(resetting.execute("new b 1").lines, vec!["CREATED (1)"]);
        assert_eq!(
            FileDatabaseStore::new(config).load().unwrap().get("b"),
            Some(&[1][..])
        );
    }

    #[test]
    fn test_failed_command_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = impatient_config(dir.path());
        let mut shell = process(&config);
        shell.execute("new a 1 2 3");
        let before = fs::read(&config.db_path).unwrap();

        for line in ["new a 4", "merge a zz", "pow a.9 a.0", "del zz", "show zz", "nope"] {
            shell.execute(line);
        }

        assert_eq!(fs::read(&config.db_path).unwrap(), before);
    }
}
