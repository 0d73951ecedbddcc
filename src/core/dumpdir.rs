//! Restore defaults read from an existing `mongodump` output tree.
//!
//! Layout: `<cwd>/<dump_dir>/<database>/<collection>.bson`. Only one level of
//! database directories and one level of collection files is looked at.

use std::fs;
use std::path::{Path, PathBuf};

use super::config::DEFAULT_DUMP_DIR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredDefaults {
    pub database: String,
    pub collection: String,
    pub source_path: PathBuf,
}

/// Inspect `<working_dir>/dump`.
pub fn infer_defaults(working_dir: &Path) -> Option<InferredDefaults> {
    infer_defaults_in(working_dir, DEFAULT_DUMP_DIR)
}

/// Inspect `<working_dir>/<dump_dir>`.
///
/// Returns `None` when the dump directory is missing or unreadable, holds no
/// database directory, or the chosen database directory holds no collection
/// file. When several candidates exist the lexicographically first one wins;
/// this is a convenience default, not a guess at the newest dump.
pub fn infer_defaults_in(working_dir: &Path, dump_dir: &str) -> Option<InferredDefaults> {
    let root = working_dir.join(dump_dir);

    let database = first_entry(&root, EntryKind::Directory)?;
    let db_dir = root.join(&database);

    let file = first_entry(&db_dir, EntryKind::File)?;
    // users.metadata.json => users
    let collection = file.split('.').next().unwrap_or(&file).to_string();

    let source_path = db_dir.join(format!("{}.bson", collection));
    log::debug!(
        "inferred restore defaults from {}: database='{}' collection='{}'",
        root.display(),
        database,
        collection
    );

    Some(InferredDefaults {
        database,
        collection,
        source_path,
    })
}

#[derive(Clone, Copy, PartialEq)]
enum EntryKind {
    Directory,
    File,
}

fn first_entry(dir: &Path, kind: EntryKind) -> Option<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("no restore defaults, cannot read {}: {}", dir.display(), e);
            return None;
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let is_dir = entry.path().is_dir();
            match kind {
                EntryKind::Directory => is_dir,
                EntryKind::File => !is_dir,
            }
        })
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect();

    names.sort();
    let first = names.into_iter().next();
    if first.is_none() {
        log::debug!("no restore defaults, {} has no usable entries", dir.display());
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_missing_dump_dir() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(infer_defaults(tmp.path()), None);
    }

    #[test]
    fn test_nonexistent_working_dir() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(infer_defaults(&tmp.path().join("gone")), None);
    }

    #[test]
    fn test_empty_dump_dir() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("dump")).unwrap();
        assert_eq!(infer_defaults(tmp.path()), None);
    }

    #[test]
    fn test_empty_database_dir() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("dump").join("mydb")).unwrap();
        assert_eq!(infer_defaults(tmp.path()), None);
    }

    #[test]
    fn test_single_collection() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("dump/mydb/mycol.bson"));

        let defaults = infer_defaults(tmp.path()).unwrap();
        assert_eq!(defaults.database, "mydb");
        assert_eq!(defaults.collection, "mycol");
        assert_eq!(
            defaults.source_path,
            tmp.path().join("dump").join("mydb").join("mycol.bson")
        );
    }

    #[test]
    fn test_stem_stops_at_first_dot() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("dump/shop/orders.metadata.json"));

        let defaults = infer_defaults(tmp.path()).unwrap();
        assert_eq!(defaults.collection, "orders");
        assert!(defaults.source_path.ends_with("shop/orders.bson"));
    }

    #[test]
    fn test_lexicographic_selection() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("dump/zeta/a.bson"));
        touch(&tmp.path().join("dump/alpha/users.bson"));
        touch(&tmp.path().join("dump/alpha/users.metadata.json"));
        touch(&tmp.path().join("dump/alpha/accounts.bson"));

        let defaults = infer_defaults(tmp.path()).unwrap();
        assert_eq!(defaults.database, "alpha");
        assert_eq!(defaults.collection, "accounts");
    }

    #[test]
    fn test_skips_top_level_files_and_hidden_entries() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("dump/oplog.bson"));
        touch(&tmp.path().join("dump/.hidden/x.bson"));
        touch(&tmp.path().join("dump/app/.DS_Store"));
        touch(&tmp.path().join("dump/app/sessions.bson"));

        let defaults = infer_defaults(tmp.path()).unwrap();
        assert_eq!(defaults.database, "app");
        assert_eq!(defaults.collection, "sessions");
    }

    #[test]
    fn test_custom_dump_dir() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("backups/mydb/mycol.bson"));

        assert_eq!(infer_defaults(tmp.path()), None);
        let defaults = infer_defaults_in(tmp.path(), "backups").unwrap();
        assert_eq!(
            defaults.source_path,
            tmp.path().join("backups/mydb/mycol.bson")
        );
    }
}
