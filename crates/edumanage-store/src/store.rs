use edumanage_core::{College, Error, Program, Record, RecordKind, Student};

use crate::backup::{self, BackupInfo};
use crate::errors::{StoreError, StoreResult};
use crate::integrity::IntegrityReport;
use crate::paths::DataPaths;
use crate::persist;

/// In-memory collections backed by one CSV file each.
///
/// The collections are loaded once and stay authoritative for the life of
/// the store; every mutation rewrites the affected file. The store does not
/// run the validators: callers validate before they mutate.
#[derive(Debug)]
pub struct Store {
    paths: DataPaths,
    colleges: Vec<College>,
    programs: Vec<Program>,
    students: Vec<Student>,
}

mod sealed {
    use super::Store;

    /// Only constructible inside this crate.
    pub struct Token(pub(super) ());

    pub trait Collection: Sized {
        fn collection_mut(store: &mut Store, token: Token) -> &mut Vec<Self>;
    }
}

use sealed::{Collection, Token};

/// A record type the store keeps a collection of.
///
/// Implemented for [`College`], [`Program`] and [`Student`] only. Collections
/// change through [`Store`] methods alone:
///
/// ```compile_fail
/// use edumanage_core::College;
/// use edumanage_store::{Store, Stored};
///
/// fn clear<R: Stored>(store: &mut Store) {
///     R::collection_mut(store).clear();
/// }
///
/// fn main() {
///     let mut store = Store::open(edumanage_store::DataPaths::under("data".as_ref()));
///     clear::<College>(&mut store);
/// }
/// ```
pub trait Stored: Record + Collection {
    fn collection(store: &Store) -> &[Self];

    /// Referential check run before a record of this kind is removed.
    fn ensure_removable(_store: &Store, _key: &str) -> StoreResult<()> {
        Ok(())
    }
}

impl Collection for College {
    fn collection_mut(store: &mut Store, _: Token) -> &mut Vec<Self> {
        &mut store.colleges
    }
}

impl Stored for College {
    fn collection(store: &Store) -> &[Self] {
        &store.colleges
    }

    fn ensure_removable(store: &Store, key: &str) -> StoreResult<()> {
        let count = store.programs_in_college(key);
        if count > 0 {
            return Err(Error::ReferentialConflict {
                kind: RecordKind::College,
                key: key.to_string(),
                referrer: RecordKind::Program,
                count,
            }
            .into());
        }
        Ok(())
    }
}

impl Collection for Program {
    fn collection_mut(store: &mut Store, _: Token) -> &mut Vec<Self> {
        &mut store.programs
    }
}

impl Stored for Program {
    fn collection(store: &Store) -> &[Self] {
        &store.programs
    }
}

impl Collection for Student {
    fn collection_mut(store: &mut Store, _: Token) -> &mut Vec<Self> {
        &mut store.students
    }
}

impl Stored for Student {
    fn collection(store: &Store) -> &[Self] {
        &store.students
    }
}

impl Store {
    /// Initialize missing files and load all three collections.
    ///
    /// A collection that cannot be read is replaced by an empty one; the
    /// failure is logged, never returned.
    pub fn open(paths: DataPaths) -> Self {
        if let Err(err) = paths.ensure_dirs().and_then(|_| persist::init_files(&paths)) {
            tracing::warn!(event = "init_failed", error = %err);
        }

        let colleges = load_or_empty(&paths);
        let programs = load_or_empty(&paths);
        let students = load_or_empty(&paths);

        Self {
            paths,
            colleges,
            programs,
            students,
        }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn colleges(&self) -> &[College] {
        &self.colleges
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn all<R: Stored>(&self) -> &[R] {
        R::collection(self)
    }

    pub fn len(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::College => self.colleges.len(),
            RecordKind::Program => self.programs.len(),
            RecordKind::Student => self.students.len(),
        }
    }

    pub fn get<R: Stored>(&self, key: &str) -> Option<&R> {
        R::collection(self).iter().find(|record| record.key() == key)
    }

    pub fn contains<R: Stored>(&self, key: &str) -> bool {
        self.get::<R>(key).is_some()
    }

    pub fn programs_in_college(&self, college: &str) -> usize {
        self.programs.iter().filter(|p| p.college == college).count()
    }


    /// Reject a key that already exists in the collection.
    pub fn ensure_unique<R: Stored>(&self, key: &str) -> StoreResult<()> {
        if self.contains::<R>(key) {
            return Err(Error::DuplicateKey {
                kind: R::KIND,
                key: key.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Append a record and rewrite its file.
    ///
    /// Duplicate keys are rejected before anything is written.
    pub fn insert<R: Stored>(&mut self, record: R) -> StoreResult<()> {
        self.ensure_unique::<R>(record.key())?;
        let key = record.key().to_string();

        self.items_mut::<R>().push(record);
        if let Err(err) = self.persist::<R>() {
            self.items_mut::<R>().pop();
            return Err(err);
        }

        tracing::info!(event = "record_added", kind = %R::KIND, key = %key);
        Ok(())
    }

    /// Replace the record with the same key, keeping its position.
    ///
    /// Returns the previous version.
    pub fn update<R: Stored>(&mut self, record: R) -> StoreResult<R> {
        let index = self.position::<R>(record.key())?;
        let key = record.key().to_string();

        let previous = std::mem::replace(&mut self.items_mut::<R>()[index], record);
        if let Err(err) = self.persist::<R>() {
            self.items_mut::<R>()[index] = previous;
            return Err(err);
        }

        tracing::info!(event = "record_updated", kind = %R::KIND, key = %key);
        Ok(previous)
    }

    /// Remove exactly the record with `key`.
    ///
    /// Colleges still referenced by a program are refused with
    /// [`Error::ReferentialConflict`].
    pub fn remove<R: Stored>(&mut self, key: &str) -> StoreResult<R> {
        let index = self.position::<R>(key)?;
        R::ensure_removable(self, key)?;

        let removed = self.items_mut::<R>().remove(index);
        if let Err(err) = self.persist::<R>() {
            self.items_mut::<R>().insert(index, removed);
            return Err(err);
        }

        tracing::info!(event = "record_deleted", kind = %R::KIND, key = %key);
        Ok(removed)
    }

    pub fn remove_college(&mut self, code: &str) -> StoreResult<College> {
        self.remove::<College>(code)
    }

    /// Rewrite the file of one collection from memory.
    pub fn persist<R: Stored>(&self) -> StoreResult<()> {
        persist::save(&self.paths, R::collection(self))
    }

    /// Re-read every collection from disk, same recovery policy as `open`.
    pub fn reload(&mut self) {
        self.colleges = load_or_empty(&self.paths);
        self.programs = load_or_empty(&self.paths);
        self.students = load_or_empty(&self.paths);
    }

    /// Snapshot the three files before a destructive operation.
    pub fn create_backup(&self, retention: usize) -> StoreResult<BackupInfo> {
        backup::create_backup(&self.paths, retention)
    }

    pub fn list_backups(&self) -> StoreResult<Vec<String>> {
        backup::list_backups(&self.paths)
    }

    /// Restore snapshot `name` and reload the collections from it.
    pub fn restore_backup(&mut self, name: &str) -> StoreResult<usize> {
        let restored = backup::restore_backup(&self.paths, name)?;
        self.reload();
        Ok(restored)
    }

    pub fn integrity_report(&self) -> IntegrityReport {
        IntegrityReport::build(self)
    }

    fn items_mut<R: Stored>(&mut self) -> &mut Vec<R> {
        R::collection_mut(self, Token(()))
    }

    fn position<R: Stored>(&self, key: &str) -> StoreResult<usize> {
        R::collection(self)
            .iter()
            .position(|record| record.key() == key)
            .ok_or_else(|| {
                StoreError::from(Error::NotFound {
                    kind: R::KIND,
                    key: key.to_string(),
                })
            })
    }
}

fn load_or_empty<R: Record>(paths: &DataPaths) -> Vec<R> {
    match persist::load::<R>(paths) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(
                event = "load_failed",
                kind = %R::KIND,
                path = %paths.path_for(R::KIND).display(),
                error = %err
            );
            Vec::new()
        }
    }
}
