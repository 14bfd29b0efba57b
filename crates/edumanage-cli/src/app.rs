use edumanage_core::{Error as CoreError, ListenerId, ListenerRegistry};
use edumanage_store::{BackupInfo, Store, Stored};

use crate::CliError;
use crate::workspace::{
    AppearanceMode, Settings, WorkspacePaths, load_or_create_settings, save_settings,
};

/// Everything a command needs: workspace layout, settings, the loaded store
/// and the listeners interested in appearance changes.
pub struct App {
    paths: WorkspacePaths,
    settings: Settings,
    store: Store,
    appearance: ListenerRegistry<AppearanceMode>,
}

/// Outcome of a delete: the removed record and the snapshot taken first.
#[derive(Debug)]
pub struct Deleted<R> {
    pub record: R,
    pub backup: Option<BackupInfo>,
}

impl App {
    pub fn open(paths: WorkspacePaths) -> Result<Self, CliError> {
        paths.ensure_dirs()?;
        let settings = load_or_create_settings(&paths)?;
        let store = Store::open(paths.data_paths());
        Ok(Self {
            paths,
            settings,
            store,
            appearance: ListenerRegistry::new(),
        })
    }

    pub fn paths(&self) -> &WorkspacePaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn on_appearance_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&AppearanceMode) + 'static,
    {
        self.appearance.register(listener)
    }

    /// Persist the new mode, then tell every listener.
    ///
    /// Listeners are not called when the settings file cannot be written.
    pub fn set_appearance(&mut self, mode: AppearanceMode) -> Result<(), CliError> {
        let previous = self.settings.appearance_mode;
        self.settings.appearance_mode = mode;
        if let Err(err) = save_settings(&self.paths, &self.settings) {
            self.settings.appearance_mode = previous;
            return Err(err.into());
        }

        tracing::info!(event = "appearance_changed", from = %previous, to = %mode);
        self.appearance.notify(&mode);
        Ok(())
    }

    /// Validate and insert a new record.
    pub fn create<R: Stored>(&mut self, record: R) -> Result<(), CliError> {
        record.validate()?;
        self.store.insert(record)?;
        Ok(())
    }

    /// Validate and replace the record with the same key.
    pub fn modify<R: Stored>(&mut self, record: R) -> Result<R, CliError> {
        record.validate()?;
        Ok(self.store.update(record)?)
    }

    /// Remove a record, taking a snapshot first when the settings ask for one.
    ///
    /// Existence and referential checks run before the snapshot so a refused
    /// delete leaves no backup behind.
    pub fn delete<R: Stored>(&mut self, key: &str) -> Result<Deleted<R>, CliError> {
        if !self.store.contains::<R>(key) {
            return Err(CoreError::NotFound {
                kind: R::KIND,
                key: key.to_string(),
            }
            .into());
        }
        R::ensure_removable(&self.store, key)?;

        let backup = if self.settings.backup_before_delete {
            Some(self.store.create_backup(self.settings.backup_retention)?)
        } else {
            None
        };
        let record = self.store.remove::<R>(key)?;
        Ok(Deleted { record, backup })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use edumanage_core::{College, Program, Student};
    use uuid::Uuid;

    use super::*;

    fn temp_app() -> App {
        let root = std::env::temp_dir().join(format!("edumanage_app_{}", Uuid::new_v4()));
        App::open(WorkspacePaths::new(root)).expect("open app")
    }

    fn cleanup(app: App) {
        let _ = std::fs::remove_dir_all(&app.paths().root);
    }

    #[test]
    fn invalid_student_is_rejected_before_the_store() {
        let mut app = temp_app();
        let student = Student::new("2023-0001", "Ana", "Cruz2", "BSCS", "1", "Female");

        let err = app.create(student).expect_err("digit in name");
        assert_eq!(err.to_string(), "Names cannot contain numbers");
        assert!(app.store().students().is_empty());

        cleanup(app);
    }

    #[test]
    fn appearance_change_is_saved_and_broadcast() {
        let mut app = temp_app();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        app.on_appearance_change(move |mode| sink.borrow_mut().push(*mode));

        app.set_appearance(AppearanceMode::Light).expect("set appearance");

        assert_eq!(*seen.borrow(), vec![AppearanceMode::Light]);
        let reloaded = load_or_create_settings(app.paths()).expect("reload settings");
        assert_eq!(reloaded.appearance_mode, AppearanceMode::Light);

        cleanup(app);
    }

    #[test]
    fn delete_snapshots_first_and_refused_delete_does_not() {
        let mut app = temp_app();
        app.create(College::new("CCS", "College of Computer Studies"))
            .expect("add CCS");
        app.create(College::new("COE", "College of Engineering"))
            .expect("add COE");
        app.create(Program::new("BSCS", "Computer Science", "CCS"))
            .expect("add BSCS");

        let err = app.delete::<College>("CCS").expect_err("referenced");
        assert!(matches!(
            err,
            CliError::Store(ref store) if matches!(
                store.as_record(),
                Some(CoreError::ReferentialConflict { count: 1, .. })
            )
        ));
        assert!(app.store().list_backups().expect("list").is_empty());

        let deleted = app.delete::<College>("COE").expect("delete COE");
        assert_eq!(deleted.record.code, "COE");
        assert!(deleted.backup.is_some());
        assert_eq!(app.store().list_backups().expect("list").len(), 1);

        cleanup(app);
    }

    #[test]
    fn deleting_a_missing_record_reports_not_found() {
        let mut app = temp_app();
        let err = app.delete::<Student>("2023-9999").expect_err("missing");
        assert_eq!(err.to_string(), "student 2023-9999 not found");
        cleanup(app);
    }
}
