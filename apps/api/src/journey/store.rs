use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::budget::models::BudgetData;
use crate::journey::autosave::{self, AutosaveConfig, AutosaveHandle, AutosaveStatus, AutosaveTask};
use crate::journey::models::{JourneyState, Theme};
use crate::journey::persistence::load_journey;
use crate::journey::storage::KeyValueStore;
use crate::orientation::models::{DashboardContent, RiasecOutput};
use crate::resume::models::ResumeData;

/// Owner of the journey state. Every mutation goes through here so the
/// autosave scheduler hears about it.
#[derive(Clone)]
pub struct JourneyStore {
    state: Arc<RwLock<JourneyState>>,
    autosave: AutosaveHandle,
    dashboard: Arc<RwLock<Option<DashboardContent>>>,
}

impl JourneyStore {
    /// Loads the persisted journey and starts its autosave scheduler.
    pub fn open(storage: Arc<dyn KeyValueStore>, config: AutosaveConfig) -> (Self, AutosaveTask) {
        let initial = load_journey(storage.as_ref());
        let state = Arc::new(RwLock::new(initial));
        let (autosave, task) = autosave::spawn(Arc::clone(&state), storage, config);
        info!(
            "Journey store ready (debounce {:?}, check every {:?})",
            config.debounce, config.check_interval
        );

        let store = Self {
            state,
            autosave,
            dashboard: Arc::new(RwLock::new(None)),
        };
        (store, task)
    }

    pub fn snapshot(&self) -> JourneyState {
        self.read(JourneyState::clone)
    }

    pub fn read<R>(&self, f: impl FnOnce(&JourneyState) -> R) -> R {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Applies `f` to the current state and marks it changed.
    pub fn update<R>(&self, f: impl FnOnce(&mut JourneyState) -> R) -> R {
        let result = {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        };
        self.autosave.mark_changed();
        result
    }

    /// Like `update`, but only marks the state changed when `f` succeeds.
    pub fn try_update<R, E>(
        &self,
        f: impl FnOnce(&mut JourneyState) -> Result<R, E>,
    ) -> Result<R, E> {
        let result = {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        };
        if result.is_ok() {
            self.autosave.mark_changed();
        }
        result
    }

    pub fn set_resume(&self, resume: ResumeData) {
        self.update(|s| s.resume_data = resume);
    }

    pub fn set_budget(&self, budget: BudgetData) {
        self.update(|s| s.budget_data = budget.sanitized());
    }

    pub fn set_riasec_result(&self, result: Option<RiasecOutput>) {
        self.update(|s| s.riasec_result = result);
    }

    pub fn toggle_theme(&self) -> Theme {
        self.update(|s| {
            s.theme = s.theme.toggled();
            s.theme
        })
    }

    pub fn set_has_action_plan(&self, value: bool) {
        self.update(|s| s.has_action_plan = value);
        self.invalidate_dashboard();
    }

    /// Restores the initial state and flushes it right away.
    pub fn reset(&self) {
        {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *guard = JourneyState::default();
        }
        self.invalidate_dashboard();
        self.autosave.flush_now();
        info!("Journey reset to initial state");
    }

    pub fn autosave_status(&self) -> AutosaveStatus {
        self.autosave.status()
    }

    pub fn check_autosave_now(&self) {
        self.autosave.check_now();
    }

    pub fn shutdown(&self) {
        self.autosave.shutdown();
    }

    pub fn cached_dashboard(&self) -> Option<DashboardContent> {
        self.dashboard
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn cache_dashboard(&self, content: DashboardContent) {
        *self.dashboard.write().unwrap_or_else(PoisonError::into_inner) = Some(content);
    }

    fn invalidate_dashboard(&self) {
        *self.dashboard.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::autosave::SaveStatus;
    use crate::journey::persistence::{save_journey, JOURNEY_DATA_KEY};
    use crate::journey::storage::MemoryStore;
    use std::time::Duration;

    fn open_with(storage: Arc<MemoryStore>) -> JourneyStore {
        JourneyStore::open(storage, AutosaveConfig::default()).0
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_load_does_not_save() {
        let mut saved = JourneyState::default();
        saved.theme = Theme::Dark;
        let seed = MemoryStore::new();
        save_journey(&seed, &saved).unwrap();
        let raw = seed.get(JOURNEY_DATA_KEY).unwrap().unwrap();

        let storage = Arc::new(MemoryStore::with_entry(JOURNEY_DATA_KEY, &raw));
        let store = open_with(storage.clone());
        assert_eq!(store.snapshot().theme, Theme::Dark);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(storage.write_count(), 0);
        assert!(!store.autosave_status().has_unsaved_changes);
    }

    #[tokio::test(start_paused = true)]
    async fn test_setter_marks_dirty_then_saves() {
        let storage = Arc::new(MemoryStore::new());
        let store = open_with(storage.clone());

        store.toggle_theme();
        let status = store.autosave_status();
        assert!(status.has_unsaved_changes);
        assert_eq!(status.status, SaveStatus::Saving);

        tokio::time::sleep(Duration::from_millis(2_100)).await;
        assert_eq!(storage.write_count(), 1);
        assert_eq!(store.autosave_status().status, SaveStatus::Saved);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restores_defaults_and_flushes() {
        let storage = Arc::new(MemoryStore::new());
        let store = open_with(storage.clone());
        store.update(|s| {
            s.budget_data.income = 1900.0;
            s.has_action_plan = true;
        });
        store.cache_dashboard(DashboardContent::default());

        store.reset();
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(store.snapshot(), JourneyState::default());
        assert!(store.cached_dashboard().is_none());
        assert_eq!(storage.write_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_try_update_is_not_a_change() {
        let store = open_with(Arc::new(MemoryStore::new()));
        let result: Result<(), &str> = store.try_update(|_| Err("out of range"));
        assert!(result.is_err());
        assert!(!store.autosave_status().has_unsaved_changes);
    }

    #[tokio::test]
    async fn test_set_budget_sanitizes_amounts() {
        let store = open_with(Arc::new(MemoryStore::new()));
        let mut budget = BudgetData::default();
        budget.income = -10.0;
        budget.expenses.emergency = f64::NAN;
        store.set_budget(budget);
        let saved = store.snapshot().budget_data;
        assert_eq!(saved.income, 0.0);
        assert_eq!(saved.expenses.emergency, 0.0);
    }
}
