//! The checklist session: selection store, persistence, notes and export
//! status behind one owner.
//!
//! Setup and notes are restored when the checklist is built and written back
//! after every change to them. Category choices are session-only.

use crate::adapters::summary_report::default_template::{load_template, DEFAULT_TEMPLATE};
use crate::adapters::summary_report::{self, ReportContext};
use crate::domain::category::Qualifier;
use crate::domain::error::TradecheckError;
use crate::domain::export::{rasterize, suggested_filename, ExportArtifact, ExportKind, ExportStatus};
use crate::domain::persistence::PersistenceAdapter;
use crate::domain::projector::{CategorySummary, ReportEntry, SummaryProjector};
use crate::domain::registry::CategoryRegistry;
use crate::domain::resolver::CrossReferenceResolver;
use crate::domain::selection::{DateKind, DateSelection, SelectionState, Setup, SetupField};
use crate::domain::settings::Settings;
use crate::domain::store::{Change, SelectionStore, SubscriptionId};
use crate::ports::export_port::ExportPort;
use crate::ports::storage_port::StoragePort;
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

pub struct Checklist {
    store: SelectionStore,
    persistence: PersistenceAdapter,
    settings: Settings,
    notes: String,
    export_status: ExportStatus,
}

impl Checklist {
    pub fn new(settings: Settings, storage: Box<dyn StoragePort>, today: NaiveDate) -> Self {
        let persistence = PersistenceAdapter::new(
            storage,
            &settings.storage.setup_key,
            &settings.storage.notes_key,
        );
        let setup = match persistence.load_setup() {
            Some(setup) => {
                info!(
                    "restored setup {} {} for {}",
                    setup.instrument, setup.direction, setup.date.value
                );
                setup
            }
            None => Setup::new(today, &settings.setup.instrument, settings.setup.direction),
        };
        let notes = persistence.load_notes();
        if !notes.is_empty() {
            info!("restored {} characters of notes", notes.len());
        }
        let mut store = SelectionStore::new(CategoryRegistry::standard(), setup)
            .with_instruments(settings.setup.instruments.clone());
        let restored = store.state().setup.instrument.clone();
        if store.offered_instrument(&restored).is_none() {
            warn!(
                "restored instrument {restored} is not offered, using {}",
                settings.setup.instrument
            );
            let fallback = SetupField::Instrument(settings.setup.instrument.clone());
            if let Err(e) = store.set_setup_field(fallback) {
                warn!("default instrument rejected: {e}");
            }
        }
        Self {
            store,
            persistence,
            settings,
            notes,
            export_status: ExportStatus::Idle,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &CategoryRegistry {
        self.store.registry()
    }

    pub fn state(&self) -> &SelectionState {
        self.store.state()
    }

    pub fn setup(&self) -> &Setup {
        &self.store.state().setup
    }

    /// False once storage has failed and the session is memory-only.
    pub fn is_persistent(&self) -> bool {
        self.persistence.is_persistent()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Change) + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn apply_selection(
        &mut self,
        key: &str,
        code: &str,
        qualifier: Option<&str>,
    ) -> Result<&SelectionState, TradecheckError> {
        self.store.apply_selection(key, code, qualifier)
    }

    pub fn clear_category(&mut self, key: &str) -> Result<&SelectionState, TradecheckError> {
        self.store.clear_category(key)
    }

    pub fn remove_choice(&mut self, key: &str, id: Uuid) -> Result<&SelectionState, TradecheckError> {
        self.store.remove_choice(key, id)
    }

    pub fn active_qualifier(&self, key: &str) -> Result<Option<Qualifier>, TradecheckError> {
        self.store.active_qualifier(key)
    }

    pub fn set_active_qualifier(
        &mut self,
        key: &str,
        qualifier: &str,
    ) -> Result<Qualifier, TradecheckError> {
        self.store.set_active_qualifier(key, qualifier)
    }

    pub fn set_setup_field(&mut self, field: SetupField) -> Result<&Setup, TradecheckError> {
        self.store.set_setup_field(field)?;
        self.persist_setup();
        Ok(self.setup())
    }

    /// Date button: today, yesterday, or custom keeping the current date.
    pub fn select_date_kind(
        &mut self,
        kind: DateKind,
        today: NaiveDate,
    ) -> Result<&Setup, TradecheckError> {
        let date = DateSelection::for_kind(kind, today, self.setup().date.value);
        self.set_date(date)
    }

    /// Typed date, classified against `today`.
    pub fn set_date_input(&mut self, value: &str, today: NaiveDate) -> Result<&Setup, TradecheckError> {
        let date = DateSelection::from_input(value, today)?;
        self.set_date(date)
    }

    fn set_date(&mut self, date: DateSelection) -> Result<&Setup, TradecheckError> {
        self.set_setup_field(SetupField::Date {
            kind: date.kind,
            value: date.value.format("%Y-%m-%d").to_string(),
        })
    }

    fn persist_setup(&self) {
        self.persistence.save_setup(self.setup());
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, text: &str) {
        self.notes = text.to_string();
        self.persistence.save_notes(text);
    }

    pub fn category_summary(&self, key: &str) -> Result<CategorySummary, TradecheckError> {
        self.projector().project_category_summary(key)
    }

    pub fn full_report(&self) -> Vec<ReportEntry> {
        self.projector().project_full_report()
    }

    /// Entry options whose declared refs are satisfied by the current state.
    pub fn highlights(&self) -> BTreeSet<String> {
        CrossReferenceResolver::new(self.store.registry(), self.store.state()).declared_highlights()
    }

    pub fn resolve_highlights<K, V>(&self, entry_refs: &BTreeMap<K, V>) -> BTreeSet<K>
    where
        K: Ord + Clone,
        V: AsRef<str>,
    {
        CrossReferenceResolver::new(self.store.registry(), self.store.state())
            .resolve_highlights(entry_refs)
    }

    fn projector(&self) -> SummaryProjector<'_> {
        SummaryProjector::new(self.store.registry(), self.store.state())
    }

    pub fn export_status(&self) -> &ExportStatus {
        &self.export_status
    }

    pub fn clear_export_status(&mut self) {
        self.export_status = ExportStatus::Idle;
    }

    /// Render and rasterize one export. Selection state is never touched, so
    /// a failed export can simply be retried.
    pub fn export(
        &mut self,
        kind: ExportKind,
        port: &dyn ExportPort,
        now: NaiveDateTime,
    ) -> Result<ExportArtifact, TradecheckError> {
        self.export_status = ExportStatus::Processing { kind };

        let template = match &self.settings.export.template {
            Some(path) => match load_template(path) {
                Ok(template) => template,
                Err(e) => {
                    warn!("{:?} export failed: {e}", kind);
                    self.export_status = ExportStatus::Failed {
                        kind,
                        reason: e.to_string(),
                    };
                    return Err(e);
                }
            },
            None => DEFAULT_TEMPLATE.to_string(),
        };
        let entries = self.full_report();
        let ctx = ReportContext {
            kind,
            setup: self.setup(),
            entries: &entries,
            notes: Some(self.notes.as_str()),
            generated_at: now,
        };
        let region = summary_report::build_region(&template, &ctx);
        let day_code = self
            .store
            .state()
            .choices("yesterday.day")
            .first()
            .map(|c| c.code.as_str());
        let filename = suggested_filename(kind, &self.settings.export, self.setup(), day_code, now);

        match rasterize(port, &region, filename) {
            Ok(artifact) => {
                info!("exported {} ({} bytes)", artifact.filename, artifact.bytes.len());
                self.export_status = ExportStatus::Success {
                    kind,
                    filename: artifact.filename.clone(),
                };
                Ok(artifact)
            }
            Err(e) => {
                warn!("{:?} export failed: {e}", kind);
                self.export_status = ExportStatus::Failed {
                    kind,
                    reason: e.to_string(),
                };
                Err(e)
            }
        }
    }
}
