//! Recording stubs shared by the service tests.
//!
//! Every stub appends what it was asked to do to a shared [`Journal`], so
//! tests can assert both *whether* and *in which order* collaborators ran.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use hexkit_domain::error::{Failure, Outcome, Status};
use hexkit_domain::model::{Model, TenantedModel};
use hexkit_domain::page::{ListFilter, Page, PageRequest};
use tokio_util::sync::CancellationToken;

use crate::ports::{
    ModelListing, ModelRepository, TenantRepository, TenantedModelListing, TenantedModelRepository,
};
use crate::services::hooks::{Change, ModelHooks, TenantedModelHooks};

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: u64,
    pub title: String,
}

impl Note {
    pub fn draft(title: &str) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
        }
    }
}

impl Model for Note {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TenantNote {
    pub id: u64,
    pub tenant: String,
    pub title: String,
}

impl TenantNote {
    pub fn draft(tenant: &str, title: &str) -> Self {
        Self {
            id: 0,
            tenant: tenant.to_string(),
            title: title.to_string(),
        }
    }
}

impl Model for TenantNote {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }
}

impl TenantedModel for TenantNote {
    type TenantId = String;

    fn tenant_id(&self) -> &String {
        &self.tenant
    }
}

/// Ordered log of collaborator calls.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.entries().iter().any(|e| e.starts_with(prefix))
    }

    pub fn touched_repository(&self) -> bool {
        self.contains("repo.")
    }
}

/// Failures injected into a stub repository, by operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Faults {
    pub next_id: Option<Status>,
    pub update: Option<Status>,
    pub delete: Option<Status>,
}

fn injected(status: Status) -> Failure {
    Failure::new(status, "injected failure")
}

fn check(fault: Option<Status>) -> Outcome<()> {
    fault.map_or(Ok(()), |status| Err(injected(status)))
}

pub struct StubRepo {
    journal: Journal,
    store: Mutex<BTreeMap<u64, Note>>,
    next: AtomicU64,
    faults: Faults,
}

impl StubRepo {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            store: Mutex::new(BTreeMap::new()),
            next: AtomicU64::new(1),
            faults: Faults::default(),
        }
    }

    pub fn with_faults(mut self, faults: Faults) -> Self {
        self.faults = faults;
        self
    }

    pub fn seed(&self, note: Note) {
        self.store.lock().unwrap().insert(note.id, note);
    }

    pub fn stored(&self, id: u64) -> Option<Note> {
        self.store.lock().unwrap().get(&id).cloned()
    }
}

impl ModelRepository<Note> for StubRepo {
    fn next_id(&self, _cancel: &CancellationToken) -> impl Future<Output = Outcome<u64>> + Send {
        self.journal.record("repo.next_id");
        let result = check(self.faults.next_id).map(|()| self.next.fetch_add(1, Ordering::Relaxed));
        async move { result }
    }

    fn insert(
        &self,
        model: Note,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Note>> + Send {
        self.journal.record(format!("repo.insert({})", model.id));
        self.store.lock().unwrap().insert(model.id, model.clone());
        async move { Ok(model) }
    }

    fn get(
        &self,
        id: &u64,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Note>> + Send {
        self.journal.record(format!("repo.get({id})"));
        let result = self
            .stored(*id)
            .ok_or_else(|| Failure::not_found("Note", id));
        async move { result }
    }

    fn update(
        &self,
        model: Note,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Note>> + Send {
        self.journal.record(format!("repo.update({})", model.id));
        let result = check(self.faults.update).and_then(|()| {
            let mut store = self.store.lock().unwrap();
            match store.get_mut(&model.id) {
                Some(slot) => {
                    *slot = model.clone();
                    Ok(model)
                }
                None => Err(Failure::not_found("Note", model.id)),
            }
        });
        async move { result }
    }

    fn delete(
        &self,
        id: &u64,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        self.journal.record(format!("repo.delete({id})"));
        let result = check(self.faults.delete).and_then(|()| {
            self.store
                .lock()
                .unwrap()
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| Failure::not_found("Note", id))
        });
        async move { result }
    }
}

impl ModelListing<Note, PageRequest> for StubRepo {
    fn list(
        &self,
        filter: &PageRequest,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Page<Note>>> + Send {
        self.journal.record("repo.list");
        let request = filter.page();
        let store = self.store.lock().unwrap();
        let items = store.values().take(request.limit() as usize).cloned().collect();
        let page = Page::new(items, store.len() as u64, request);
        async move { Ok(page) }
    }
}

pub struct StubTenantedRepo {
    journal: Journal,
    store: Mutex<BTreeMap<(String, u64), TenantNote>>,
    next: AtomicU64,
    faults: Faults,
}

impl StubTenantedRepo {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            store: Mutex::new(BTreeMap::new()),
            next: AtomicU64::new(1),
            faults: Faults::default(),
        }
    }

    pub fn with_faults(mut self, faults: Faults) -> Self {
        self.faults = faults;
        self
    }

    pub fn stored(&self, tenant: &str, id: u64) -> Option<TenantNote> {
        self.store
            .lock()
            .unwrap()
            .get(&(tenant.to_string(), id))
            .cloned()
    }
}

impl TenantedModelRepository<TenantNote> for StubTenantedRepo {
    fn next_id(
        &self,
        tenant: &String,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<u64>> + Send {
        self.journal.record(format!("repo.next_id({tenant})"));
        let result = check(self.faults.next_id).map(|()| self.next.fetch_add(1, Ordering::Relaxed));
        async move { result }
    }

    fn insert(
        &self,
        tenant: &String,
        model: TenantNote,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<TenantNote>> + Send {
        self.journal
            .record(format!("repo.insert({tenant}, {})", model.id));
        self.store
            .lock()
            .unwrap()
            .insert((tenant.clone(), model.id), model.clone());
        async move { Ok(model) }
    }

    fn get(
        &self,
        tenant: &String,
        id: &u64,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<TenantNote>> + Send {
        self.journal.record(format!("repo.get({tenant}, {id})"));
        let result = self
            .stored(tenant, *id)
            .ok_or_else(|| Failure::not_found("TenantNote", id));
        async move { result }
    }

    fn update(
        &self,
        tenant: &String,
        model: TenantNote,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<TenantNote>> + Send {
        self.journal
            .record(format!("repo.update({tenant}, {})", model.id));
        let result = check(self.faults.update).and_then(|()| {
            let mut store = self.store.lock().unwrap();
            match store.get_mut(&(tenant.clone(), model.id)) {
                Some(slot) => {
                    *slot = model.clone();
                    Ok(model)
                }
                None => Err(Failure::not_found("TenantNote", model.id)),
            }
        });
        async move { result }
    }

    fn delete(
        &self,
        tenant: &String,
        id: &u64,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        self.journal.record(format!("repo.delete({tenant}, {id})"));
        let result = check(self.faults.delete).and_then(|()| {
            self.store
                .lock()
                .unwrap()
                .remove(&(tenant.clone(), *id))
                .map(|_| ())
                .ok_or_else(|| Failure::not_found("TenantNote", id))
        });
        async move { result }
    }
}

impl TenantedModelListing<TenantNote, PageRequest> for StubTenantedRepo {
    fn list(
        &self,
        tenant: &String,
        filter: &PageRequest,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<Page<TenantNote>>> + Send {
        self.journal.record(format!("repo.list({tenant})"));
        let store = self.store.lock().unwrap();
        let items: Vec<TenantNote> = store
            .values()
            .filter(|n| &n.tenant == tenant)
            .cloned()
            .collect();
        let total = items.len() as u64;
        let page = Page::new(items, total, *filter);
        async move { Ok(page) }
    }
}

pub struct StubTenants {
    journal: Journal,
    known: BTreeSet<String>,
    fault: Option<Status>,
}

impl StubTenants {
    pub fn new(journal: &Journal, known: &[&str]) -> Self {
        Self {
            journal: journal.clone(),
            known: known.iter().map(ToString::to_string).collect(),
            fault: None,
        }
    }

    pub fn failing(mut self, status: Status) -> Self {
        self.fault = Some(status);
        self
    }
}

impl TenantRepository<String> for StubTenants {
    fn exists(
        &self,
        tenant: &String,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        self.journal.record(format!("tenants.exists({tenant})"));
        let result = check(self.fault).and_then(|()| {
            if self.known.contains(tenant) {
                Ok(())
            } else {
                Err(Failure::not_found("Tenant", tenant))
            }
        });
        async move { result }
    }
}

/// Hooks that trim titles, reject empty titles, and record every call.
#[derive(Default)]
pub struct RecordingHooks {
    pub journal: Journal,
    /// Name of the hook that should fail, e.g. `"validate_update"`.
    pub reject: Option<&'static str>,
    /// Tenant the `mutate` hook moves tenanted models into.
    pub move_to_tenant: Option<String>,
}

impl RecordingHooks {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Self::default()
        }
    }

    pub fn rejecting(mut self, hook: &'static str) -> Self {
        self.reject = Some(hook);
        self
    }

    fn gate(&self, hook: &'static str) -> Outcome<()> {
        self.journal.record(format!("hooks.{hook}"));
        if self.reject == Some(hook) {
            return Err(Failure::bad_request(format!("{hook} rejected")));
        }
        Ok(())
    }
}

fn require_title(title: &str) -> Outcome<()> {
    if title.is_empty() {
        return Err(Failure::bad_request("title must not be empty"));
    }
    Ok(())
}

impl ModelHooks<Note> for RecordingHooks {
    fn mutate(
        &self,
        model: &mut Note,
        change: Change,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        self.journal.record(format!("hooks.mutate({change:?})"));
        let result = if self.reject == Some("mutate") {
            Err(Failure::bad_request("mutate rejected"))
        } else {
            model.title = model.title.trim().to_string();
            Ok(())
        };
        async move { result }
    }

    fn validate_create(
        &self,
        model: &Note,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        let result = self
            .gate("validate_create")
            .and_then(|()| require_title(&model.title));
        async move { result }
    }

    fn validate_update(
        &self,
        model: &Note,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        let result = self
            .gate("validate_update")
            .and_then(|()| require_title(&model.title));
        async move { result }
    }

    fn validate_delete(
        &self,
        _id: &u64,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        let result = self.gate("validate_delete");
        async move { result }
    }

    fn on_created(
        &self,
        model: &Note,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        self.journal.record(format!("hooks.on_created({})", model.id));
        async {}
    }

    fn on_changed(
        &self,
        model: &Note,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        self.journal.record(format!("hooks.on_changed({})", model.id));
        async {}
    }

    fn on_removed(&self, id: &u64, _cancel: &CancellationToken) -> impl Future<Output = ()> + Send {
        self.journal.record(format!("hooks.on_removed({id})"));
        async {}
    }
}

impl TenantedModelHooks<TenantNote> for RecordingHooks {
    fn mutate(
        &self,
        _tenant: &String,
        model: &mut TenantNote,
        change: Change,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        self.journal.record(format!("hooks.mutate({change:?})"));
        let result = if self.reject == Some("mutate") {
            Err(Failure::bad_request("mutate rejected"))
        } else {
            model.title = model.title.trim().to_string();
            if let Some(tenant) = &self.move_to_tenant {
                model.tenant.clone_from(tenant);
            }
            Ok(())
        };
        async move { result }
    }

    fn validate_create(
        &self,
        _tenant: &String,
        model: &TenantNote,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        let result = self
            .gate("validate_create")
            .and_then(|()| require_title(&model.title));
        async move { result }
    }

    fn validate_update(
        &self,
        _tenant: &String,
        model: &TenantNote,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        let result = self
            .gate("validate_update")
            .and_then(|()| require_title(&model.title));
        async move { result }
    }

    fn validate_delete(
        &self,
        _tenant: &String,
        _id: &u64,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<()>> + Send {
        let result = self.gate("validate_delete");
        async move { result }
    }

    fn on_created(
        &self,
        tenant: &String,
        model: &TenantNote,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        self.journal
            .record(format!("hooks.on_created({tenant}, {})", model.id));
        async {}
    }

    fn on_changed(
        &self,
        tenant: &String,
        model: &TenantNote,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        self.journal
            .record(format!("hooks.on_changed({tenant}, {})", model.id));
        async {}
    }

    fn on_removed(
        &self,
        tenant: &String,
        id: &u64,
        _cancel: &CancellationToken,
    ) -> impl Future<Output = ()> + Send {
        self.journal
            .record(format!("hooks.on_removed({tenant}, {id})"));
        async {}
    }
}
