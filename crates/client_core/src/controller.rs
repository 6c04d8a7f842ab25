//! List controller: filter → sort → paginate over the full collection, plus
//! reload-and-locate after every confirmed mutation.
//!
//! The filtered view is stored as positions into the full collection and is
//! recomputed from scratch whenever the collection, criteria or sort change, so
//! it is always derivable from that state alone.
//!
//! Reloads are tagged with a monotonically increasing sequence number. A
//! response is applied only if its tag is newer than the last applied one;
//! older responses are discarded. Once a view is detached every late response
//! is dropped.

use std::{fmt, future::Future, num::NonZeroUsize, sync::Arc};

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::{
    filter::{filter_positions, toggle, FilterCriteria},
    pagination::Pager,
    record::ListRecord,
    sort::{sort_positions, SortKey},
    source::{DataSource, SourceError},
    validation::{FormState, Validate, ValidationErrors},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    /// Last load failed and the builtin sample is on screen.
    IdleWithFallback,
    Mutating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Message for the toast/alert collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    /// Blocking notices require acknowledgement; others are toasts.
    pub blocking: bool,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, blocking: bool, message: impl Into<String>) -> Self {
        Self {
            level,
            blocking,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Deactivate,
    Restore,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Deactivate => "deactivate",
            Self::Restore => "restore",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState<Id> {
    Closed,
    Viewing(Id),
    Editing(Id),
    Creating,
}

/// Modal and page-scroll state owned by the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<Id> {
    pub modal: ModalState<Id>,
}

impl<Id> ViewState<Id> {
    /// Page scrolling is locked exactly while a modal is open.
    pub fn scroll_locked(&self) -> bool {
        !matches!(self.modal, ModalState::Closed)
    }
}

#[derive(Debug)]
pub enum ReloadOutcome {
    Applied { count: usize },
    /// Fetch failed; the fallback sample replaced the collection.
    Fallback(SourceError),
    /// A newer reload was already applied.
    Stale,
    Detached,
}

#[derive(Debug)]
pub struct MutationOutcome<Id> {
    pub id: Option<Id>,
    pub reload: ReloadOutcome,
    pub page: usize,
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("invalid form: {0}")]
    Validation(ValidationErrors),
    #[error("{kind} failed: {source}")]
    Mutation {
        kind: MutationKind,
        source: SourceError,
    },
    #[error("no {kind} with id {id} in the current collection")]
    UnknownRecord { kind: &'static str, id: String },
    #[error("list view is detached")]
    Detached,
}

/// What the presentation layer renders in one cycle.
#[derive(Debug, Clone)]
pub struct ListSnapshot<R: ListRecord, F> {
    pub items: Vec<R>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_len: usize,
    pub criteria: F,
    pub sort: Option<SortKey>,
    pub phase: ListPhase,
    pub highlighted: Option<R::Id>,
    pub view: ViewState<R::Id>,
}

pub struct ListState<R: ListRecord, F> {
    records: Vec<R>,
    view: Vec<usize>,
    criteria: F,
    sort: Option<SortKey>,
    pager: Pager,
    fallback: bool,
    loads_in_flight: usize,
    mutations_in_flight: usize,
    issued_reloads: u64,
    applied_reload: u64,
    attached: bool,
    highlighted: Option<R::Id>,
    notices: Vec<Notice>,
    modal: ModalState<R::Id>,
}

impl<R: ListRecord, F: FilterCriteria<R>> ListState<R, F> {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            records: Vec::new(),
            view: Vec::new(),
            criteria: F::default(),
            sort: None,
            pager: Pager::new(page_size),
            fallback: false,
            loads_in_flight: 0,
            mutations_in_flight: 0,
            issued_reloads: 0,
            applied_reload: 0,
            attached: true,
            highlighted: None,
            notices: Vec::new(),
            modal: ModalState::Closed,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn filtered(&self) -> Vec<&R> {
        self.view.iter().map(|&position| &self.records[position]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    pub fn current_page(&self) -> Vec<&R> {
        self.view[self.pager.bounds(self.view.len())]
            .iter()
            .map(|&position| &self.records[position])
            .collect()
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.pager.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.view.len())
    }

    pub fn criteria(&self) -> &F {
        &self.criteria
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn phase(&self) -> ListPhase {
        if self.mutations_in_flight > 0 {
            ListPhase::Mutating
        } else if self.loads_in_flight > 0 {
            ListPhase::Loading
        } else if self.fallback {
            ListPhase::IdleWithFallback
        } else {
            ListPhase::Idle
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn highlighted(&self) -> Option<&R::Id> {
        self.highlighted.as_ref()
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    pub fn find(&self, id: &R::Id) -> Option<&R> {
        self.records
            .iter()
            .find(|record| record.record_id().as_ref() == Some(id))
    }

    pub fn set_criteria(&mut self, criteria: F) {
        self.criteria = criteria;
        self.pager.reset();
        self.recompute();
    }

    pub fn update_criteria(&mut self, change: impl FnOnce(&mut F)) {
        let mut criteria = self.criteria.clone();
        change(&mut criteria);
        self.set_criteria(criteria);
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.sort = sort;
        self.pager.reset();
        self.recompute();
    }

    /// Selecting the active key again clears the ordering.
    pub fn toggle_sort(&mut self, key: SortKey) {
        let mut sort = self.sort;
        toggle(&mut sort, key);
        self.set_sort(sort);
    }

    pub fn reset_filters(&mut self) {
        self.criteria = F::default();
        self.sort = None;
        self.pager.reset();
        self.recompute();
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next(self.view.len())
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev()
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pager.go_to(page, self.view.len());
    }

    /// Replaces the full collection, keeping criteria, sort and (clamped) page.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.recompute();
        self.pager.clamp(self.view.len());
    }

    /// Moves to the page showing `id`; leaves the page alone if it is filtered out.
    pub fn jump_to(&mut self, id: &R::Id) -> bool {
        let found = self
            .view
            .iter()
            .position(|&position| self.records[position].record_id().as_ref() == Some(id));
        match found {
            Some(index) => {
                self.pager.show_index(index);
                debug!(kind = R::KIND, %id, index, page = self.pager.page(), "jumped to record");
                true
            }
            None => {
                self.pager.clamp(self.view.len());
                debug!(kind = R::KIND, %id, "record not in filtered view; page unchanged");
                false
            }
        }
    }

    pub fn view_state(&self) -> ViewState<R::Id> {
        ViewState {
            modal: self.modal.clone(),
        }
    }

    pub fn open_view(&mut self, id: R::Id) {
        self.modal = ModalState::Viewing(id);
    }

    pub fn open_edit(&mut self, id: R::Id) {
        self.modal = ModalState::Editing(id);
    }

    pub fn open_create(&mut self) {
        self.modal = ModalState::Creating;
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    pub fn push_notice(&mut self, level: NoticeLevel, blocking: bool, message: impl Into<String>) {
        self.notices.push(Notice::new(level, blocking, message));
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn snapshot(&self) -> ListSnapshot<R, F> {
        ListSnapshot {
            items: self.current_page().into_iter().cloned().collect(),
            page: self.page(),
            total_pages: self.total_pages(),
            filtered_len: self.filtered_len(),
            criteria: self.criteria.clone(),
            sort: self.sort,
            phase: self.phase(),
            highlighted: self.highlighted.clone(),
            view: self.view_state(),
        }
    }

    fn recompute(&mut self) {
        let mut view = filter_positions(&self.records, &self.criteria);
        sort_positions(&self.records, &mut view, self.sort);
        self.view = view;
        debug!(
            kind = R::KIND,
            total = self.records.len(),
            filtered = self.view.len(),
            page = self.pager.page(),
            "recomputed list view"
        );
    }

    fn begin_reload(&mut self) -> u64 {
        self.issued_reloads += 1;
        self.loads_in_flight += 1;
        self.issued_reloads
    }

    fn finish_reload(&mut self, ticket: u64, result: Result<Vec<R>, SourceError>) -> ReloadOutcome {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        if !self.attached {
            debug!(kind = R::KIND, ticket, "dropping reload for detached view");
            return ReloadOutcome::Detached;
        }
        if ticket <= self.applied_reload {
            warn!(
                kind = R::KIND,
                ticket,
                applied = self.applied_reload,
                "discarding out-of-order reload"
            );
            return ReloadOutcome::Stale;
        }
        self.applied_reload = ticket;

        match result {
            Ok(mut records) => {
                if R::NEWEST_FIRST {
                    records.reverse();
                }
                let count = records.len();
                self.fallback = false;
                self.replace_records(records);
                info!(kind = R::KIND, ticket, count, "collection loaded");
                ReloadOutcome::Applied { count }
            }
            Err(err) => {
                warn!(kind = R::KIND, ticket, error = %err, "load failed; showing fallback sample");
                self.fallback = true;
                self.replace_records(R::fallback_sample());
                self.push_notice(
                    NoticeLevel::Info,
                    false,
                    format!(
                        "Could not load {} records from the server. Showing sample data.",
                        R::KIND
                    ),
                );
                ReloadOutcome::Fallback(err)
            }
        }
    }
}

pub struct ListController<R: ListRecord, F> {
    source: Arc<dyn DataSource<R>>,
    state: Mutex<ListState<R, F>>,
}

impl<R: ListRecord, F: FilterCriteria<R>> ListController<R, F> {
    pub fn new(source: Arc<dyn DataSource<R>>, page_size: NonZeroUsize) -> Self {
        Self {
            source,
            state: Mutex::new(ListState::new(page_size)),
        }
    }

    /// Locks the view state for presentation events (filter, sort, paging, modals).
    pub async fn state(&self) -> MutexGuard<'_, ListState<R, F>> {
        self.state.lock().await
    }

    pub async fn snapshot(&self) -> ListSnapshot<R, F> {
        self.state.lock().await.snapshot()
    }

    pub async fn take_notices(&self) -> Vec<Notice> {
        self.state.lock().await.take_notices()
    }

    /// Marks the view as gone; responses still in flight are ignored.
    pub async fn detach(&self) {
        let mut state = self.state.lock().await;
        state.attached = false;
        state.close_modal();
        info!(kind = R::KIND, "list view detached");
    }

    /// Fetches the full collection, falling back to the builtin sample on failure.
    pub async fn load(&self) -> ReloadOutcome {
        let ticket = {
            let mut state = self.state.lock().await;
            if !state.attached {
                return ReloadOutcome::Detached;
            }
            state.begin_reload()
        };
        debug!(kind = R::KIND, ticket, "loading collection");

        let result = self.source.fetch_all().await;

        self.state.lock().await.finish_reload(ticket, result)
    }

    pub async fn create(&self, record: R) -> Result<MutationOutcome<R::Id>, ListError> {
        let source = Arc::clone(&self.source);
        self.run_mutation(MutationKind::Create, None, async move {
            source.create(record).await.map(|created| created.record_id())
        })
        .await
    }

    pub async fn update(&self, id: R::Id, record: R) -> Result<MutationOutcome<R::Id>, ListError> {
        let source = Arc::clone(&self.source);
        let target = id.clone();
        self.run_mutation(MutationKind::Update, Some(id), async move {
            source
                .update(&target, record)
                .await
                .map(|updated| updated.record_id())
        })
        .await
    }

    /// Soft deletes an active record or restores an inactive one.
    pub async fn toggle_status(&self, id: &R::Id) -> Result<MutationOutcome<R::Id>, ListError> {
        let active = {
            let state = self.state.lock().await;
            if !state.attached {
                return Err(ListError::Detached);
            }
            state
                .find(id)
                .map(ListRecord::is_active)
                .ok_or_else(|| ListError::UnknownRecord {
                    kind: R::KIND,
                    id: id.to_string(),
                })?
        };
        let kind = if active {
            MutationKind::Deactivate
        } else {
            MutationKind::Restore
        };

        let source = Arc::clone(&self.source);
        let target = id.clone();
        self.run_mutation(kind, Some(id.clone()), async move {
            source.set_status(&target, !active).await.map(|()| None)
        })
        .await
    }

    /// Validates the form and creates or updates depending on whether the draft
    /// already has an identifier. Invalid forms never reach the data source.
    pub async fn submit<D>(
        &self,
        form: &mut FormState<D>,
        today: NaiveDate,
    ) -> Result<MutationOutcome<R::Id>, ListError>
    where
        D: Validate<Output = R>,
    {
        let record = match form.check(today) {
            Ok(record) => record,
            Err(errors) => {
                debug!(kind = R::KIND, invalid = errors.len(), "form rejected locally");
                self.state.lock().await.push_notice(
                    NoticeLevel::Warning,
                    true,
                    "Complete every field correctly.",
                );
                return Err(ListError::Validation(errors));
            }
        };

        match record.record_id() {
            Some(id) => self.update(id, record).await,
            None => self.create(record).await,
        }
    }

    async fn run_mutation<Fut>(
        &self,
        kind: MutationKind,
        target: Option<R::Id>,
        call: Fut,
    ) -> Result<MutationOutcome<R::Id>, ListError>
    where
        Fut: Future<Output = Result<Option<R::Id>, SourceError>>,
    {
        {
            let mut state = self.state.lock().await;
            if !state.attached {
                return Err(ListError::Detached);
            }
            state.mutations_in_flight += 1;
        }
        info!(kind = R::KIND, mutation = %kind, "mutation requested");

        let result = call.await;

        let id = {
            let mut state = self.state.lock().await;
            state.mutations_in_flight = state.mutations_in_flight.saturating_sub(1);
            match result {
                Err(source) => {
                    error!(kind = R::KIND, mutation = %kind, error = %source, "mutation failed");
                    if state.attached {
                        state.push_notice(
                            NoticeLevel::Error,
                            true,
                            format!("Could not {kind} the {}: {}", R::KIND, source.user_message()),
                        );
                    }
                    return Err(ListError::Mutation { kind, source });
                }
                Ok(id) => {
                    let id = id.or(target);
                    if !state.attached {
                        return Ok(MutationOutcome {
                            id,
                            reload: ReloadOutcome::Detached,
                            page: state.page(),
                        });
                    }
                    if matches!(kind, MutationKind::Create | MutationKind::Update) {
                        state.close_modal();
                    }
                    state.highlighted = id.clone();
                    state.push_notice(
                        NoticeLevel::Success,
                        false,
                        format!("The {} was {}d successfully.", R::KIND, kind),
                    );
                    id
                }
            }
        };

        let reload = self.load().await;

        let mut state = self.state.lock().await;
        if let Some(id) = &id {
            if state.attached {
                state.jump_to(id);
            }
        }
        Ok(MutationOutcome {
            id,
            reload,
            page: state.page(),
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
