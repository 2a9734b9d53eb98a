use std::sync::Mutex;

use tokio::sync::watch;

use crate::filter::SortColumn;
use crate::query::{build_list_query, ListQuery};

use super::actions::{Action, Notice};
use super::config::ListConfig;
use super::types::{ExtraState, FilterState, ToolbarFilters};

/// Per-view state container. One instance per mounted list view; all
/// mutation funnels through [`dispatch`](Self::dispatch), and interested
/// parties (the URL synchronizer, data bindings) observe snapshots through
/// a watch channel.
pub struct ListStore {
    config: ListConfig,
    initial: FilterState,
    state: Mutex<FilterState>,
    tx: watch::Sender<FilterState>,
}

impl ListStore {
    pub fn new(config: ListConfig) -> Self {
        let initial = config.initial_state();
        let (tx, _) = watch::channel(initial.clone());
        Self { config, state: Mutex::new(initial.clone()), initial, tx }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn snapshot(&self) -> FilterState {
        self.lock().clone()
    }

    /// Receiver that sees every state change after the current value.
    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.tx.subscribe()
    }

    /// Applies an action and publishes the new state. The reducer is a
    /// total function over a closed action set, so a dispatch can neither
    /// fail nor leave the state partially updated.
    pub fn dispatch(&self, action: Action) -> Option<Notice> {
        let mut state = self.lock();
        let (next, notice) = reduce(state.clone(), action, &self.initial);
        if *state != next {
            *state = next.clone();
            drop(state);
            let _ = self.tx.send(next);
        }
        notice
    }

    // -- convenience dispatchers -------------------------------------------

    pub fn set_toolbar_filters(&self, filters: ToolbarFilters) {
        self.dispatch(Action::SetToolbarFilters(filters));
    }

    pub fn set_extra_state(&self, extra: ExtraState) {
        self.dispatch(Action::SetExtraState(extra));
    }

    pub fn set_sort(&self, sort: Vec<SortColumn>) {
        self.dispatch(Action::SetSort(sort));
    }

    pub fn set_page(&self, page: u32) {
        self.dispatch(Action::SetPage(page));
    }

    pub fn set_page_size(&self, page_size: u32) {
        self.dispatch(Action::SetPageSize(page_size));
    }

    pub fn set_selected_id(&self, id: Option<String>) {
        self.dispatch(Action::SetSelectedId(id));
    }

    pub fn apply_toolbar_filters(&self, filters: ToolbarFilters) {
        self.dispatch(Action::ApplyToolbarFilters(filters));
    }

    /// Commits whatever is currently sitting in the draft.
    pub fn apply_current_filters(&self) {
        let draft = self.lock().toolbar_filters.clone();
        self.dispatch(Action::ApplyToolbarFilters(draft));
    }

    pub fn reset_all_filters(&self) {
        self.dispatch(Action::ResetAllFilters);
    }

    pub fn verify_selection(&self, available_ids: Vec<String>, from_url: bool) -> Option<Notice> {
        self.dispatch(Action::VerifySelection { available_ids, from_url })
    }

    pub fn set_search_term(&self, search: impl Into<String>) {
        let mut draft = self.lock().toolbar_filters.clone();
        draft.search = search.into();
        self.dispatch(Action::SetToolbarFilters(draft));
    }

    pub fn clear_search(&self) {
        self.set_search_term("");
    }

    pub fn next_page(&self, total_pages: u32) {
        let page = self.lock().page;
        if page + 1 < total_pages {
            self.dispatch(Action::SetPage(page + 1));
        }
    }

    pub fn prev_page(&self) {
        let page = self.lock().page;
        if page > 0 {
            self.dispatch(Action::SetPage(page - 1));
        }
    }

    pub fn go_to_page(&self, page: u32, total_pages: u32) {
        if page < total_pages {
            self.dispatch(Action::SetPage(page));
        }
    }

    // -- derived state ------------------------------------------------------

    /// Whether the given draft (or the stored one) differs from the applied
    /// filters, i.e. the user edited inputs without hitting apply.
    pub fn has_pending_changes(&self, draft: Option<&ToolbarFilters>) -> bool {
        let state = self.lock();
        let compare = draft.unwrap_or(&state.toolbar_filters);
        *compare != state.applied_toolbar_filters
    }

    /// Whether anything that drives the query differs from the defaults.
    pub fn has_active_filters(&self) -> bool {
        let state = self.lock();
        state.applied_toolbar_filters != self.initial.applied_toolbar_filters
            || state.extra_state != self.initial.extra_state
            || state.sort != self.initial.sort
    }

    pub fn can_reset(&self) -> bool {
        self.has_active_filters()
    }

    /// Backend request for the current committed state.
    pub fn query(&self) -> ListQuery {
        build_list_query(&self.config, &self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FilterState> {
        // A poisoned lock still holds consistent state: the reducer swaps
        // whole values and never unwinds mid-update.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn reduce(
    mut state: FilterState,
    action: Action,
    initial: &FilterState,
) -> (FilterState, Option<Notice>) {
    match action {
        Action::SetToolbarFilters(filters) => {
            state.toolbar_filters = filters;
            state.page = 0;
        }
        Action::SetExtraState(extra) => {
            state.extra_state = extra;
            state.page = 0;
        }
        Action::SetSort(sort) => {
            state.sort = sort;
            state.page = 0;
        }
        Action::SetPage(page) => {
            state.page = page;
            state.selected_id = None;
        }
        Action::SetPageSize(page_size) => {
            state.page_size = page_size.max(1);
            state.page = 0;
            state.selected_id = None;
        }
        Action::SetSelectedId(id) => {
            state.selected_id = id;
        }
        Action::ApplyToolbarFilters(filters) => {
            state.toolbar_filters = filters.clone();
            state.applied_toolbar_filters = filters;
            state.page = 0;
        }
        Action::ResetAllFilters => {
            state = initial.clone();
        }
        Action::InitializeFromUrl(patch) => {
            patch.apply_to(&mut state);
        }
        Action::VerifySelection { available_ids, from_url } => {
            if let Some(selected) = state.selected_id.clone() {
                if !available_ids.iter().any(|id| *id == selected) {
                    if from_url {
                        tracing::warn!(
                            selected_id = %selected,
                            "url-restored selection not present in current results"
                        );
                        state.selected_id = None;
                        return (state, Some(Notice::SelectionNotFound { selected_id: selected }));
                    }
                    tracing::debug!(selected_id = %selected, "clearing stale selection");
                    state.selected_id = None;
                }
            }
        }
    }
    (state, None)
}
