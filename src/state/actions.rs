use crate::filter::SortColumn;

use super::types::{ExtraState, StatePatch, ToolbarFilters};

/// The full set of state transitions a list view can request. Every
/// mutation of a [`super::ListStore`](super::store::ListStore) goes through
/// exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Updates the draft only; committed values are untouched.
    SetToolbarFilters(ToolbarFilters),
    /// Commits immediately, no draft step.
    SetExtraState(ExtraState),
    SetSort(Vec<SortColumn>),
    SetPage(u32),
    SetPageSize(u32),
    SetSelectedId(Option<String>),
    /// Commits the payload as both draft and applied values.
    ApplyToolbarFilters(ToolbarFilters),
    ResetAllFilters,
    /// One-shot hydration from the URL on mount or navigation.
    InitializeFromUrl(StatePatch),
    /// Clears the selection when it no longer appears in the fetched rows.
    VerifySelection { available_ids: Vec<String>, from_url: bool },
}

/// Caller-visible signal produced by a dispatch. The only current case is a
/// URL-restored selection that vanished from the result set, which callers
/// are expected to surface to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    SelectionNotFound { selected_id: String },
}
