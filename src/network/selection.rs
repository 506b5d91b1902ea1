use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::network::WalkCategory;

/// Label that stands for "no filtering".
pub const ALL_SENTINEL: &str = "ALL";

/// State of the category multi-select.
///
/// `Empty` and `All` are distinct on purpose: the map draws nothing for an
/// empty selection while the scatter charts fall back to the full data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    All,
    Categories(BTreeSet<WalkCategory>),
}

impl Selection {
    /// Build a selection from raw control values.
    /// Unknown labels are ignored; a list of only unknown labels selects nothing.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        if labels.is_empty() { return Selection::Empty }

        if labels.iter().any(|label| label.as_ref().trim().eq_ignore_ascii_case(ALL_SENTINEL)) {
            return Selection::All
        }

        Selection::Categories(
            labels.iter()
                .filter_map(|label| WalkCategory::from_label(label.as_ref()))
                .collect()
        )
    }

    pub fn every_category() -> Self {
        Selection::Categories(WalkCategory::order().into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Membership test used when filtering.
    /// `Empty` admits every category; callers that need "blank" handle it first.
    pub fn admits(&self, category: WalkCategory) -> bool {
        match self {
            Selection::Empty | Selection::All => true,
            Selection::Categories(set) => set.contains(&category),
        }
    }

    /// Labels as the multi-select would report them.
    pub fn labels(&self) -> Vec<String> {
        match self {
            Selection::Empty => Vec::new(),
            Selection::All => vec![ALL_SENTINEL.to_string()],
            Selection::Categories(set) => set.iter().map(|category| category.label().to_string()).collect(),
        }
    }
}

/// Wire form of the multi-select value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl From<&SelectionRequest> for Selection {
    fn from(request: &SelectionRequest) -> Self {
        match &request.categories {
            Some(labels) => Selection::from_labels(labels),
            None => Selection::Empty,
        }
    }
}
