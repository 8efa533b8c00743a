//! Filtered views over the todo collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Todo;

/// Which subset of the list is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOption {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterOption {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            FilterOption::All => true,
            FilterOption::Active => !todo.completed,
            FilterOption::Completed => todo.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterOption::All => "all",
            FilterOption::Active => "active",
            FilterOption::Completed => "completed",
        }
    }

    /// Lenient parse: anything unrecognized selects `All`.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for FilterOption {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterOption::All),
            "active" => Ok(FilterOption::Active),
            "completed" => Ok(FilterOption::Completed),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter option: {0}")]
pub struct UnknownFilter(pub String);

/// The todos matching `filter`, in collection order.
pub fn derive_visible(todos: &[Todo], filter: FilterOption) -> Vec<Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).cloned().collect()
}

/// Number of todos that are not completed.
pub fn active_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|todo| !todo.completed).count()
}

/// Whether the "Clear completed" control is shown.
///
/// Compares the active subset with the visible subset, so the answer depends
/// on the current filter: under `Active` it is always false.
pub fn is_clear_needed(todos: &[Todo], filter: FilterOption) -> bool {
    let visible = todos.iter().filter(|todo| filter.matches(todo)).count();
    active_count(todos) != visible
}

/// Label for the footer counter.
pub fn items_left_label(count: usize) -> String {
    if count == 1 {
        "1 item left".to_string()
    } else {
        format!("{count} items left")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: u64, completed: bool) -> Todo {
        Todo {
            id,
            user_id: 1,
            title: format!("todo {id}"),
            completed,
        }
    }

    fn ids(todos: &[Todo]) -> Vec<u64> {
        todos.iter().map(|t| t.id).collect()
    }

    #[test]
    fn visible_per_filter() {
        let todos = vec![todo(1, false), todo(2, true), todo(3, false)];
        assert_eq!(ids(&derive_visible(&todos, FilterOption::All)), vec![1, 2, 3]);
        assert_eq!(ids(&derive_visible(&todos, FilterOption::Active)), vec![1, 3]);
        assert_eq!(ids(&derive_visible(&todos, FilterOption::Completed)), vec![2]);
    }

    #[test]
    fn unknown_value_behaves_like_all() {
        assert_eq!(FilterOption::parse_lenient("archived"), FilterOption::All);
        assert_eq!(FilterOption::parse_lenient(" Active "), FilterOption::Active);
        assert!("archived".parse::<FilterOption>().is_err());
    }

    #[test]
    fn clear_needed_depends_on_filter() {
        let todos = vec![todo(1, false), todo(2, true)];
        assert!(is_clear_needed(&todos, FilterOption::All));
        assert!(!is_clear_needed(&todos, FilterOption::Active));
        // one active vs one completed visible: same size, so hidden
        assert!(!is_clear_needed(&todos, FilterOption::Completed));
    }

    #[test]
    fn clear_not_needed_when_nothing_completed() {
        let todos = vec![todo(1, false), todo(2, false)];
        assert!(!is_clear_needed(&todos, FilterOption::All));
    }

    #[test]
    fn items_left_pluralizes() {
        assert_eq!(items_left_label(0), "0 items left");
        assert_eq!(items_left_label(1), "1 item left");
        assert_eq!(items_left_label(4), "4 items left");
    }

    #[test]
    fn filter_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FilterOption::Completed).unwrap(), r#""completed""#);
    }
}
