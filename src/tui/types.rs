//! Type definitions for the TUI application.

use fuzzy_matcher::FuzzyMatcher;

use crate::runner::RunnerError;

/// Active dialog type
#[derive(Debug, Clone, PartialEq)]
pub enum DialogType {
    None,
    ModelSelector,
}

/// Item for selection dialogs
#[derive(Debug, Clone)]
pub struct SelectItem {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
}

/// Dialog state for selection dialogs
#[derive(Debug, Clone)]
pub struct DialogState {
    pub dialog_type: DialogType,
    pub items: Vec<SelectItem>,
    pub selected_index: usize,
    pub search_query: String,
    pub filtered_indices: Vec<usize>,
    pub title: String,
}

impl DialogState {
    pub fn new(dialog_type: DialogType, title: &str) -> Self {
        Self {
            dialog_type,
            items: Vec::new(),
            selected_index: 0,
            search_query: String::new(),
            filtered_indices: Vec::new(),
            title: title.to_string(),
        }
    }

    pub fn with_items(mut self, items: Vec<SelectItem>) -> Self {
        self.filtered_indices = (0..items.len()).collect();
        self.items = items;
        self
    }

    pub fn update_filter(&mut self) {
        if self.search_query.is_empty() {
            self.filtered_indices = (0..self.items.len()).collect();
        } else {
            let matcher = fuzzy_matcher::skim::SkimMatcherV2::default();

            // Score each item and filter
            let mut scored_items: Vec<(usize, i64)> = self
                .items
                .iter()
                .enumerate()
                .filter_map(|(idx, item)| {
                    let label_score = matcher.fuzzy_match(&item.label, &self.search_query);
                    let id_score = matcher.fuzzy_match(&item.id, &self.search_query);

                    // Use the best score
                    let best_score = [label_score, id_score].into_iter().flatten().max()?;

                    Some((idx, best_score))
                })
                .collect();

            // Sort by score (descending)
            scored_items.sort_by(|a, b| b.1.cmp(&a.1));

            self.filtered_indices = scored_items.into_iter().map(|(idx, _)| idx).collect();
        }
        self.selected_index = 0;
    }

    pub fn selected_item(&self) -> Option<&SelectItem> {
        self.filtered_indices
            .get(self.selected_index)
            .and_then(|&i| self.items.get(i))
    }

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.filtered_indices.len() {
            self.selected_index += 1;
        }
    }
}

/// Application events for the TUI event loop.
///
/// Exactly one `RunnerDone` is delivered per dispatched request; the event
/// loop arm that consumes it re-enables sending on every completion path.
#[derive(Debug)]
pub enum AppEvent {
    RunnerDone(Result<String, RunnerError>),
}

#[cfg(test)]
mod tests {
    use super::*;

    mod dialog_state {
        use super::*;

        fn create_items() -> Vec<SelectItem> {
            vec![
                SelectItem {
                    id: "llama3:latest".to_string(),
                    label: "llama3:latest".to_string(),
                    description: None,
                },
                SelectItem {
                    id: "mistral:7b".to_string(),
                    label: "mistral:7b".to_string(),
                    description: None,
                },
                SelectItem {
                    id: "llama2:13b".to_string(),
                    label: "llama2:13b".to_string(),
                    description: None,
                },
            ]
        }

        #[test]
        fn test_new() {
            let dialog = DialogState::new(DialogType::ModelSelector, "Select Model");

            assert_eq!(dialog.dialog_type, DialogType::ModelSelector);
            assert_eq!(dialog.title, "Select Model");
            assert_eq!(dialog.selected_index, 0);
            assert!(dialog.items.is_empty());
        }

        #[test]
        fn test_with_items() {
            let dialog = DialogState::new(DialogType::ModelSelector, "Select Model")
                .with_items(create_items());

            assert_eq!(dialog.items.len(), 3);
            assert_eq!(dialog.filtered_indices.len(), 3);
        }

        #[test]
        fn test_move_down_does_not_wrap() {
            let mut dialog = DialogState::new(DialogType::ModelSelector, "Select Model")
                .with_items(create_items());

            dialog.move_down();
            dialog.move_down();
            assert_eq!(dialog.selected_index, 2);
            dialog.move_down();
            assert_eq!(dialog.selected_index, 2);
        }

        #[test]
        fn test_move_up_does_not_wrap() {
            let mut dialog = DialogState::new(DialogType::ModelSelector, "Select Model")
                .with_items(create_items());

            dialog.selected_index = 1;
            dialog.move_up();
            assert_eq!(dialog.selected_index, 0);
            dialog.move_up();
            assert_eq!(dialog.selected_index, 0);
        }

        #[test]
        fn test_selected_item() {
            let dialog = DialogState::new(DialogType::ModelSelector, "Select Model")
                .with_items(create_items());

            let selected = dialog.selected_item().unwrap();
            assert_eq!(selected.id, "llama3:latest");
        }

        #[test]
        fn test_update_filter_matches() {
            let mut dialog = DialogState::new(DialogType::ModelSelector, "Select Model")
                .with_items(create_items());

            dialog.search_query = "llama".to_string();
            dialog.update_filter();

            assert!(dialog.filtered_indices.len() >= 2);
        }

        #[test]
        fn test_update_filter_no_match() {
            let mut dialog = DialogState::new(DialogType::ModelSelector, "Select Model")
                .with_items(create_items());

            dialog.search_query = "xyz123notfound".to_string();
            dialog.update_filter();

            assert!(dialog.filtered_indices.is_empty());
            assert!(dialog.selected_item().is_none());
        }

        #[test]
        fn test_update_filter_cleared_restores_all() {
            let mut dialog = DialogState::new(DialogType::ModelSelector, "Select Model")
                .with_items(create_items());

            dialog.search_query = "mistral".to_string();
            dialog.update_filter();
            dialog.search_query.clear();
            dialog.update_filter();

            assert_eq!(dialog.filtered_indices.len(), 3);
        }
    }
}
