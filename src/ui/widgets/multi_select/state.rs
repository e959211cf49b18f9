// src/ui/widgets/multi_select/state.rs
use indexmap::IndexSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiSelectState {
    /// Candidate labels, in display order.
    pub options: Vec<String>,
    /// Chosen labels, in the order they were added.
    pub selected: IndexSet<String>,
    pub query: String,
    /// Offset into [`MultiSelectState::visible`]; `None` means nothing is focused.
    pub focused: Option<usize>,
    pub open: bool,
}

impl MultiSelectState {
    pub fn new<I>(options: Vec<String>, initial: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            options,
            selected: initial.into_iter().collect(),
            query: String::new(),
            focused: None,
            open: false,
        }
    }

    /// Candidates that are not selected and match every query token.
    pub fn visible(&self) -> Vec<&str> {
        filter_candidates(&self.options, &self.selected, &self.query)
    }

    pub fn selected(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn focused_item(&self) -> Option<&str> {
        let index = self.focused?;
        self.visible().get(index).copied()
    }
}

/// `options` minus `selected`, keeping items that contain every whitespace
/// token of `query` as a case-insensitive substring.
pub fn filter_candidates<'a>(
    options: &'a [String],
    selected: &IndexSet<String>,
    query: &str,
) -> Vec<&'a str> {
    let lowered = query.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    options
        .iter()
        .filter(|option| !selected.contains(option.as_str()))
        .filter(|option| {
            if words.is_empty() {
                return true;
            }
            let haystack = option.to_lowercase();
            words.iter().all(|word| haystack.contains(word))
        })
        .map(String::as_str)
        .collect()
}

// ----------------------------------------------------------------------------
// INTENT - What the user asked for
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum MultiSelectIntent {
    Open,
    Close,
    Toggle,
    SetQuery(String),
    Add(String),
    Remove(String),
    Clear,
    FocusNext,
    FocusPrevious,
    /// Add the focused candidate.
    Confirm,
    /// Replace the candidate list, keeping the selection.
    SetOptions(Vec<String>),
}

// ----------------------------------------------------------------------------
// EVENTS - Things that happened (past tense)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum MultiSelectEvent {
    /// Snapshot of the selection after a mutation.
    SelectionChanged(Vec<String>),
    Opened,
    Closed,
    FocusMoved { index: usize },
}

// ----------------------------------------------------------------------------
// STATE MACHINE - Pure function: (State, Intent) -> (State, Vec<Event>)
// ----------------------------------------------------------------------------

pub struct MultiSelectStateMachine;

impl MultiSelectStateMachine {
    pub fn transition(
        state: MultiSelectState,
        intent: MultiSelectIntent,
    ) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        use MultiSelectIntent::*;

        match intent {
            Open => Self::handle_open(state),
            Close => Self::handle_close(state),
            Toggle => {
                if state.open {
                    Self::handle_close(state)
                } else {
                    Self::handle_open(state)
                }
            }
            SetQuery(query) => Self::handle_set_query(state, query),
            Add(item) => Self::handle_add(state, item),
            Remove(item) => Self::handle_remove(state, item),
            Clear => Self::handle_clear(state),
            FocusNext => Self::handle_focus_next(state),
            FocusPrevious => Self::handle_focus_previous(state),
            Confirm => Self::handle_confirm(state),
            SetOptions(options) => Self::handle_set_options(state, options),
        }
    }

    fn handle_open(mut state: MultiSelectState) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        if state.open {
            return (state, vec![]);
        }
        state.open = true;
        (state, vec![MultiSelectEvent::Opened])
    }

    fn handle_close(mut state: MultiSelectState) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        if !state.open {
            return (state, vec![]);
        }
        state.open = false;
        (state, vec![MultiSelectEvent::Closed])
    }

    fn handle_set_query(mut state: MultiSelectState, query: String) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        state.query = query;
        if state.open {
            state.focused = Some(0);
            (state, vec![MultiSelectEvent::FocusMoved { index: 0 }])
        } else {
            (state, vec![])
        }
    }

    fn handle_add(mut state: MultiSelectState, item: String) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        let mut events = Vec::new();

        let is_candidate = state.options.iter().any(|o| *o == item);
        if is_candidate && state.selected.insert(item) {
            events.push(MultiSelectEvent::SelectionChanged(state.selected()));
        }

        let (state, close_events) = Self::handle_close(state);
        events.extend(close_events);
        (state, events)
    }

    fn handle_remove(mut state: MultiSelectState, item: String) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        if state.selected.shift_remove(&item) {
            let snapshot = state.selected();
            (state, vec![MultiSelectEvent::SelectionChanged(snapshot)])
        } else {
            (state, vec![])
        }
    }

    fn handle_clear(mut state: MultiSelectState) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        state.selected.clear();
        state.query.clear();
        state.focused = None;
        (state, vec![MultiSelectEvent::SelectionChanged(Vec::new())])
    }

    fn handle_focus_next(mut state: MultiSelectState) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        let count = state.visible().len();
        if !state.open || count == 0 {
            return (state, vec![]);
        }

        let index = match state.focused {
            Some(current) if current + 1 < count => current + 1,
            _ => 0,
        };
        state.focused = Some(index);
        (state, vec![MultiSelectEvent::FocusMoved { index }])
    }

    fn handle_focus_previous(mut state: MultiSelectState) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        let count = state.visible().len();
        if !state.open || count == 0 {
            return (state, vec![]);
        }

        let index = match state.focused {
            Some(current) if current > 0 && current < count => current - 1,
            _ => count - 1,
        };
        state.focused = Some(index);
        (state, vec![MultiSelectEvent::FocusMoved { index }])
    }

    fn handle_confirm(state: MultiSelectState) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        if !state.open {
            return (state, vec![]);
        }
        let focused = state.focused_item().map(str::to_string);
        match focused {
            Some(item) => Self::handle_add(state, item),
            None => (state, vec![]),
        }
    }

    fn handle_set_options(mut state: MultiSelectState, options: Vec<String>) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        state.options = options;
        (state, vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Sale".to_string(), "HR".to_string(), "Finance".to_string()]
    }

    fn apply(state: MultiSelectState, intents: Vec<MultiSelectIntent>) -> (MultiSelectState, Vec<MultiSelectEvent>) {
        let mut all_events = Vec::new();
        let mut state = state;
        for intent in intents {
            let (next, events) = MultiSelectStateMachine::transition(state, intent);
            state = next;
            all_events.extend(events);
        }
        (state, all_events)
    }

    #[test]
    fn test_query_then_add_scenario() {
        let state = MultiSelectState::new(options(), Vec::new());

        let (state, _) = apply(state, vec![MultiSelectIntent::SetQuery("sa".to_string())]);
        assert_eq!(state.visible(), vec!["Sale"]);

        let (state, events) = apply(state, vec![MultiSelectIntent::Add("Sale".to_string())]);
        assert_eq!(state.selected(), vec!["Sale".to_string()]);
        assert!(!state.visible().contains(&"Sale"));
        assert_eq!(events, vec![MultiSelectEvent::SelectionChanged(vec!["Sale".to_string()])]);
    }

    #[test]
    fn test_filter_is_and_of_tokens() {
        let options = vec![
            "Sales Report".to_string(),
            "Sales Order".to_string(),
            "Purchase Report".to_string(),
        ];
        let selected = IndexSet::new();

        assert_eq!(
            filter_candidates(&options, &selected, "  REPORT sal "),
            vec!["Sales Report"]
        );
        assert_eq!(filter_candidates(&options, &selected, "   ").len(), 3);
        assert!(filter_candidates(&options, &selected, "report order").is_empty());
    }

    #[test]
    fn test_filter_excludes_selected() {
        let options = options();
        let selected: IndexSet<String> = ["HR".to_string()].into_iter().collect();
        assert_eq!(filter_candidates(&options, &selected, ""), vec!["Sale", "Finance"]);
        assert_eq!(filter_candidates(&options, &selected, "h"), Vec::<&str>::new());
    }

    #[test]
    fn test_set_query_resets_focus_only_when_open() {
        let state = MultiSelectState::new(options(), Vec::new());
        let (state, events) = apply(state, vec![MultiSelectIntent::SetQuery("a".to_string())]);
        assert_eq!(state.focused, None);
        assert!(events.is_empty());

        let (state, events) = apply(
            state,
            vec![
                MultiSelectIntent::Open,
                MultiSelectIntent::FocusNext,
                MultiSelectIntent::FocusNext,
                MultiSelectIntent::SetQuery("an".to_string()),
            ],
        );
        assert_eq!(state.focused, Some(0));
        assert_eq!(events.last(), Some(&MultiSelectEvent::FocusMoved { index: 0 }));
    }

    #[test]
    fn test_duplicate_add_is_ignored_but_closes() {
        let state = MultiSelectState::new(options(), vec!["HR".to_string()]);
        let (state, events) = apply(
            state,
            vec![MultiSelectIntent::Open, MultiSelectIntent::Add("HR".to_string())],
        );
        assert!(!state.open);
        assert_eq!(state.selected(), vec!["HR".to_string()]);
        assert_eq!(events, vec![MultiSelectEvent::Opened, MultiSelectEvent::Closed]);
    }

    #[test]
    fn test_add_ignores_unknown_items() {
        let state = MultiSelectState::new(options(), Vec::new());
        let (state, events) = apply(state, vec![MultiSelectIntent::Add("Payroll".to_string())]);
        assert!(state.selected.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_remove_only_notifies_when_present() {
        let state = MultiSelectState::new(options(), vec!["Sale".to_string(), "HR".to_string()]);

        let (state, events) = apply(state, vec![MultiSelectIntent::Remove("Finance".to_string())]);
        assert!(events.is_empty());

        let (state, events) = apply(state, vec![MultiSelectIntent::Remove("Sale".to_string())]);
        assert_eq!(state.selected(), vec!["HR".to_string()]);
        assert_eq!(events, vec![MultiSelectEvent::SelectionChanged(vec!["HR".to_string()])]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let state = MultiSelectState::new(options(), vec!["Sale".to_string()]);
        let (state, events) = apply(
            state,
            vec![
                MultiSelectIntent::Open,
                MultiSelectIntent::SetQuery("fin".to_string()),
                MultiSelectIntent::Clear,
            ],
        );
        assert!(state.selected.is_empty());
        assert!(state.query.is_empty());
        assert_eq!(state.focused, None);
        assert_eq!(events.last(), Some(&MultiSelectEvent::SelectionChanged(Vec::new())));
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let state = MultiSelectState::new(options(), Vec::new());
        let (mut state, _) = apply(state, vec![MultiSelectIntent::Open]);

        let mut seen = Vec::new();
        for _ in 0..7 {
            let (next, _) = MultiSelectStateMachine::transition(state, MultiSelectIntent::FocusNext);
            state = next;
            seen.push(state.focused.unwrap());
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);

        let mut seen = Vec::new();
        for _ in 0..4 {
            let (next, _) = MultiSelectStateMachine::transition(state, MultiSelectIntent::FocusPrevious);
            state = next;
            seen.push(state.focused.unwrap());
        }
        assert_eq!(seen, vec![2, 1, 0, 2]);
    }

    #[test]
    fn test_focus_previous_from_none_goes_to_last() {
        let state = MultiSelectState::new(options(), Vec::new());
        let (state, _) = apply(state, vec![MultiSelectIntent::Open, MultiSelectIntent::FocusPrevious]);
        assert_eq!(state.focused, Some(2));
    }

    #[test]
    fn test_stale_focus_is_pulled_back_in_range() {
        let state = MultiSelectState {
            focused: Some(5),
            open: true,
            ..MultiSelectState::new(options(), Vec::new())
        };
        let (state, _) = apply(state.clone(), vec![MultiSelectIntent::FocusPrevious]);
        assert_eq!(state.focused, Some(2));

        let state = MultiSelectState { focused: Some(5), ..state };
        let (state, _) = apply(state, vec![MultiSelectIntent::FocusNext]);
        assert_eq!(state.focused, Some(0));
    }

    #[test]
    fn test_navigation_inactive_when_closed() {
        let state = MultiSelectState::new(options(), Vec::new());
        let (state, events) = apply(
            state,
            vec![MultiSelectIntent::FocusNext, MultiSelectIntent::Confirm],
        );
        assert_eq!(state.focused, None);
        assert!(state.selected.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_confirm_adds_focused_and_closes() {
        let state = MultiSelectState::new(options(), Vec::new());
        let (state, events) = apply(
            state,
            vec![
                MultiSelectIntent::Open,
                MultiSelectIntent::FocusNext,
                MultiSelectIntent::FocusNext,
                MultiSelectIntent::Confirm,
            ],
        );
        assert_eq!(state.selected(), vec!["HR".to_string()]);
        assert!(!state.open);
        assert!(events.contains(&MultiSelectEvent::SelectionChanged(vec!["HR".to_string()])));
    }

    #[test]
    fn test_confirm_without_match_does_nothing() {
        let state = MultiSelectState::new(options(), Vec::new());
        let (state, events) = apply(
            state,
            vec![MultiSelectIntent::Open, MultiSelectIntent::SetQuery("zzz".to_string()), MultiSelectIntent::Confirm],
        );
        assert!(state.open);
        assert!(state.selected.is_empty());
        assert!(!events.iter().any(|e| matches!(e, MultiSelectEvent::SelectionChanged(_))));
    }

    #[test]
    fn test_random_add_remove_keeps_invariants() {
        // Deterministic walk over add/remove with a small LCG
        let options = options();
        let mut state = MultiSelectState::new(options.clone(), Vec::new());
        let mut seed: u64 = 0x2545_F491;

        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let item = options[(seed >> 33) as usize % options.len()].clone();
            let intent = if (seed >> 17) & 1 == 0 {
                MultiSelectIntent::Add(item)
            } else {
                MultiSelectIntent::Remove(item)
            };
            let (next, _) = MultiSelectStateMachine::transition(state, intent);
            state = next;

            let selected = state.selected();
            let unique: IndexSet<&String> = selected.iter().collect();
            assert_eq!(unique.len(), selected.len());
            assert!(selected.iter().all(|s| options.contains(s)));
            assert!(state.visible().iter().all(|v| !state.selected.contains(*v)));
        }
    }

    #[test]
    fn test_set_options_keeps_selection() {
        let state = MultiSelectState::new(options(), vec!["Sale".to_string()]);
        let (state, events) = apply(
            state,
            vec![MultiSelectIntent::SetOptions(vec!["Sale".to_string(), "Stock".to_string()])],
        );
        assert!(events.is_empty());
        assert_eq!(state.selected(), vec!["Sale".to_string()]);
        assert_eq!(state.visible(), vec!["Stock"]);
    }
}
