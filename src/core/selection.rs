/// Highlight state over the last-shown result set.
///
/// Stepping past either end lands on "no highlight" before wrapping to the
/// far end on the next press, so a full cycle over N items has N + 1 states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    shown: Vec<String>,
    highlight: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the shown results and drops any highlight.
    pub fn show(&mut self, values: Vec<String>) {
        self.shown = values;
        self.highlight = None;
    }

    pub fn clear(&mut self) {
        self.shown.clear();
        self.highlight = None;
    }

    pub fn values(&self) -> &[String] {
        self.shown.as_slice()
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn highlighted_value(&self) -> Option<&str> {
        self.highlight
            .and_then(|index| self.shown.get(index))
            .map(String::as_str)
    }

    pub fn move_next(&mut self) {
        let len = self.shown.len();
        if len == 0 {
            return;
        }
        self.highlight = match self.highlight {
            None => Some(0),
            Some(index) if index + 1 >= len => None,
            Some(index) => Some(index + 1),
        };
    }

    pub fn move_prev(&mut self) {
        let len = self.shown.len();
        if len == 0 {
            return;
        }
        self.highlight = match self.highlight {
            None => Some(len - 1),
            Some(0) => None,
            Some(index) => Some(index - 1),
        };
    }

    /// Negative indexes clamp to "no highlight"; indexes past the end are
    /// ignored outright.
    pub fn set_highlight(&mut self, index: isize) {
        if index < 0 {
            self.highlight = None;
            return;
        }
        let index = index as usize;
        if index >= self.shown.len() {
            return;
        }
        self.highlight = Some(index);
    }

    /// Returns the highlighted value and resets the highlight; with no
    /// highlight, selects nothing and changes nothing.
    pub fn commit(&mut self) -> Option<String> {
        let index = self.highlight.take()?;
        self.shown.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;

    fn shown(values: &[&str]) -> Selection {
        let mut selection = Selection::new();
        selection.show(values.iter().map(|value| value.to_string()).collect());
        selection
    }

    #[test]
    fn next_cycles_through_none_at_the_end() {
        let mut selection = shown(&["a", "b", "c"]);
        let mut seen = Vec::new();
        for _ in 0..5 {
            selection.move_next();
            seen.push(selection.highlight());
        }
        assert_eq!(seen, [Some(0), Some(1), Some(2), None, Some(0)]);
    }

    #[test]
    fn prev_cycles_through_none_at_the_start() {
        let mut selection = shown(&["a", "b", "c"]);
        let mut seen = Vec::new();
        for _ in 0..5 {
            selection.move_prev();
            seen.push(selection.highlight());
        }
        assert_eq!(seen, [Some(2), Some(1), Some(0), None, Some(2)]);
    }

    #[test]
    fn next_then_prev_returns_to_none_inside_the_set() {
        let mut selection = shown(&["a", "b"]);
        selection.move_next();
        selection.move_prev();
        assert_eq!(selection.highlight(), None);
    }

    #[test]
    fn moves_are_noops_on_an_empty_set() {
        let mut selection = Selection::new();
        selection.move_next();
        selection.move_prev();
        assert_eq!(selection.highlight(), None);
    }

    #[test]
    fn set_highlight_clamps_negative_and_ignores_out_of_range() {
        let mut selection = shown(&["a", "b"]);
        selection.set_highlight(1);
        assert_eq!(selection.highlight(), Some(1));

        selection.set_highlight(5);
        assert_eq!(selection.highlight(), Some(1));

        selection.set_highlight(-3);
        assert_eq!(selection.highlight(), None);
    }

    #[test]
    fn show_resets_the_highlight() {
        let mut selection = shown(&["a", "b"]);
        selection.move_next();
        selection.show(vec!["c".to_string()]);
        assert_eq!(selection.highlight(), None);
        assert_eq!(selection.values(), ["c"]);
    }

    #[test]
    fn commit_returns_the_highlighted_value_and_resets() {
        let mut selection = shown(&["a", "b"]);
        selection.move_next();
        selection.move_next();
        assert_eq!(selection.commit(), Some("b".to_string()));
        assert_eq!(selection.highlight(), None);
    }

    #[test]
    fn commit_without_highlight_selects_nothing() {
        let mut selection = shown(&["a"]);
        assert_eq!(selection.commit(), None);
        assert_eq!(selection.values(), ["a"]);
    }
}
