use serde::Deserialize;
use unicode_width::UnicodeWidthChar;

use crate::core::matcher::{DEFAULT_MAX_RESULTS, SuggestionEngine};
use crate::core::selection::Selection;
use crate::source::{CandidateSource, SourceError};
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widget::event::{InteractionResult, WidgetAction};
use crate::widget::text_edit;

/// Whether a committing key leaves focus in the field afterwards.
///
/// The host reads the resolved policy off the emitted `Committed` action;
/// the widget itself has no notion of where focus goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusPolicy {
    #[default]
    Retain,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    pub max_results: usize,
    pub highlight_color: Color,
    pub highlight_bg_color: Color,
    /// Enter commits and, by default, keeps the field focused.
    pub enter_focus: FocusPolicy,
    /// Tab commits and, by default, lets focus move on.
    pub tab_focus: FocusPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            highlight_color: Color::White,
            highlight_bg_color: Color::Rgb(0x33, 0x99, 0xff),
            enter_focus: FocusPolicy::Retain,
            tab_focus: FocusPolicy::Release,
        }
    }
}

/// Autocomplete over a single-line text field.
///
/// One instance manages exactly one field: it owns the text value, the
/// candidate set and the menu state, and reacts to the discrete events the
/// host feeds it (`on_key`, `on_text_changed`, pointer and focus
/// notifications). It holds no reference to host event plumbing.
pub struct Autocomplete {
    value: String,
    cursor: usize,
    /// Last text the menu was computed for; drives change detection.
    last_value: String,
    engine: SuggestionEngine,
    selection: Selection,
    options: Options,
    focused: bool,
}

impl Default for Autocomplete {
    fn default() -> Self {
        Self::new()
    }
}

impl Autocomplete {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            last_value: String::new(),
            engine: SuggestionEngine::new(),
            selection: Selection::new(),
            options: Options::default(),
            focused: false,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.engine.set_max_results(options.max_results);
        self.options = options;
        self
    }

    pub fn with_candidates(mut self, values: impl IntoIterator<Item = String>) -> Self {
        self.engine.set_candidates(values);
        self
    }

    /// Seeds the candidate set from a source adapter. Malformed documents
    /// fail here, before the widget activates.
    pub fn with_source(self, source: &CandidateSource) -> Result<Self, SourceError> {
        let values = source.load()?;
        Ok(self.with_candidates(values))
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Programmatic value changes never open the menu.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = text_edit::char_count(&self.value);
        self.last_value = self.value.clone();
        self.selection.clear();
    }

    /// Shown results and highlight, for renderers.
    pub fn menu(&self) -> &Selection {
        &self.selection
    }

    pub fn is_menu_open(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn set_candidates(&mut self, values: impl IntoIterator<Item = String>) {
        self.engine.set_candidates(values);
        self.sync_open_menu();
    }

    pub fn add_candidates(&mut self, values: impl IntoIterator<Item = String>) -> usize {
        let added = self.engine.add_candidates(values);
        if added > 0 {
            self.sync_open_menu();
        }
        added
    }

    pub fn remove_candidates<S: AsRef<str>>(
        &mut self,
        values: impl IntoIterator<Item = S>,
    ) -> usize {
        let removed = self.engine.remove_candidates(values);
        if removed > 0 {
            self.sync_open_menu();
        }
        removed
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if key.modifiers != KeyModifiers::NONE {
            return InteractionResult::ignored();
        }

        match key.code {
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return InteractionResult::ignored();
                }
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                let mut result = InteractionResult::handled();
                result.merge(self.on_text_changed());
                result
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.value, &mut self.cursor) {
                    let mut result = InteractionResult::handled();
                    result.merge(self.on_text_changed());
                    return result;
                }
                InteractionResult::ignored()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.value, &mut self.cursor) {
                    let mut result = InteractionResult::handled();
                    result.merge(self.on_text_changed());
                    return result;
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                if text_edit::move_left(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if text_edit::move_right(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                InteractionResult::handled()
            }
            KeyCode::Up => {
                if self.selection.is_empty() {
                    return self.on_text_changed();
                }
                self.selection.move_prev();
                InteractionResult::handled()
            }
            KeyCode::Down => {
                if self.selection.is_empty() {
                    return self.on_text_changed();
                }
                self.selection.move_next();
                InteractionResult::handled()
            }
            KeyCode::Enter => self.commit_or_dismiss(self.options.enter_focus),
            KeyCode::Tab => self.commit_or_dismiss(self.options.tab_focus),
            KeyCode::Esc => {
                if self.selection.is_empty() {
                    return InteractionResult::ignored();
                }
                self.dismiss();
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    /// Re-runs matching when the value differs from the last matched text.
    /// Hosts driving the widget through an edit surface of their own call
    /// this after every change; `on_key` calls it internally.
    pub fn on_text_changed(&mut self) -> InteractionResult {
        if self.value == self.last_value {
            return InteractionResult::ignored();
        }

        let results = self.engine.matches(&self.value);
        if results.is_empty() {
            self.selection.clear();
        } else {
            self.selection.show(results);
        }
        self.last_value = self.value.clone();
        InteractionResult::handled()
    }

    /// Highlight by menu position, as reported back by the renderer.
    pub fn on_pointer_hover(&mut self, index: usize) -> InteractionResult {
        let before = self.selection.highlight();
        self.selection.set_highlight(index as isize);
        if self.selection.highlight() == before {
            return InteractionResult::ignored();
        }
        InteractionResult::handled()
    }

    /// Pointer commits always leave focus in the field.
    pub fn on_pointer_activate(&mut self, index: usize) -> InteractionResult {
        self.selection.set_highlight(index as isize);
        match self.commit_highlight(true) {
            Some(action) => InteractionResult::with_action(action),
            None => InteractionResult::ignored(),
        }
    }

    pub fn on_focus_changed(&mut self, focused: bool) -> InteractionResult {
        self.focused = focused;
        if !focused && !self.selection.is_empty() {
            self.dismiss();
            return InteractionResult::handled();
        }
        InteractionResult::ignored()
    }

    pub fn draw(&self) -> Vec<SpanLine> {
        let marker = if self.focused { ">" } else { " " };
        let mut lines = vec![vec![Span::new(format!("{marker} {}", self.value))]];

        let highlight_style = Style::new()
            .color(self.options.highlight_color)
            .background(self.options.highlight_bg_color);
        for (index, value) in self.selection.values().iter().enumerate() {
            let style = if self.selection.highlight() == Some(index) {
                highlight_style
            } else {
                Style::new().color(Color::DarkGrey)
            };
            lines.push(vec![Span::styled(format!("  {value}"), style)]);
        }
        lines
    }

    pub fn cursor_pos(&self) -> CursorPos {
        let col: usize = self
            .value
            .chars()
            .take(text_edit::clamp_cursor(self.cursor, &self.value))
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum();
        CursorPos {
            // marker and the space after it
            col: (col + 2).min(u16::MAX as usize) as u16,
            row: 0,
        }
    }

    fn commit_or_dismiss(&mut self, policy: FocusPolicy) -> InteractionResult {
        let retain_focus = policy == FocusPolicy::Retain;
        if let Some(action) = self.commit_highlight(retain_focus) {
            return InteractionResult::with_action(action);
        }
        if !self.selection.is_empty() {
            self.dismiss();
            return InteractionResult::handled();
        }
        InteractionResult::ignored()
    }

    fn commit_highlight(&mut self, retain_focus: bool) -> Option<WidgetAction> {
        let value = self.selection.commit()?;
        self.value = value.clone();
        self.cursor = text_edit::char_count(&self.value);
        self.dismiss();
        Some(WidgetAction::Committed {
            value,
            retain_focus,
        })
    }

    /// Closes the menu and forgets the last matched text, so the next
    /// Up/Down press re-runs matching for the current value.
    fn dismiss(&mut self) {
        self.selection.clear();
        self.last_value.clear();
    }

    /// Candidate mutation with the menu open recomputes the shown results;
    /// the highlight survives only when the results are unchanged.
    fn sync_open_menu(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let results = self.engine.matches(&self.value);
        if results.is_empty() {
            self.dismiss();
        } else if results.as_slice() != self.selection.values() {
            self.selection.show(results);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Autocomplete, FocusPolicy, Options};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widget::event::WidgetAction;

    fn widget_with(values: &[&str]) -> Autocomplete {
        let mut widget =
            Autocomplete::new().with_candidates(values.iter().map(|value| value.to_string()));
        widget.on_focus_changed(true);
        widget
    }

    fn type_text(widget: &mut Autocomplete, text: &str) {
        for ch in text.chars() {
            widget.on_key(KeyEvent::plain(KeyCode::Char(ch)));
        }
    }

    fn press(widget: &mut Autocomplete, code: KeyCode) -> Vec<WidgetAction> {
        widget.on_key(KeyEvent::plain(code)).actions
    }

    #[test]
    fn typing_filters_candidates() {
        let mut widget = widget_with(&["apple", "Apricot", "banana"]);
        type_text(&mut widget, "ap");
        assert_eq!(widget.menu().values(), ["Apricot", "apple"]);
        assert_eq!(widget.menu().highlight(), None);
    }

    #[test]
    fn typing_the_exact_candidate_shows_no_menu() {
        let mut widget = widget_with(&["apple"]);
        type_text(&mut widget, "apple");
        assert!(!widget.is_menu_open());
    }

    #[test]
    fn enter_commits_the_highlighted_value() {
        let mut widget = widget_with(&["apple", "Apricot", "banana"]);
        type_text(&mut widget, "ap");
        press(&mut widget, KeyCode::Down);
        press(&mut widget, KeyCode::Down);
        let actions = press(&mut widget, KeyCode::Enter);
        assert_eq!(
            actions,
            [WidgetAction::Committed {
                value: "apple".to_string(),
                retain_focus: true,
            }]
        );
        assert_eq!(widget.value(), "apple");
        assert!(!widget.is_menu_open());
    }

    #[test]
    fn tab_commits_but_releases_focus_by_default() {
        let mut widget = widget_with(&["apple"]);
        type_text(&mut widget, "ap");
        press(&mut widget, KeyCode::Down);
        let actions = press(&mut widget, KeyCode::Tab);
        assert_eq!(
            actions,
            [WidgetAction::Committed {
                value: "apple".to_string(),
                retain_focus: false,
            }]
        );
    }

    #[test]
    fn commit_policy_is_configurable() {
        let options = Options {
            tab_focus: FocusPolicy::Retain,
            ..Options::default()
        };
        let mut widget = widget_with(&["apple"]).with_options(options);
        type_text(&mut widget, "ap");
        press(&mut widget, KeyCode::Down);
        let actions = press(&mut widget, KeyCode::Tab);
        assert_eq!(
            actions,
            [WidgetAction::Committed {
                value: "apple".to_string(),
                retain_focus: true,
            }]
        );
    }

    #[test]
    fn enter_without_highlight_dismisses_the_menu() {
        let mut widget = widget_with(&["apple"]);
        type_text(&mut widget, "ap");
        assert!(widget.is_menu_open());
        let result = widget.on_key(KeyEvent::plain(KeyCode::Enter));
        assert!(result.handled);
        assert!(result.actions.is_empty());
        assert!(!widget.is_menu_open());
        assert_eq!(widget.value(), "ap");
    }

    #[test]
    fn enter_with_no_menu_is_ignored_for_the_host() {
        let mut widget = widget_with(&["apple"]);
        let result = widget.on_key(KeyEvent::plain(KeyCode::Enter));
        assert!(!result.handled);
    }

    #[test]
    fn arrows_reopen_the_menu_after_dismissal() {
        let mut widget = widget_with(&["apple"]);
        type_text(&mut widget, "ap");
        press(&mut widget, KeyCode::Esc);
        assert!(!widget.is_menu_open());

        press(&mut widget, KeyCode::Down);
        assert_eq!(widget.menu().values(), ["apple"]);
    }

    #[test]
    fn arrow_wraparound_passes_through_none() {
        let mut widget = widget_with(&["apple", "Apricot", "banana"]);
        type_text(&mut widget, "ap");
        let mut seen = Vec::new();
        for _ in 0..4 {
            press(&mut widget, KeyCode::Down);
            seen.push(widget.menu().highlight());
        }
        assert_eq!(seen, [Some(0), Some(1), None, Some(0)]);
    }

    #[test]
    fn losing_focus_dismisses_the_menu() {
        let mut widget = widget_with(&["apple"]);
        type_text(&mut widget, "ap");
        assert!(widget.is_menu_open());
        widget.on_focus_changed(false);
        assert!(!widget.is_menu_open());
    }

    #[test]
    fn pointer_hover_then_activate_commits() {
        let mut widget = widget_with(&["apple", "Apricot"]);
        type_text(&mut widget, "ap");
        assert!(widget.on_pointer_hover(1).handled);
        assert_eq!(widget.menu().highlight(), Some(1));

        let result = widget.on_pointer_activate(0);
        assert_eq!(
            result.actions,
            [WidgetAction::Committed {
                value: "Apricot".to_string(),
                retain_focus: true,
            }]
        );
        assert_eq!(widget.value(), "Apricot");
    }

    #[test]
    fn pointer_hover_out_of_range_is_ignored() {
        let mut widget = widget_with(&["apple"]);
        type_text(&mut widget, "ap");
        assert!(!widget.on_pointer_hover(9).handled);
        assert_eq!(widget.menu().highlight(), None);
    }

    #[test]
    fn clearing_the_field_closes_the_menu() {
        let mut widget = widget_with(&["apple"]);
        type_text(&mut widget, "a");
        assert!(widget.is_menu_open());
        press(&mut widget, KeyCode::Backspace);
        assert!(!widget.is_menu_open());
    }

    #[test]
    fn adding_candidates_refreshes_an_open_menu() {
        let mut widget = widget_with(&["apple"]);
        type_text(&mut widget, "ap");
        assert_eq!(widget.menu().values(), ["apple"]);

        widget.add_candidates(["apricot".to_string()]);
        assert_eq!(widget.menu().values(), ["apple", "apricot"]);
    }

    #[test]
    fn removing_the_last_match_closes_the_menu() {
        let mut widget = widget_with(&["apple"]);
        type_text(&mut widget, "ap");
        widget.remove_candidates(["apple"]);
        assert!(!widget.is_menu_open());
    }

    #[test]
    fn metacharacters_in_the_field_match_literally() {
        let mut widget = widget_with(&["c++ guide", "c# primer"]);
        type_text(&mut widget, "c+");
        assert_eq!(widget.menu().values(), ["c++ guide"]);
    }

    #[test]
    fn set_value_does_not_open_the_menu() {
        let mut widget = widget_with(&["apple"]);
        widget.set_value("ap");
        assert!(!widget.is_menu_open());
        assert!(!widget.on_text_changed().handled);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: Options =
            serde_yaml::from_str("max_results: 3\ntab_focus: retain\n").expect("options yaml");
        assert_eq!(options.max_results, 3);
        assert_eq!(options.tab_focus, FocusPolicy::Retain);
        assert_eq!(options.enter_focus, FocusPolicy::Retain);
    }
}
