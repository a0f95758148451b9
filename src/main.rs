use std::io;
use std::time::Duration;

use typeahead::terminal::{KeyCode, KeyModifiers, Terminal, TerminalEvent};
use typeahead::ui::span::Span;
use typeahead::ui::style::{Color, Style};
use typeahead::{Autocomplete, CandidateSource, WidgetAction};

const COUNTRIES: &str = "\
options:
  - Argentina
  - Australia
  - Austria
  - Belgium
  - Bolivia
  - Brazil
  - Canada
  - Chile
  - China
  - Colombia
  - Denmark
  - Ecuador
  - Finland
  - France
  - Germany
  - Greece
  - Iceland
  - India
  - Ireland
  - Italy
  - Japan
  - Mexico
  - Netherlands
  - Norway
  - Peru
  - Poland
  - Portugal
  - Spain
  - Sweden
  - Switzerland
  - Uruguay
";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let source = CandidateSource::yaml(COUNTRIES);
    let mut widget = Autocomplete::new().with_source(&source)?;
    widget.on_focus_changed(true);

    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = event_loop(&mut terminal, &mut widget);
    terminal.exit()?;

    match result? {
        Some(value) => println!("Selected: {value}"),
        None => println!("No selection."),
    }
    Ok(())
}

fn event_loop(terminal: &mut Terminal, widget: &mut Autocomplete) -> io::Result<Option<String>> {
    let mut committed = None;
    let mut render_requested = true;

    loop {
        if render_requested {
            let mut lines = widget.draw();
            if widget.value().is_empty() {
                lines.push(vec![Span::styled(
                    "  Type to search. Up/Down navigate, Enter selects, Esc quits.",
                    Style::new().color(Color::DarkGrey),
                )]);
            }
            terminal.render(&lines, Some(widget.cursor_pos()))?;
            render_requested = false;
        }

        match terminal.poll_event(Duration::from_millis(100))? {
            TerminalEvent::Key(key) => {
                if key.code == KeyCode::Esc && !widget.is_menu_open() {
                    return Ok(committed);
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    return Ok(committed);
                }

                let result = widget.on_key(key);
                render_requested |= result.request_render;
                for action in result.actions {
                    let WidgetAction::Committed {
                        value,
                        retain_focus,
                    } = action;
                    committed = Some(value);
                    if !retain_focus {
                        return Ok(committed);
                    }
                }
            }
            TerminalEvent::Resize(_) => render_requested = true,
            TerminalEvent::Tick => {}
        }
    }
}
