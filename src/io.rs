use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::events::AppEvent;
use crate::events::EngineEvent;
use crate::events::Event;

/// Converts a crossterm event into a lifegrid event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Event::EngineEvent(EngineEvent::Click { col: column, row })),
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            ..
        }) => Some(Event::EngineEvent(EngineEvent::ZoomIn)),
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..
        }) => Some(Event::EngineEvent(EngineEvent::ZoomOut)),
        CrossTermEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::Resize { cols, rows })),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    // Windows reports releases too
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let engine = |e| Some(Event::EngineEvent(e));

    match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Event::AppEvent(AppEvent::Exit)),
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => engine(EngineEvent::TogglePaused),
        KeyEvent {
            code: KeyCode::Char('n'),
            ..
        } => engine(EngineEvent::SkipFrame),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => engine(EngineEvent::Reset),
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => engine(EngineEvent::ZoomOut),
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => engine(EngineEvent::ZoomIn),
        KeyEvent {
            code: KeyCode::Char('['),
            ..
        } => engine(EngineEvent::FasterFrames),
        KeyEvent {
            code: KeyCode::Char(']'),
            ..
        } => engine(EngineEvent::SlowerFrames),
        KeyEvent {
            code: KeyCode::Char('w'),
            ..
        } => engine(EngineEvent::CycleBoundary),
        KeyEvent {
            code: KeyCode::Char(c @ '1'..='9'),
            ..
        } => engine(EngineEvent::PlaceMachine(c as usize - '1' as usize)),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyModifiers;
    use crossterm::event::MouseButton;
    use crossterm::event::MouseEvent;
    use crossterm::event::MouseEventKind;

    use super::convert_event;
    use crate::events::AppEvent;
    use crate::events::EngineEvent;
    use crate::events::Event;

    fn key(c: char) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn engine(event: CrossTermEvent) -> Option<EngineEvent> {
        match convert_event(event) {
            Some(Event::EngineEvent(e)) => Some(e),
            _ => None,
        }
    }

    #[test]
    fn keys() {
        assert_eq!(engine(key(' ')), Some(EngineEvent::TogglePaused));
        assert_eq!(engine(key('n')), Some(EngineEvent::SkipFrame));
        assert_eq!(engine(key('1')), Some(EngineEvent::PlaceMachine(0)));
        assert_eq!(engine(key('9')), Some(EngineEvent::PlaceMachine(8)));
        assert_eq!(engine(key('x')), None);
    }

    #[test]
    fn exit() {
        let ctrl_c = CrossTermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        for event in [key('q'), ctrl_c] {
            assert!(matches!(
                convert_event(event),
                Some(Event::AppEvent(AppEvent::Exit))
            ));
        }
    }

    #[test]
    fn left_click() {
        let click = CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 7,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });

        assert_eq!(engine(click), Some(EngineEvent::Click { col: 7, row: 4 }));
    }
}
