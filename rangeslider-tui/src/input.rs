//! Input dispatch — terminal keys and mouse events become slider signals.
//!
//! Mouse press on the track grabs the nearest handle (pointer down, then an
//! input at the pressed value). Drags emit inputs; release emits pointer up,
//! then the change that commits. Leaving the track while idle emits pointer
//! leave for both handles.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use rangeslider_core::{HandleRole, KeyAction, PointerSignal, SliderEvent};

use crate::app::AppState;
use crate::ui::slider::{nearest_handle, value_at_column};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focused = app.focused.other();
            return;
        }
        KeyCode::Right | KeyCode::Up | KeyCode::Char('l') | KeyCode::Char('k') => {
            KeyAction::StepUp
        }
        KeyCode::Left | KeyCode::Down | KeyCode::Char('h') | KeyCode::Char('j') => {
            KeyAction::StepDown
        }
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        _ => return,
    };

    if !app.slider.is_mounted() {
        app.set_warning("Slider is not mounted");
        return;
    }
    app.dispatch(SliderEvent::Key {
        handle: app.focused,
        action,
    });
}

/// Handle a mouse event against the areas of the last frame.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    let Some(layout) = app.layout else {
        return;
    };
    let track = layout.track();
    let inside = contains(track, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if inside => {
            let Some(derived) = app.slider.derived() else {
                return;
            };
            let handle = nearest_handle(
                track,
                mouse.column,
                derived.min_tooltip.percent,
                derived.max_tooltip.percent,
            );
            app.drag = Some(handle);
            app.focused = handle;
            app.dispatch(SliderEvent::Pointer {
                handle,
                signal: PointerSignal::Down,
            });
            move_to_column(app, track, handle, mouse.column);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(handle) = app.drag {
                move_to_column(app, track, handle, mouse.column);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(handle) = app.drag.take() {
                app.dispatch(SliderEvent::Pointer {
                    handle,
                    signal: PointerSignal::Up,
                });
                app.dispatch(SliderEvent::Change { handle });
            }
        }
        _ => {}
    }

    if app.pointer_inside && !inside {
        for handle in HandleRole::BOTH {
            app.dispatch(SliderEvent::Pointer {
                handle,
                signal: PointerSignal::Leave,
            });
        }
    }
    app.pointer_inside = inside;
}

fn move_to_column(app: &mut AppState, track: Rect, handle: HandleRole, column: u16) {
    let Some((minimum, maximum)) = app.slider.domain() else {
        return;
    };
    let value = value_at_column(track, column, minimum, maximum);
    app.dispatch(SliderEvent::Input { handle, value });
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position { x: column, y: row })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use rangeslider_core::{Selection, TooltipState};

    use crate::config::HostConfig;
    use crate::ui::compute_layout;

    fn app() -> AppState {
        let mut app = AppState::new(&HostConfig::default());
        // 107 columns: track is 101 cells at x=3, one cell per percent.
        app.layout = Some(compute_layout(Rect::new(0, 0, 107, 10)));
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        let mut a = app();
        handle_key(&mut a, key(KeyCode::Char('q')));
        assert!(!a.running);

        let mut b = app();
        handle_key(
            &mut b,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!b.running);
    }

    #[test]
    fn tab_switches_focus_and_arrows_adjust_it() {
        let mut app = app();
        assert_eq!(app.focused, HandleRole::Min);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.slider.value(HandleRole::Min), Some(26.0));

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focused, HandleRole::Max);
        handle_key(&mut app, key(KeyCode::PageDown));
        assert_eq!(app.slider.value(HandleRole::Max), Some(65.0));

        app.drain_commits();
        assert_eq!(app.commit_count, 2);
        assert_eq!(app.last_commit, Some(Selection { low: 26.0, high: 65.0 }));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = app();
        let mut release = key(KeyCode::Right);
        release.kind = KeyEventKind::Release;
        handle_key(&mut app, release);
        assert_eq!(app.slider.value(HandleRole::Min), Some(25.0));
    }

    #[test]
    fn drag_gesture_commits_on_release() {
        let mut app = app();
        let track = app.layout.unwrap().track();
        let row = track.y;
        let at = |percent: u16| track.x + percent * (track.width - 1) / 100;

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), at(30), row));
        assert_eq!(app.drag, Some(HandleRole::Min));
        assert_eq!(app.slider.tooltip_state(HandleRole::Min), TooltipState::Visible);

        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), at(40), row));
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), at(90), row));
        app.drain_commits();
        assert_eq!(app.commit_count, 0);
        assert_eq!(app.slider.selection(), Some(Selection { low: 75.0, high: 90.0 }));

        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), at(90), row));
        assert_eq!(app.drag, None);
        assert_eq!(app.slider.tooltip_state(HandleRole::Min), TooltipState::Hidden);
        app.drain_commits();
        assert_eq!(app.commit_count, 1);
        assert_eq!(app.last_commit, Some(Selection { low: 75.0, high: 90.0 }));
    }

    #[test]
    fn press_outside_track_does_nothing() {
        let mut app = app();
        let track = app.layout.unwrap().track();
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), track.x + 10, track.y + 3),
        );
        assert_eq!(app.drag, None);
        assert_eq!(app.slider.values(), Some((25.0, 75.0)));
    }

    #[test]
    fn dragging_off_the_track_keeps_tooltip() {
        let mut app = app();
        let track = app.layout.unwrap().track();
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), track.x + 74, track.y),
        );
        assert_eq!(app.drag, Some(HandleRole::Max));
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Drag(MouseButton::Left), track.x + 60, track.y + 3),
        );
        assert_eq!(app.slider.tooltip_state(HandleRole::Max), TooltipState::Visible);
        assert_eq!(app.slider.value(HandleRole::Max), Some(60.0));
    }
}
