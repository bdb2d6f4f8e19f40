use term_desk::geometry::Position;
use term_desk::window::{RegistryEvent, WindowKind, WindowRegistry};

#[test]
fn launch_focus_close_scenario() {
    let mut reg = WindowRegistry::new();

    // Desktop icon opens the music player, taskbar opens the projects list.
    let music = reg.open_window(WindowKind::Music);
    let projects = reg.open_window(WindowKind::Projects);
    assert_eq!(reg.active_window_id(), Some(projects));

    // Clicking the music icon again raises the existing window.
    assert_eq!(reg.open_window(WindowKind::Music), music);
    assert_eq!(reg.open_windows().count(), 2);
    assert_eq!(reg.active_window_id(), Some(music));

    // Closing the active window hands focus back to the one beneath it.
    reg.close_window(music);
    assert_eq!(reg.active_window_id(), Some(projects));
    reg.close_window(projects);
    assert_eq!(reg.active_window_id(), None);
    assert_eq!(reg.windows().len(), 2);
}

#[test]
fn events_describe_each_applied_command() {
    let mut reg = WindowRegistry::new();
    let game = reg.open_window(WindowKind::Game);
    reg.update_window_position(game, Position::new(4, 4));
    reg.close_window(game);
    reg.focus_window(game);

    assert_eq!(
        reg.take_events(),
        vec![
            RegistryEvent::Opened {
                id: game,
                kind: WindowKind::Game
            },
            RegistryEvent::Moved {
                id: game,
                position: Position::new(4, 4)
            },
            RegistryEvent::Closed { id: game },
            RegistryEvent::Focused {
                id: game,
                reopened: true
            },
        ]
    );
    assert_eq!(reg.revision(), 4);
    assert!(reg.take_events().is_empty());
}

#[test]
fn each_kind_gets_its_own_identity() {
    let mut reg = WindowRegistry::new();
    let ids: Vec<_> = WindowKind::ALL
        .iter()
        .map(|kind| reg.open_window(*kind))
        .collect();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    let top = reg.paint_order().last().map(|w| w.id);
    assert_eq!(top, ids.last().copied());
}
