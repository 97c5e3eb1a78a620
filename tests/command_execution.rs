use drawing_board::input::RouterState;
use drawing_board::{
    Buttons, CommandKind, DrawList, DrawOp, DrawingEvent, DrawingSession, EventHandler,
    InputEvent, Renderer, Surface, ToolState,
};
use egui::{Color32, Pos2, pos2, vec2};
use parking_lot::Mutex;
use std::sync::Arc;

fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        position: pos2(x, y),
        buttons: Buttons::PRIMARY,
    }
}

fn drag(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove {
        position: pos2(x, y),
        buttons: Buttons::PRIMARY,
    }
}

fn hover(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove {
        position: pos2(x, y),
        buttons: Buttons::NONE,
    }
}

fn up(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerUp {
        position: pos2(x, y),
        buttons: Buttons::NONE,
    }
}

fn leave(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerLeave {
        position: pos2(x, y),
        buttons: Buttons::NONE,
    }
}

fn draw(session: &mut DrawingSession, points: &[Pos2]) {
    let (first, rest) = points.split_first().unwrap();
    session.handle_input(&down(first.x, first.y));
    for p in rest {
        session.handle_input(&drag(p.x, p.y));
    }
    let last = points.last().unwrap();
    session.handle_input(&up(last.x, last.y));
}

fn render(session: &DrawingSession) -> DrawList {
    let mut list = DrawList::new(session.canvas_size());
    Renderer::new().render(session, &mut list);
    list
}

#[test]
fn test_stroke_undo_redo_stamp_clear_scenario() {
    let mut session = DrawingSession::default();
    session.select_stroke(4.0, Color32::RED).unwrap();

    session.handle_input(&down(10.0, 10.0));
    session.handle_input(&drag(20.0, 20.0));
    session.handle_input(&drag(30.0, 10.0));
    session.handle_input(&up(30.0, 10.0));

    let committed = session.history().committed();
    assert_eq!(committed.len(), 1);
    assert_eq!(
        committed[0].points(),
        &[pos2(10.0, 10.0), pos2(20.0, 20.0), pos2(30.0, 10.0)]
    );
    assert_eq!(
        committed[0].kind(),
        &CommandKind::Stroke {
            width: 4.0,
            color: Color32::RED
        }
    );
    let stroke = committed[0].clone();

    assert!(session.undo());
    assert!(session.history().committed().is_empty());
    assert_eq!(session.history().undone(), &[stroke.clone()]);

    assert!(session.redo());
    assert_eq!(session.history().committed(), &[stroke.clone()]);
    assert_eq!(session.history().committed()[0].id(), stroke.id());

    session.select_stamp("★").unwrap();
    session.handle_input(&down(5.0, 5.0));
    session.handle_input(&up(5.0, 5.0));

    let committed = session.history().committed();
    assert_eq!(committed.len(), 2);
    assert_eq!(
        committed[1].kind(),
        &CommandKind::Stamp {
            glyph: "★".to_owned()
        }
    );
    assert_eq!(committed[1].points(), &[pos2(5.0, 5.0)]);

    session.clear();
    assert!(session.history().committed().is_empty());
    assert!(session.history().undone().is_empty());
}

#[test]
fn test_each_interaction_commits_one_command_in_order() {
    let mut session = DrawingSession::default();
    for i in 0..5 {
        let x = i as f32 * 10.0;
        draw(&mut session, &[pos2(x, 0.0), pos2(x, 5.0)]);
    }

    let committed = session.history().committed();
    assert_eq!(committed.len(), 5);
    for (i, command) in committed.iter().enumerate() {
        assert_eq!(command.points()[0], pos2(i as f32 * 10.0, 0.0));
    }
}

#[test]
fn test_command_is_only_committed_on_release() {
    let mut session = DrawingSession::default();
    session.handle_input(&down(1.0, 1.0));
    session.handle_input(&drag(2.0, 2.0));

    assert_eq!(session.router_state(), RouterState::Dragging);
    assert!(session.history().committed().is_empty());
    assert_eq!(session.history().current().unwrap().points().len(), 2);

    session.handle_input(&up(2.0, 2.0));
    assert_eq!(session.router_state(), RouterState::Idle);
    assert!(session.history().current().is_none());
    assert_eq!(session.history().committed().len(), 1);
}

#[test]
fn test_undo_then_redo_restores_identical_history() {
    let mut session = DrawingSession::default();
    draw(&mut session, &[pos2(0.0, 0.0), pos2(1.0, 1.0)]);
    session.select_stamp("🌮").unwrap();
    draw(&mut session, &[pos2(3.0, 3.0), pos2(4.0, 4.0)]);

    let before = session.history().committed().to_vec();
    assert!(session.undo());
    assert!(session.redo());
    assert_eq!(session.history().committed(), before.as_slice());
}

#[test]
fn test_new_stroke_discards_redo_branch() {
    let mut session = DrawingSession::default();
    draw(&mut session, &[pos2(0.0, 0.0), pos2(1.0, 1.0)]);
    draw(&mut session, &[pos2(2.0, 2.0), pos2(3.0, 3.0)]);
    session.undo();
    session.undo();
    assert_eq!(session.history().undone().len(), 2);

    session.handle_input(&down(9.0, 9.0));
    assert!(session.history().undone().is_empty());
    session.handle_input(&up(9.0, 9.0));

    assert!(!session.redo());
    assert_eq!(session.history().committed().len(), 1);
}

#[test]
fn test_clear_is_not_undoable() {
    let mut session = DrawingSession::default();
    draw(&mut session, &[pos2(0.0, 0.0), pos2(1.0, 1.0)]);
    session.clear();

    assert!(!session.undo());
    assert!(!session.redo());
    assert!(session.history().committed().is_empty());
}

#[test]
fn test_undo_redo_on_empty_history_does_not_notify() {
    let mut session = DrawingSession::default();
    let version = session.version();
    assert!(!session.undo());
    assert!(!session.redo());
    assert_eq!(session.version(), version);

    session.clear();
    assert!(session.version() > version);
}

#[test]
fn test_single_click_stroke_is_invisible_but_undoable() {
    let mut session = DrawingSession::default();
    session.handle_input(&down(10.0, 10.0));
    session.handle_input(&up(10.0, 10.0));

    assert_eq!(session.history().committed().len(), 1);
    let list = render(&session);
    assert!(list.ops().iter().all(|op| matches!(op, DrawOp::Clear { .. })));

    assert!(session.undo());
    assert_eq!(session.history().undone().len(), 1);
}

#[test]
fn test_render_clears_then_replays_then_draws_preview() {
    let mut session = DrawingSession::default();
    session.select_stroke(3.0, Color32::BLUE).unwrap();
    draw(&mut session, &[pos2(0.0, 0.0), pos2(10.0, 10.0)]);
    session.select_stamp("★").unwrap();
    draw(&mut session, &[pos2(20.0, 20.0)]);
    session.handle_input(&hover(50.0, 60.0));

    let list = render(&session);
    let ops = list.ops();
    assert_eq!(ops.len(), 4);
    assert_eq!(
        ops[0],
        DrawOp::Clear {
            region: egui::Rect::from_min_size(Pos2::ZERO, vec2(256.0, 256.0))
        }
    );
    assert!(matches!(&ops[1], DrawOp::Path { width, .. } if *width == 3.0));
    assert!(matches!(&ops[2], DrawOp::Text { center, .. } if *center == pos2(20.0, 20.0)));
    assert!(matches!(&ops[3], DrawOp::Text { center, .. } if *center == pos2(50.0, 60.0)));
}

#[test]
fn test_render_draws_command_in_progress() {
    let mut session = DrawingSession::default();
    session.handle_input(&down(0.0, 0.0));
    session.handle_input(&drag(5.0, 5.0));

    let list = render(&session);
    assert!(matches!(&list.ops()[1], DrawOp::Path { points, .. } if points.len() == 2));
}

#[test]
fn test_preview_follows_pointer_and_clears_on_press() {
    let mut session = DrawingSession::default();
    assert!(session.preview().is_none());

    session.handle_input(&InputEvent::PointerEnter {
        position: pos2(1.0, 2.0),
        buttons: Buttons::NONE,
    });
    assert_eq!(session.preview().unwrap().position(), pos2(1.0, 2.0));

    session.handle_input(&hover(3.0, 4.0));
    assert_eq!(session.preview().unwrap().position(), pos2(3.0, 4.0));

    session.handle_input(&down(3.0, 4.0));
    assert!(session.preview().is_none());
    session.handle_input(&drag(6.0, 6.0));
    assert!(session.preview().is_none());
    session.handle_input(&up(6.0, 6.0));

    session.handle_input(&hover(7.0, 7.0));
    assert!(session.preview().is_some());
    session.handle_input(&leave(7.0, 7.0));
    assert!(session.preview().is_none());
}

#[test]
fn test_leaving_canvas_ends_drag() {
    let mut session = DrawingSession::default();
    session.handle_input(&down(1.0, 1.0));
    session.handle_input(&drag(2.0, 2.0));
    session.handle_input(&leave(2.0, 2.0));

    assert_eq!(session.router_state(), RouterState::Idle);
    assert_eq!(session.history().committed().len(), 1);

    session.handle_input(&drag(3.0, 3.0));
    assert_eq!(session.history().committed()[0].points().len(), 2);
}

#[test]
fn test_move_without_primary_button_ends_drag() {
    let mut session = DrawingSession::default();
    session.handle_input(&down(1.0, 1.0));
    session.handle_input(&hover(4.0, 4.0));

    assert_eq!(session.router_state(), RouterState::Idle);
    assert_eq!(session.history().committed()[0].points(), &[pos2(1.0, 1.0)]);
    assert_eq!(session.preview().unwrap().position(), pos2(4.0, 4.0));
}

#[test]
fn test_secondary_button_does_not_draw() {
    let mut session = DrawingSession::default();
    session.handle_input(&InputEvent::PointerDown {
        position: pos2(1.0, 1.0),
        buttons: Buttons::SECONDARY,
    });
    assert_eq!(session.router_state(), RouterState::Idle);
    assert!(session.history().current().is_none());
}

#[test]
fn test_releasing_secondary_button_keeps_primary_drag() {
    let mut session = DrawingSession::default();
    session.handle_input(&down(1.0, 1.0));
    session.handle_input(&InputEvent::PointerUp {
        position: pos2(2.0, 2.0),
        buttons: Buttons::PRIMARY,
    });

    assert_eq!(session.router_state(), RouterState::Dragging);
    assert!(session.history().committed().is_empty());

    session.handle_input(&drag(3.0, 3.0));
    session.handle_input(&up(3.0, 3.0));
    assert_eq!(session.router_state(), RouterState::Idle);
    assert_eq!(
        session.history().committed()[0].points(),
        &[pos2(1.0, 1.0), pos2(3.0, 3.0)]
    );
}

#[test]
fn test_undo_mid_drag_commits_then_undoes() {
    let mut session = DrawingSession::default();
    session.handle_input(&down(1.0, 1.0));
    session.handle_input(&drag(2.0, 2.0));

    assert!(session.undo());
    assert_eq!(session.router_state(), RouterState::Idle);
    assert!(session.history().committed().is_empty());
    assert_eq!(session.history().undone()[0].points().len(), 2);

    session.handle_input(&drag(3.0, 3.0));
    assert_eq!(session.history().undone()[0].points().len(), 2);
}

struct Recorder(Arc<Mutex<Vec<DrawingEvent>>>);

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &DrawingEvent) {
        self.0.lock().push(event.clone());
    }
}

#[test]
fn test_every_change_is_announced() {
    let mut session = DrawingSession::default();
    let events = Arc::new(Mutex::new(Vec::new()));
    session.subscribe(Box::new(Recorder(events.clone())));

    session.handle_input(&hover(1.0, 1.0));
    draw(&mut session, &[pos2(1.0, 1.0), pos2(2.0, 2.0)]);
    session.undo();
    session.redo();
    session.select_stamp("★").unwrap();
    session.clear();

    assert_eq!(
        *events.lock(),
        vec![
            DrawingEvent::PreviewMoved,
            DrawingEvent::StrokeStarted,
            DrawingEvent::PointAdded,
            DrawingEvent::StrokeFinished,
            DrawingEvent::Undone,
            DrawingEvent::Redone,
            DrawingEvent::ToolChanged {
                tool: ToolState::Stamp {
                    glyph: "★".to_owned()
                }
            },
            DrawingEvent::Cleared,
        ]
    );
}

#[test]
fn test_renderer_tracks_staleness() {
    let mut session = DrawingSession::default();
    let mut renderer = Renderer::new();
    let mut list = DrawList::new(session.canvas_size());
    assert!(renderer.is_stale(&session));

    renderer.render(&session, &mut list);
    assert!(!renderer.is_stale(&session));

    session.handle_input(&hover(1.0, 1.0));
    assert!(renderer.is_stale(&session));
    assert_eq!(list.size(), vec2(256.0, 256.0));
}
