use std::cell::RefCell;
use std::rc::Rc;

use skiff::controller::{CursorError, PlatformCursorAdapter, ViewportGeometry};
use skiff::{BodyState, ControlSettings, EventDispatcher, InputEvent, Point, Rect, RunState};

/// Counts adapter calls through a shared handle so the test can keep
/// observing after the dispatcher takes ownership
#[derive(Clone, Default)]
struct CountingCursor {
    hidden: Rc<RefCell<i32>>,
    warps: Rc<RefCell<Vec<Point>>>,
    dissociated: Rc<RefCell<bool>>,
}

impl PlatformCursorAdapter for CountingCursor {
    fn hide(&self) -> Result<(), CursorError> {
        *self.hidden.borrow_mut() += 1;
        Ok(())
    }

    fn show(&self) -> Result<(), CursorError> {
        *self.hidden.borrow_mut() -= 1;
        Ok(())
    }

    fn warp_to(&self, screen_point: Point) -> Result<(), CursorError> {
        self.warps.borrow_mut().push(screen_point);
        Ok(())
    }

    fn set_dissociated(&self, dissociated: bool) -> Result<(), CursorError> {
        *self.dissociated.borrow_mut() = dissociated;
        Ok(())
    }
}

struct Window(Rect);

impl ViewportGeometry for Window {
    fn bounds(&self) -> Rect {
        self.0
    }

    fn to_screen(&self, view_point: Point) -> Point {
        view_point + Point::new(100.0, 100.0)
    }
}

fn session() -> (EventDispatcher<CountingCursor, Window>, CountingCursor) {
    let cursor = CountingCursor::default();
    let dispatcher = EventDispatcher::new(
        cursor.clone(),
        Window(Rect::from_size(800.0, 600.0)),
        ControlSettings::default(),
    );
    (dispatcher, cursor)
}

fn press(d: &mut EventDispatcher<CountingCursor, Window>, key: &str) {
    d.handle(&InputEvent::KeyDown(key.to_string()));
}

fn release(d: &mut EventDispatcher<CountingCursor, Window>, key: &str) {
    d.handle(&InputEvent::KeyUp(key.to_string()));
}

#[test]
fn right_three_times_then_ten_ticks() {
    let (mut d, _) = session();

    for _ in 0..3 {
        press(&mut d, "d");
    }
    assert!((d.body().position.x - 1.5).abs() < 1e-12);
    assert_eq!(d.body().position.y, 0.0);
    assert_eq!(d.body().position.z, 0.0);

    for _ in 0..10 {
        d.handle(&InputEvent::Tick);
    }
    let p = d.body().position;
    assert!((p.x - 1.5 * 0.98f64.powi(10)).abs() < 1e-12);
    assert!((p.x - 1.2257).abs() < 1e-4);
    assert_eq!(p.y, 0.0);
    assert_eq!(p.z, 0.0);
}

#[test]
fn look_delta_is_deterministic() {
    let (mut d, _) = session();
    let samples = [(10.0, 0.0), (-35.0, 12.0), (0.5, -250.0)];
    let (mut yaw, mut pitch) = (0.0, 0.0);
    for (dx, dy) in samples {
        d.handle(&InputEvent::MouseMoved(Point::new(400.0 + dx, 300.0 + dy)));
        yaw -= dx * 0.001;
        pitch += dy * 0.001;
        assert!((d.body().yaw - yaw).abs() < 1e-12);
        assert!((d.body().pitch - pitch).abs() < 1e-12);
    }
    // Ticks never touch orientation
    d.handle(&InputEvent::Tick);
    assert!((d.body().yaw - yaw).abs() < 1e-12);
}

#[test]
fn locked_session_recenters_in_screen_space() {
    let (mut d, cursor) = session();
    assert_eq!(*cursor.hidden.borrow(), 1);
    assert!(*cursor.dissociated.borrow());

    d.handle(&InputEvent::MouseMoved(Point::new(450.0, 300.0)));
    assert_eq!(cursor.warps.borrow().last(), Some(&Point::new(500.0, 400.0)));
}

#[test]
fn pause_round_trip_keeps_cursor_balanced() {
    let (mut d, cursor) = session();
    let before = (d.is_locked(), d.is_paused(), d.clock().is_paused());

    release(&mut d, "Escape");
    assert_eq!(d.run_state(), RunState::Paused);
    assert_eq!(*cursor.hidden.borrow(), 0);
    assert!(!*cursor.dissociated.borrow());

    release(&mut d, "Escape");
    assert_eq!((d.is_locked(), d.is_paused(), d.clock().is_paused()), before);
    assert_eq!(*cursor.hidden.borrow(), 1);
}

#[test]
fn paused_session_ignores_everything_but_the_pause_key() {
    let (mut d, _) = session();
    press(&mut d, "w");
    d.handle(&InputEvent::MouseMoved(Point::new(420.0, 280.0)));
    let frozen: BodyState = d.body();

    release(&mut d, "Escape");
    press(&mut d, "w");
    press(&mut d, "a");
    d.handle(&InputEvent::MouseMoved(Point::new(10.0, 10.0)));
    for _ in 0..5 {
        d.handle(&InputEvent::Tick);
    }
    assert_eq!(d.body(), frozen);

    release(&mut d, "Escape");
    d.handle(&InputEvent::Tick);
    assert_ne!(d.body(), frozen);
}

#[test]
fn resume_callback_receives_last_pointer() {
    let (mut d, _) = session();
    let focused = Rc::new(RefCell::new(false));
    let resynced = Rc::new(RefCell::new(None));

    let f = focused.clone();
    d.on_pause(move || *f.borrow_mut() = true);
    let r = resynced.clone();
    d.on_resume(move |pointer| *r.borrow_mut() = pointer);

    d.handle(&InputEvent::MouseMoved(Point::new(390.0, 310.0)));
    release(&mut d, "Escape");
    assert!(*focused.borrow());
    assert!(!d.overlay_cursor_visible());

    // Menu "continue" instead of the pause key
    assert!(d.resume());
    assert_eq!(*resynced.borrow(), Some(Point::new(390.0, 310.0)));
    assert!(d.overlay_cursor_visible());
}

#[test]
fn zero_sized_window_never_warps() {
    let cursor = CountingCursor::default();
    let mut d =
        EventDispatcher::new(cursor.clone(), Window(Rect::ZERO), ControlSettings::default());
    d.handle(&InputEvent::MouseMoved(Point::new(5.0, 5.0)));
    assert!(cursor.warps.borrow().is_empty());
    assert!(d.is_locked());

    d.handle(&InputEvent::Resized(Rect::from_size(200.0, 200.0)));
    d.handle(&InputEvent::MouseMoved(Point::new(100.0, 100.0)));
    assert_eq!(*cursor.warps.borrow(), vec![Point::new(200.0, 200.0)]);
}
