use circle_cropper::{Bounds, CropConfig, CropSession, GuidelineMode, Handle, MIN_CROP_LENGTH_PX};

const IMAGE: Bounds = Bounds::new(0.0, 0.0, 1000.0, 1000.0);
const EPSILON: f32 = 1e-3;

fn session(fixed: bool, aspect_ratio_x: i32, aspect_ratio_y: i32) -> CropSession {
    let config = CropConfig {
        fixed_aspect_ratio: fixed,
        aspect_ratio_x,
        aspect_ratio_y,
        snap_radius: 10.0,
        ..CropConfig::default()
    };
    let mut session = CropSession::new(&config);
    session.set_image_rect(IMAGE).expect("valid image rect");
    session
}

fn assert_invariants(session: &CropSession, ratio: Option<f32>) {
    let edges = session.edges();
    let bounds = edges.bounds();
    assert!(
        edges.width() >= MIN_CROP_LENGTH_PX - EPSILON,
        "window too narrow: {bounds:?}"
    );
    assert!(
        edges.height() >= MIN_CROP_LENGTH_PX - EPSILON,
        "window too short: {bounds:?}"
    );
    assert!(
        bounds.left >= IMAGE.left - EPSILON
            && bounds.top >= IMAGE.top - EPSILON
            && bounds.right <= IMAGE.right + EPSILON
            && bounds.bottom <= IMAGE.bottom + EPSILON,
        "window left the image: {bounds:?}"
    );
    if let Some(ratio) = ratio {
        assert!(
            (edges.width() / edges.height() - ratio).abs() < EPSILON,
            "ratio drifted: {bounds:?}"
        );
    }
}

/// Presses at `start`, moves through `path`, checking after every move.
fn drag(session: &mut CropSession, start: (f32, f32), path: &[(f32, f32)], ratio: Option<f32>) -> Option<Handle> {
    let handle = session.press(start.0, start.1);
    for &(x, y) in path {
        session.drag_to(x, y);
        assert_invariants(session, ratio);
    }
    session.release();
    handle
}

#[test]
fn free_window_starts_padded() {
    let session = session(false, 1, 1);
    assert_eq!(session.edges().bounds(), Bounds::new(100.0, 100.0, 900.0, 900.0));
    assert_eq!(session.state().guidelines(), GuidelineMode::OnTouch);
}

#[test]
fn free_corner_sweep_stays_valid() {
    let mut session = session(false, 1, 1);
    let path = [
        (300.0, 250.0),
        (850.0, 870.0),
        (1200.0, 1200.0),
        (-300.0, -40.0),
        (3.0, 995.0),
        (500.0, 500.0),
    ];
    let handle = drag(&mut session, (100.0, 100.0), &path, None);
    assert_eq!(handle, Some(Handle::TopLeft));
}

#[test]
fn free_right_edge_snaps_to_the_border() {
    let mut session = session(false, 1, 1);
    let handle = drag(&mut session, (900.0, 500.0), &[(995.0, 480.0)], None);
    assert_eq!(handle, Some(Handle::Right));
    assert_eq!(session.edges().right.coordinate(), 1000.0);
    assert_eq!(session.edges().top.coordinate(), 100.0);
}

#[test]
fn locked_corner_sweep_keeps_ratio() {
    let mut session = session(true, 1, 1);
    assert_eq!(session.edges().bounds(), Bounds::new(0.0, 0.0, 1000.0, 1000.0));

    let path = [
        (700.0, 650.0),
        (400.0, 500.0),
        (120.0, 100.0),
        (950.0, 300.0),
        (1500.0, 1500.0),
    ];
    let handle = drag(&mut session, (1000.0, 1000.0), &path, Some(1.0));
    assert_eq!(handle, Some(Handle::BottomRight));
}

#[test]
fn locked_side_sweep_keeps_ratio() {
    let mut session = session(true, 4, 3);
    let ratio = 4.0 / 3.0;
    let start = session.edges().bounds();
    assert!((start.height() - 750.0).abs() < EPSILON);

    // Shrink from the bottom, then drag it back past the border.
    let bottom = start.bottom;
    let path = [(500.0, bottom - 200.0), (500.0, bottom - 400.0), (500.0, 1300.0)];
    let handle = drag(&mut session, (500.0, bottom), &path, Some(ratio));
    assert_eq!(handle, Some(Handle::Bottom));

    // Same with the left edge.
    let left_y = session.edges().bounds().center().1;
    let path = [(300.0, left_y), (600.0, left_y), (-200.0, left_y)];
    let handle = drag(&mut session, (0.0, left_y), &path, Some(ratio));
    assert_eq!(handle, Some(Handle::Left));
}

#[test]
fn center_drag_keeps_the_size() {
    let mut session = session(true, 3, 2);
    let before = session.edges().bounds();

    let handle = drag(
        &mut session,
        (500.0, 500.0),
        &[(450.0, 480.0), (-400.0, 2000.0), (900.0, -100.0)],
        Some(1.5),
    );
    assert_eq!(handle, Some(Handle::Center));

    let after = session.edges().bounds();
    assert!((after.width() - before.width()).abs() < EPSILON);
    assert!((after.height() - before.height()).abs() < EPSILON);
    assert_eq!(after.top, 0.0);
}

#[test]
fn shrinking_drag_stops_at_minimum_size() {
    let mut free = session(false, 1, 1);
    drag(&mut free, (900.0, 900.0), &[(100.0, 100.0), (-50.0, -50.0)], None);
    assert!((free.edges().width() - MIN_CROP_LENGTH_PX).abs() < EPSILON);
    assert!((free.edges().height() - MIN_CROP_LENGTH_PX).abs() < EPSILON);

    let mut locked = session(true, 2, 1);
    let start = locked.edges().bounds();
    drag(
        &mut locked,
        (start.right, start.bottom),
        &[(start.left + 10.0, start.top + 5.0)],
        Some(2.0),
    );
}

#[test]
fn guidelines_show_while_dragging_only() {
    let mut session = session(false, 1, 1);
    assert!(!session.guidelines_visible());

    session.press(500.0, 500.0);
    assert!(session.guidelines_visible());
    session.drag_to(520.0, 510.0);
    assert!(session.guidelines_visible());
    session.release();
    assert!(!session.guidelines_visible());
}

#[test]
fn settings_survive_a_rejected_update() {
    let mut session = session(true, 16, 9);
    let before = session.edges().bounds();

    assert!(session.set_aspect_ratio_y(0).is_err());
    assert!(session.set_guidelines(7).is_err());
    assert_eq!(session.state().aspect_ratio(), (16, 9));
    assert_eq!(session.edges().bounds(), before);
}
