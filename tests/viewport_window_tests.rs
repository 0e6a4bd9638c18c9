use chart_viewport::ChartError;
use chart_viewport::core::{DEFAULT_MIN_BAR_COUNT, ViewportController, VisibleWindow};

fn viewport_at_end(min_bar_count: usize, count: usize) -> ViewportController {
    let mut viewport = ViewportController::new(min_bar_count).expect("viewport init");
    viewport.reset_to_end(count);
    viewport
}

#[test]
fn reset_to_end_puts_newest_bar_at_right_edge() {
    let viewport = viewport_at_end(30, 100);
    assert_eq!(
        viewport.window(),
        VisibleWindow {
            right_ix: 100,
            bar_count: 30
        }
    );
    assert_eq!(viewport.window().left_ix(), 70);
    assert_eq!(viewport.effective_window(100), (70, 100));
}

#[test]
fn default_floor_is_thirty_bars() {
    let viewport = ViewportController::default();
    assert_eq!(viewport.min_bar_count(), DEFAULT_MIN_BAR_COUNT);
    assert_eq!(viewport.window().bar_count, 30);
}

#[test]
fn configure_rejects_zero_floor() {
    let mut viewport = ViewportController::default();
    let err = viewport.configure(0).expect_err("zero floor must fail");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
    assert!(ViewportController::new(0).is_err());
}

#[test]
fn configure_raises_bar_count_to_new_floor() {
    let mut viewport = viewport_at_end(10, 100);
    viewport.configure(40).expect("configure");
    assert_eq!(viewport.window().bar_count, 40);
    viewport.configure(5).expect("configure");
    assert_eq!(viewport.window().bar_count, 40);
}

#[test]
fn pan_left_then_right_round_trips_away_from_edges() {
    let mut viewport = viewport_at_end(30, 200);
    assert!(viewport.pan(-50, 200));
    let before = viewport.window();
    assert!(viewport.pan(-1, 200));
    assert!(viewport.pan(1, 200));
    assert_eq!(viewport.window(), before);
}

#[test]
fn pan_saturates_and_reports_no_change_at_edges() {
    let mut viewport = viewport_at_end(30, 100);
    assert!(!viewport.pan(1, 100));
    assert!(viewport.pan(-1_000, 100));
    assert_eq!(viewport.window().right_ix, 30);
    assert!(!viewport.pan(-1, 100));
    assert!(!viewport.pan(i64::MIN, 100));
    assert!(viewport.pan(i64::MAX, 100));
    assert_eq!(viewport.window().right_ix, 100);
}

#[test]
fn pan_and_zoom_are_noops_on_empty_series() {
    let mut viewport = ViewportController::new(30).expect("viewport init");
    assert!(!viewport.pan(-5, 0));
    assert!(!viewport.zoom(1.2, 0).expect("zoom"));
    assert_eq!(viewport.effective_window(0), (0, 0));
    assert_eq!(viewport.window().right_ix, 0);
}

#[test]
fn zoom_out_and_in_are_reciprocal_within_rounding() {
    let mut viewport = viewport_at_end(30, 100);
    assert!(viewport.zoom(1.2, 100).expect("zoom out"));
    assert_eq!(viewport.window().bar_count, 36);
    assert!(viewport.zoom(1.0 / 1.2, 100).expect("zoom in"));
    assert_eq!(viewport.window().bar_count, 30);
}

#[test]
fn zoom_is_clamped_between_floor_and_series_length() {
    let mut viewport = viewport_at_end(30, 100);
    viewport.zoom(0.01, 100).expect("zoom in");
    assert_eq!(viewport.window().bar_count, 30);
    viewport.zoom(1_000.0, 100).expect("zoom out");
    assert_eq!(viewport.window().bar_count, 100);
    assert_eq!(viewport.effective_window(100), (0, 100));
}

#[test]
fn zoom_on_short_series_stays_at_floor() {
    let mut viewport = viewport_at_end(30, 12);
    assert!(!viewport.zoom(1.2, 12).expect("zoom out"));
    assert_eq!(viewport.window().bar_count, 30);
    assert_eq!(viewport.effective_window(12), (0, 12));
}

#[test]
fn zoom_out_near_left_edge_keeps_window_filled() {
    let mut viewport = viewport_at_end(30, 100);
    viewport.pan(-1_000, 100);
    assert_eq!(viewport.window().right_ix, 30);
    viewport.zoom(1.2, 100).expect("zoom out");
    assert_eq!(viewport.window().bar_count, 36);
    assert_eq!(viewport.window().right_ix, 36);
}

#[test]
fn zoom_rejects_non_positive_or_non_finite_factor() {
    let mut viewport = viewport_at_end(30, 100);
    for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = viewport.zoom(factor, 100).expect_err("invalid factor");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
    assert_eq!(viewport.window().bar_count, 30);
}

#[test]
fn observed_right_edge_is_deferred_then_wins() {
    let mut viewport = viewport_at_end(30, 100);
    viewport.on_viewport_resized(87.4).expect("record edge");
    assert_eq!(viewport.pending_right_edge(), Some(87.4));
    assert_eq!(viewport.window().right_ix, 100);

    assert!(viewport.apply_pending_right_edge(100));
    assert_eq!(viewport.window().right_ix, 87);
    assert_eq!(viewport.pending_right_edge(), None);
    assert!(!viewport.apply_pending_right_edge(100));

    viewport.on_viewport_resized(1e9).expect("record edge");
    viewport.apply_pending_right_edge(100);
    assert_eq!(viewport.window().right_ix, 100);

    assert!(viewport.on_viewport_resized(f64::NAN).is_err());
}

#[test]
fn clear_returns_window_to_origin() {
    let mut viewport = viewport_at_end(30, 100);
    viewport.on_viewport_resized(50.0).expect("record edge");
    viewport.clear();
    assert_eq!(viewport.window().right_ix, 0);
    assert_eq!(viewport.pending_right_edge(), None);
    assert_eq!(viewport.effective_window(0), (0, 0));
}
