use chart_viewport::api::{ChartEvent, ChartSession, ChartSessionConfig};
use chart_viewport::core::{
    Bar, BarUpdate, CandleItem, HistoryAnnotations, PaneId, PaneOptions, ScreenRect, VisibleWindow,
    VolumeItem,
};
use chart_viewport::interaction::{CursorPhase, KeyDirection};
use chart_viewport::render::NullRenderer;
use chart_viewport::{ChartError, ChartResult};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0)
        .single()
        .expect("valid base time")
}

fn bar_at(i: usize) -> Bar {
    let open = 100.0 + i as f64;
    Bar::new(
        base_time() + Duration::minutes(i as i64),
        open,
        open + 1.0,
        open - 1.0,
        open + 0.5,
        1_000.0 + i as f64,
    )
    .expect("valid bar")
}

fn minute_bars(count: usize) -> Vec<Bar> {
    (0..count).map(bar_at).collect()
}

fn build_session(config: ChartSessionConfig) -> ChartResult<ChartSession<NullRenderer>> {
    let mut session = ChartSession::new(NullRenderer::default(), config)?;
    session.add_pane("price", PaneOptions::primary())?;
    session.add_pane("volume", PaneOptions::default().with_height_bounds(60, Some(200)))?;
    session.bind_item("candle", Box::new(CandleItem::new()), "price")?;
    session.bind_item("volume", Box::new(VolumeItem::new()), "volume")?;
    session.set_pane_geometry(
        &PaneId::from("price"),
        ScreenRect::new(0.0, 0.0, 600.0, 300.0)?,
    )?;
    session.set_pane_geometry(
        &PaneId::from("volume"),
        ScreenRect::new(0.0, 300.0, 600.0, 100.0)?,
    )?;
    Ok(session)
}

#[test]
fn load_zoom_append_scenario() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session.load_history(minute_bars(100), HistoryAnnotations::default());
    assert_eq!(
        session.window(),
        VisibleWindow {
            right_ix: 100,
            bar_count: 30
        }
    );

    assert!(session.zoom_out().expect("zoom out"));
    assert_eq!(session.window().bar_count, 36);

    let update = session.append_bar(bar_at(100)).expect("append");
    assert_eq!(update, BarUpdate::Appended { index: 100 });
    session.reset_to_end();
    assert_eq!(session.window().right_ix, 101);
    assert_eq!(session.visible_window(), (65, 101));
}

#[test]
fn append_far_from_end_does_not_move_window() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session.load_history(minute_bars(100), HistoryAnnotations::default());
    session.pan(-40);
    session.append_bar(bar_at(100)).expect("append");
    assert_eq!(session.window().right_ix, 60);

    let limits = session
        .pane_limits(&PaneId::from("price"))
        .expect("price limits");
    assert_eq!(limits.x_max, 101);
}

#[test]
fn append_near_end_follows_latest_bar() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session.load_history(minute_bars(100), HistoryAnnotations::default());
    session.pan(-10);
    session.append_bar(bar_at(100)).expect("append");
    assert_eq!(session.window().right_ix, 101);
}

#[test]
fn append_follow_can_be_disabled() {
    let config = ChartSessionConfig::default().with_auto_follow_latest(false);
    let mut session = build_session(config).expect("session");
    session.load_history(minute_bars(100), HistoryAnnotations::default());
    session.append_bar(bar_at(100)).expect("append");
    assert_eq!(session.window().right_ix, 100);
}

#[test]
fn same_timestamp_replaces_latest_bar() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session.load_history(minute_bars(10), HistoryAnnotations::default());

    let mut revised = bar_at(9);
    revised.high = 150.0;
    revised.close = 149.0;
    let update = session.append_bar(revised).expect("replace");
    assert_eq!(update, BarUpdate::Replaced { index: 9 });
    assert_eq!(session.series().count(), 10);

    let view = session
        .pane_view(&PaneId::from("price"))
        .expect("price view");
    assert_eq!(view.y_range.max, 150.0);
}

#[test]
fn out_of_order_bar_is_rejected_without_side_effects() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session.load_history(minute_bars(10), HistoryAnnotations::default());
    let before = session.snapshot();

    let err = session
        .handle_event(ChartEvent::BarAppended(bar_at(3)))
        .expect_err("stale bar");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn history_load_deduplicates_and_sorts() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    let mut bars = minute_bars(5);
    bars.reverse();
    let mut duplicate = bar_at(2);
    duplicate.close = 102.75;
    bars.push(duplicate);

    session.load_history(bars, HistoryAnnotations::default());
    assert_eq!(session.series().count(), 5);
    assert_eq!(session.series().get(2).map(|bar| bar.close), Some(102.75));
    assert!(
        session
            .series()
            .bars()
            .windows(2)
            .all(|pair| pair[0].datetime < pair[1].datetime)
    );
}

#[test]
fn handle_event_dispatches_every_input_kind() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session
        .handle_event(ChartEvent::HistoryLoaded {
            bars: minute_bars(100),
            annotations: HistoryAnnotations::default(),
        })
        .expect("history");
    assert_eq!(session.window().right_ix, 100);

    session
        .handle_event(ChartEvent::Wheel { delta_y: -1.0 })
        .expect("wheel down");
    assert_eq!(session.window().bar_count, 36);
    session
        .handle_event(ChartEvent::Wheel { delta_y: 1.0 })
        .expect("wheel up");
    assert_eq!(session.window().bar_count, 30);
    session
        .handle_event(ChartEvent::Wheel { delta_y: 0.0 })
        .expect("wheel zero");
    assert_eq!(session.window().bar_count, 30);

    session
        .handle_event(ChartEvent::Key(KeyDirection::Down))
        .expect("key down");
    assert_eq!(session.window().bar_count, 36);
    session
        .handle_event(ChartEvent::Key(KeyDirection::Up))
        .expect("key up");
    assert_eq!(session.window().bar_count, 30);

    session
        .handle_event(ChartEvent::Key(KeyDirection::Left))
        .expect("key left");
    assert_eq!(session.window().right_ix, 99);

    session
        .handle_event(ChartEvent::PointerMove { x: 300.0, y: 150.0 })
        .expect("pointer");
    assert_eq!(session.cursor_phase(), CursorPhase::Active);
    assert_eq!(session.cursor_state().index, 84);

    session
        .handle_event(ChartEvent::BarAppended(bar_at(100)))
        .expect("append");
    assert_eq!(session.series().count(), 101);
}

#[test]
fn observed_right_edge_applies_before_next_event() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session.load_history(minute_bars(100), HistoryAnnotations::default());

    session
        .handle_event(ChartEvent::ViewportResized {
            visible_right_edge: 80.3,
        })
        .expect("resize");
    assert_eq!(session.window().right_ix, 100);

    session.pan(-5);
    assert_eq!(session.window().right_ix, 75);
    assert_eq!(
        session
            .pane_view(&PaneId::from("price"))
            .expect("price view")
            .x_range,
        (45.0, 75.0)
    );
}

#[test]
fn configure_raises_window_to_new_floor() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session.load_history(minute_bars(100), HistoryAnnotations::default());
    session.configure(50).expect("configure");
    assert_eq!(session.window().bar_count, 50);
    assert_eq!(session.config().min_bar_count, 50);
    assert!(matches!(
        session.configure(0),
        Err(ChartError::InvalidConfig(_))
    ));
}

#[test]
fn item_bound_after_load_sees_existing_bars() {
    let mut session = ChartSession::new(NullRenderer::default(), ChartSessionConfig::default())
        .expect("session");
    session
        .add_pane("price", PaneOptions::primary())
        .expect("price pane");
    session.load_history(minute_bars(40), HistoryAnnotations::default());
    session
        .bind_item("candle", Box::new(CandleItem::new()), "price")
        .expect("bind candle");

    let view = session
        .pane_view(&PaneId::from("price"))
        .expect("price view");
    assert_eq!(view.y_range.min, 109.0);
    assert_eq!(view.y_range.max, 140.0);
}

#[test]
fn render_hands_validated_frame_to_renderer() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session.load_history(minute_bars(100), HistoryAnnotations::default());
    session.pointer_move(300.0, 150.0);
    session.render().expect("render");

    let renderer = session.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    let frame = renderer.last_frame.as_ref().expect("frame");
    assert_eq!(frame.effective_window, (70, 100));
    assert_eq!(frame.panes.len(), 2);
    assert!(frame.cursor.crosshair_visible);
    assert_eq!(
        frame
            .pane(&PaneId::from("volume"))
            .and_then(|pane| pane.geometry)
            .map(|rect| rect.top),
        Some(300.0)
    );

    let renderer = session.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
}

#[test]
fn empty_session_renders_and_ignores_navigation() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    assert!(!session.pan(-3));
    assert!(!session.zoom_in().expect("zoom"));
    assert_eq!(session.visible_window(), (0, 0));
    session.render().expect("render empty");
    assert!(session.header_text().is_none());
}

#[test]
fn snapshot_serializes_to_json() {
    let mut session = build_session(ChartSessionConfig::default()).expect("session");
    session.load_history(minute_bars(50), HistoryAnnotations::default());
    session.move_cursor_right();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.bar_count, 50);
    assert_eq!(snapshot.effective_window, (20, 50));
    assert_eq!(snapshot.panes[0].items, vec!["candle".to_owned()]);
    assert_eq!(snapshot.panes[1].options.maximum_height, Some(200));
    assert_eq!(snapshot.cursor.index, 1);

    let json = session.snapshot_json().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse json");
    assert_eq!(value["window"]["right_ix"], 50);
    assert_eq!(value["panes"][1]["id"], "volume");
    assert_eq!(value["cursor_phase"], "Active");
}
