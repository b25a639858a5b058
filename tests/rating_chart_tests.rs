use std::cell::RefCell;
use std::rc::Rc;

use rating_chart::core::{PageViewport, RatingEvent, SurfaceGeometry, XAxisMode};
use rating_chart::host::{
    ElementWatch, HeadlessPlot, HeadlessPlotHandle, StaticSource, load_rating_history,
    parse_rating_history,
};
use rating_chart::interaction::{
    ConnectorStyle, DeltaTone, DetailPanel, EventHub, HoverEvent, HoverState, HoverTransition,
    RecordingPanel,
};
use rating_chart::render::{Color, NullRenderer, RecordingOverlayFactory};
use rating_chart::{ChartError, RatingChart, RatingChartConfig};

type TestChart = RatingChart<HeadlessPlotHandle, RecordingOverlayFactory, RecordingPanel>;

fn events() -> Vec<RatingEvent> {
    vec![
        RatingEvent::new("Round 900", 1_700_000_000, 1400, 1500, 120),
        RatingEvent::new("Round 901", 1_700_604_800, 1500, 1450, 300),
    ]
}

fn chart_with(
    config: &RatingChartConfig,
    events: Vec<RatingEvent>,
) -> Result<TestChart, ChartError> {
    let surface = SurfaceGeometry::with_pixel_ratio(800.0, 300.0, 1.0).expect("surface");
    let mut backend = HeadlessPlot::new(surface, NullRenderer::default());
    RatingChart::new(
        config,
        events,
        &mut backend,
        RecordingOverlayFactory::default(),
        RecordingPanel::default(),
        PageViewport::new(1280.0, 800.0),
    )
}

fn chart_on_panel<P: DetailPanel>(
    panel: P,
) -> RatingChart<HeadlessPlotHandle, RecordingOverlayFactory, P> {
    let surface = SurfaceGeometry::with_pixel_ratio(800.0, 300.0, 1.0).expect("surface");
    let mut backend = HeadlessPlot::new(surface, NullRenderer::default());
    RatingChart::new(
        &RatingChartConfig::default(),
        events(),
        &mut backend,
        RecordingOverlayFactory::default(),
        panel,
        PageViewport::new(1280.0, 800.0),
    )
    .expect("chart")
}

fn chart() -> TestChart {
    chart_with(&RatingChartConfig::default(), events()).expect("chart")
}

#[test]
fn empty_history_builds_no_chart() {
    let err = chart_with(&RatingChartConfig::default(), Vec::new()).expect_err("empty");
    assert!(matches!(err, ChartError::EmptySeries));
}

#[test]
fn hover_shows_panel_with_event_content() {
    let mut chart = chart();
    let transition = chart
        .handle_hover(Some(HoverEvent::new(1, 400.0, 300.0)))
        .expect("hover");

    assert_eq!(transition, HoverTransition::Entered(1));
    let panel = chart.panel();
    assert!(panel.visible);
    let placement = panel.placement.expect("placement");
    assert_eq!((placement.left, placement.top), (415.0, 290.0));
    let content = panel.content.as_ref().expect("content");
    assert_eq!(content.contest_name, "Round 901");
    assert_eq!(content.rating_line(), "Rating: 1500 \u{2192} 1450 (-50)");
}

#[test]
fn panel_follows_pointer_on_same_index() {
    let mut chart = chart();
    chart
        .handle_hover(Some(HoverEvent::new(0, 100.0, 100.0)))
        .expect("hover");
    chart
        .handle_hover(Some(HoverEvent::new(0, 1100.0, 100.0)))
        .expect("hover again");

    let placement = chart.panel().placement.expect("placement");
    assert!(placement.flipped);
    assert_eq!(chart.panel().show_count, 2);
    assert_eq!(
        chart.hover_engine().overlay().expect("overlay").clear_count(),
        1
    );
}

#[test]
fn leaving_hides_panel_and_clears_overlay() {
    let mut chart = chart();
    chart
        .handle_hover(Some(HoverEvent::new(0, 100.0, 100.0)))
        .expect("hover");
    let transition = chart.handle_leave().expect("leave");

    assert_eq!(transition, HoverTransition::Cleared);
    assert!(!chart.panel().visible);
    assert_eq!(chart.hover_state(), HoverState::Idle);
    assert!(chart.hover_engine().overlay().expect("overlay").is_blank());
}

#[test]
fn out_of_range_hover_hides_panel() {
    let mut chart = chart();
    chart
        .handle_hover(Some(HoverEvent::new(0, 100.0, 100.0)))
        .expect("hover");
    chart
        .handle_hover(Some(HoverEvent::new(9, 100.0, 100.0)))
        .expect("out of range");

    assert!(!chart.panel().visible);
    assert_eq!(chart.hover_state(), HoverState::Idle);
}

#[test]
fn page_viewport_updates_affect_placement() {
    let mut chart = chart();
    chart.set_page_viewport(PageViewport::new(500.0, 800.0));
    chart
        .handle_hover(Some(HoverEvent::new(0, 300.0, 100.0)))
        .expect("hover");
    assert!(chart.panel().placement.expect("placement").flipped);
}

#[test]
fn bound_event_hub_drives_chart() {
    let chart = Rc::new(RefCell::new(chart()));
    let mut hub = EventHub::new();
    RatingChart::bind(&chart, &mut hub);
    assert_eq!(hub.handler_count(), (1, 1));

    hub.emit_hover(Some(HoverEvent::new(1, 200.0, 200.0)));
    assert_eq!(chart.borrow().hover_state(), HoverState::Hovering(1));
    assert!(chart.borrow().panel().visible);

    hub.emit_hover(None);
    assert_eq!(chart.borrow().hover_state(), HoverState::Idle);
    assert!(!chart.borrow().panel().visible);

    hub.emit_hover(Some(HoverEvent::new(0, 200.0, 200.0)));
    hub.emit_leave();
    assert_eq!(chart.borrow().hover_state(), HoverState::Idle);
    assert_eq!(chart.borrow().hover_engine().factory().created(), 1);
}

#[test]
fn chart_loads_from_static_source() {
    let source = StaticSource::new(events());
    let loaded = load_rating_history(&source, "someone").expect("load");
    let chart = chart_with(&RatingChartConfig::default(), loaded).expect("chart");
    assert_eq!(chart.events().len(), 2);
    assert_eq!(chart.series().rank_bounds.max, 330.0);
    assert!(chart.host().spec().is_some());
}

#[test]
fn config_round_trips_through_json() {
    let config = RatingChartConfig::new()
        .with_x_axis_mode(XAxisMode::TimeSpaced)
        .with_tick_target(4)
        .with_panel_footprint(240.0, 80.0)
        .with_connector_style(ConnectorStyle {
            vertical_color: Color::rgb8(0x11, 0x22, 0x33),
            ..ConnectorStyle::default()
        })
        .with_api_base_url("https://example.test/api");

    let json = config.to_json_string().expect("serialize");
    let restored = RatingChartConfig::from_json_str(&json).expect("deserialize");
    assert_eq!(restored, config);
}

#[test]
fn partial_config_json_keeps_defaults() {
    let config =
        RatingChartConfig::from_json_str(r#"{"adapter":{"mode":"time_spaced"}}"#).expect("config");
    assert_eq!(config.adapter.mode, XAxisMode::TimeSpaced);
    assert_eq!(config.adapter.tick_target, 6);
    assert_eq!(config.panel.footprint.width, 300.0);
    assert_eq!(config.api_base_url, "https://codeforces.com/api");
}

#[test]
fn invalid_config_is_rejected() {
    let raw = r#"{"panel":{"footprint":{"width":0,"height":10}}}"#;
    let err = RatingChartConfig::from_json_str(raw).expect_err("zero width");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = chart_with(&RatingChartConfig::new().with_api_base_url("  "), events())
        .expect_err("blank url");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn extreme_upstream_ratings_hover_without_overflow() {
    let body = r#"{"status":"OK","result":[{"contestName":"Edge","rank":1,
        "ratingUpdateTimeSeconds":1700000000,"oldRating":-2147483648,"newRating":1}]}"#;
    let events = parse_rating_history(body).expect("parse");
    let mut chart = chart_with(&RatingChartConfig::default(), events).expect("chart");

    chart
        .handle_hover(Some(HoverEvent::new(0, 10.0, 10.0)))
        .expect("hover");

    let content = chart.panel().content.as_ref().expect("content");
    assert_eq!(content.delta, 2_147_483_649);
    assert_eq!(content.tone, DeltaTone::Improvement);
    assert_eq!(
        content.rating_line(),
        "Rating: -2147483648 \u{2192} 1 (+2147483649)"
    );
}

#[test]
fn borrowed_panel_survives_rerender() {
    let mut panel = RecordingPanel::default();
    {
        let mut chart = chart_on_panel(&mut panel);
        chart
            .handle_hover(Some(HoverEvent::new(0, 100.0, 100.0)))
            .expect("first render hover");
    }
    assert!(panel.visible);
    assert_eq!(panel.show_count, 1);

    let mut chart = chart_on_panel(&mut panel);
    chart
        .handle_hover(Some(HoverEvent::new(1, 100.0, 100.0)))
        .expect("second render hover");
    chart.handle_leave().expect("leave");
    drop(chart);

    assert!(!panel.visible);
    assert_eq!(panel.show_count, 2);
    assert_eq!(
        panel.content.as_ref().expect("content").contest_name,
        "Round 901"
    );
}

#[test]
fn shared_panel_is_reused_across_charts() {
    let panel = Rc::new(RefCell::new(RecordingPanel::default()));

    let mut first = chart_on_panel(Rc::clone(&panel));
    first
        .handle_hover(Some(HoverEvent::new(0, 100.0, 100.0)))
        .expect("hover");
    drop(first);
    assert_eq!(panel.borrow().show_count, 1);

    let mut second = chart_on_panel(Rc::clone(&panel));
    second
        .handle_hover(Some(HoverEvent::new(1, 100.0, 100.0)))
        .expect("hover");
    assert_eq!(panel.borrow().show_count, 2);
    assert!(panel.borrow().visible);

    let held = panel.borrow();
    let err = second.handle_leave().expect_err("panel borrowed elsewhere");
    assert!(matches!(err, ChartError::InvalidData(_)));
    drop(held);
    second.handle_leave().expect("leave");
    assert!(!panel.borrow().visible);
}

#[test]
fn into_panel_hides_and_returns_the_panel() {
    let mut chart = chart();
    chart
        .handle_hover(Some(HoverEvent::new(0, 100.0, 100.0)))
        .expect("hover");

    let panel = chart.into_panel().expect("teardown");
    assert!(!panel.visible);
    assert_eq!(panel.show_count, 1);

    let mut rerendered = chart_on_panel(panel);
    rerendered
        .handle_hover(Some(HoverEvent::new(1, 100.0, 100.0)))
        .expect("hover");
    assert_eq!(rerendered.panel().show_count, 2);
}

#[test]
fn chart_is_built_once_container_resolves() {
    type SharedChart =
        RatingChart<HeadlessPlotHandle, RecordingOverlayFactory, Rc<RefCell<RecordingPanel>>>;

    let panel = Rc::new(RefCell::new(RecordingPanel::default()));
    let built: Rc<RefCell<Option<SharedChart>>> = Rc::new(RefCell::new(None));
    let watch = ElementWatch::new();

    let slot = Rc::clone(&built);
    let shared = Rc::clone(&panel);
    watch.when_ready(move |surface: &SurfaceGeometry| {
        let mut backend = HeadlessPlot::new(*surface, NullRenderer::default());
        let chart = RatingChart::new(
            &RatingChartConfig::default(),
            events(),
            &mut backend,
            RecordingOverlayFactory::default(),
            Rc::clone(&shared),
            PageViewport::new(1280.0, 800.0),
        )
        .expect("chart");
        *slot.borrow_mut() = Some(chart);
    });
    assert!(built.borrow().is_none());

    watch.resolve(SurfaceGeometry::with_pixel_ratio(800.0, 300.0, 1.0).expect("surface"));
    let mut chart = built.borrow_mut().take().expect("chart built on resolve");
    chart
        .handle_hover(Some(HoverEvent::new(1, 400.0, 300.0)))
        .expect("hover");
    assert!(panel.borrow().visible);
}
