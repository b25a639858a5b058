use proptest::prelude::*;
use rating_chart::core::{
    AxisScale, AxisTransform, PageViewport, RatingEvent, SeriesAdapter, SeriesAdapterConfig,
    SurfaceGeometry,
};
use rating_chart::host::{AxisId, ChartHost, HeadlessPlot, PlotStyle};
use rating_chart::interaction::{PanelLayout, place_panel};
use rating_chart::render::NullRenderer;

fn history() -> impl Strategy<Value = Vec<RatingEvent>> {
    prop::collection::vec((-500i32..4000, -200i32..200, 1u32..40_000), 1..60).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (rating, delta, rank))| {
                RatingEvent::new(
                    format!("Round {index}"),
                    1_600_000_000 + index as i64 * 604_800,
                    rating - delta,
                    rating,
                    rank,
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn rating_bounds_are_step_aligned_and_contain_every_point(events in history()) {
        let series = SeriesAdapter::new(SeriesAdapterConfig::default())
            .expect("adapter")
            .adapt(&events)
            .expect("adapt");

        let bounds = series.rating_bounds;
        prop_assert_eq!(bounds.min.rem_euclid(100.0), 0.0);
        prop_assert_eq!(bounds.max.rem_euclid(100.0), 0.0);
        for point in &series.rating {
            prop_assert!(point.y - 50.0 >= bounds.min);
            prop_assert!(point.y + 50.0 <= bounds.max);
        }
    }

    #[test]
    fn rank_bounds_leave_ten_percent_headroom(events in history()) {
        let series = SeriesAdapter::new(SeriesAdapterConfig::default())
            .expect("adapter")
            .adapt(&events)
            .expect("adapt");

        let max_rank = events.iter().map(|event| event.rank).max().expect("non-empty");
        prop_assert_eq!(series.rank_bounds.min, 0.0);
        prop_assert!(series.rank_bounds.max * 100.0 >= f64::from(max_rank) * 110.0);
        prop_assert!((series.rank_bounds.max - 1.0) * 100.0 < f64::from(max_rank) * 110.0);
        prop_assert_eq!(series.rating.len(), series.rank.len());
    }

    #[test]
    fn worse_rank_is_never_drawn_higher(
        max_rank in 1u32..100_000,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        let top = f64::from(max_rank);
        let scale = AxisScale::with_transform(0.0, top, AxisTransform::Negate).expect("scale");
        let (better, worse) = if a <= b { (a * top, b * top) } else { (b * top, a * top) };
        let better_px = scale.value_to_pixel(better, 500.0).expect("better");
        let worse_px = scale.value_to_pixel(worse, 500.0).expect("worse");
        prop_assert!(better_px <= worse_px);

        let recovered = scale.pixel_to_value(worse_px, 500.0).expect("inverse");
        prop_assert!((recovered - worse).abs() <= 1e-6 * top.max(1.0));
    }

    #[test]
    fn pixels_stay_inside_plot_area(events in history(), ratio in 1.0f64..3.0) {
        let series = SeriesAdapter::new(SeriesAdapterConfig::default())
            .expect("adapter")
            .adapt(&events)
            .expect("adapt");
        let surface = SurfaceGeometry::with_pixel_ratio(900.0, 320.0, ratio).expect("surface");
        let mut backend = HeadlessPlot::new(surface, NullRenderer::default());
        let mut host = ChartHost::new(PlotStyle::default());
        host.render(&mut backend, &series).expect("render");

        let offset = host.plot_offset().expect("offset");
        for (rating, rank) in series.rating.iter().zip(&series.rank) {
            let rating_px = host.to_pixel(rating.x, rating.y, AxisId::Rating).expect("rating");
            let rank_px = host.to_pixel(rank.x, rank.y, AxisId::Rank).expect("rank");
            prop_assert_eq!(rating_px.x, rank_px.x);
            for y in [rating_px.y, rank_px.y] {
                prop_assert!(y >= offset.top - 1e-9);
                prop_assert!(y <= 320.0 - offset.bottom + 1e-9);
            }
        }
    }

    #[test]
    fn panel_top_is_never_negative(
        page_x in 0.0f64..2000.0,
        page_y in -50.0f64..2000.0,
        width in 200.0f64..2000.0,
        height in 50.0f64..1200.0
    ) {
        let layout = PanelLayout::default();
        let placement = place_panel(page_x, page_y, PageViewport::new(width, height), &layout);

        prop_assert!(placement.top >= 0.0);
        prop_assert_eq!(placement.flipped, page_x + 15.0 + 300.0 > width);
        if placement.flipped {
            prop_assert_eq!(placement.left, page_x - 300.0 - 15.0);
        } else {
            prop_assert_eq!(placement.left, page_x + 15.0);
            prop_assert!(placement.left + 300.0 <= width);
        }
    }
}
