use stripchart::chart::WindowState;
use stripchart::{
    ChartConfig, DataEntity, DataEntityInfo, FitType, SampleBatch, SeriesSelector, XKind, XUpdate,
};

const M: usize = 1000;

fn entity(lines: usize, display_points: usize) -> DataEntity {
    entity_with_budget(lines, display_points, M)
}

fn entity_with_budget(lines: usize, display_points: usize, max_points: usize) -> DataEntity {
    let cfg = ChartConfig::new(max_points, display_points, FitType::Range);
    DataEntity::with_series_storage(DataEntityInfo::new(lines, XKind::Index), cfg).unwrap()
}

fn push(e: &mut DataEntity, from: usize, to: usize) {
    let lines = e.line_count();
    let data: Vec<f64> = (0..lines)
        .flat_map(|l| (from..to).map(move |i| (i as f64) * (l as f64 + 1.0)))
        .collect();
    e.add_plot_data(SampleBatch::Raw { data: &data, sample_count: to - from })
        .unwrap();
}

#[test]
fn budget_scenario_doubles_ratio_and_rebuilds() {
    let mut e = entity(2, 10_000);
    push(&mut e, 0, 2000);

    assert!(e.fill_plot_data_in_range(0, 999, false, SeriesSelector::All).unwrap());
    assert_eq!(e.plot_count(), 1000);
    assert_eq!(e.x_window(), Some(WindowState::new(0, 999, 1)));

    let changed = e.fill_plot_data_in_range(0, 1999, false, SeriesSelector::All).unwrap();
    assert!(changed);
    assert_eq!(e.plot_count(), 1000);
    assert_eq!(e.x_window(), Some(WindowState::new(0, 1999, 2)));
    assert_eq!(e.last_x_update(), XUpdate::Rebuilt);

    let x = e.plot_x();
    assert_eq!(x.len(), 1000);
    assert_eq!(x[0], -2000);
    assert!(x.windows(2).all(|w| w[1] - w[0] == 2));
    let y = e.plot_y(1).unwrap();
    assert_eq!(y[0], 0.0);
    assert_eq!(y[999], 1998.0 * 2.0);
}

#[test]
fn identical_refill_is_a_no_op() {
    let mut e = entity(3, 10_000);
    push(&mut e, 0, 500);

    assert!(e.fill_plot_data_in_range(10, 400, false, SeriesSelector::All).unwrap());
    let x_before = e.x_plot_buffer().to_vec();
    let y_before = e.plot_y(2).unwrap().to_vec();

    assert!(!e.fill_plot_data_in_range(10, 400, false, SeriesSelector::All).unwrap());
    assert_eq!(e.last_x_update(), XUpdate::Unchanged);
    assert_eq!(e.x_plot_buffer(), x_before.as_slice());
    assert_eq!(e.plot_y(2).unwrap(), y_before.as_slice());
}

#[test]
fn forced_refill_reports_change_without_touching_x() {
    let mut e = entity(1, 10_000);
    push(&mut e, 0, 100);
    e.fill_plot_data_in_range(0, 99, false, SeriesSelector::All).unwrap();
    let x_before = e.x_plot_buffer().to_vec();

    assert!(e.fill_plot_data_in_range(0, 99, true, SeriesSelector::All).unwrap());
    assert_eq!(e.last_x_update(), XUpdate::Unchanged);
    assert_eq!(e.x_plot_buffer(), x_before.as_slice());
}

#[test]
fn extending_the_end_leaves_written_slots_alone() {
    let mut e = entity(1, 10_000);
    push(&mut e, 0, 201);
    let cap = e.x_plot_buffer().len();

    e.fill_plot_data_in_range(100, 200, false, SeriesSelector::All).unwrap();
    let before = e.x_plot_buffer().to_vec();

    push(&mut e, 201, 251);
    e.fill_plot_data_in_range(100, 250, false, SeriesSelector::All).unwrap();
    assert_eq!(e.last_x_update(), XUpdate::Appended(50));
    assert_eq!(e.plot_count(), 151);
    assert_eq!(&e.x_plot_buffer()[cap - 101..], &before[cap - 101..]);

    // new slots continue the coordinate sequence from the window start
    let fresh = &e.x_plot_buffer()[cap - 151..cap - 101];
    for (k, v) in fresh.iter().enumerate() {
        assert_eq!(*v, 100 - 251 + k as i64);
    }
    assert!(e.plot_x().windows(2).all(|w| w[1] - w[0] == 1));
}

#[test]
fn extending_the_end_without_new_samples_rebuilds() {
    let mut e = entity(1, 10_000);
    push(&mut e, 0, 1000);
    e.fill_plot_data_in_range(100, 200, false, SeriesSelector::All).unwrap();

    e.fill_plot_data_in_range(100, 250, false, SeriesSelector::All).unwrap();
    assert_eq!(e.last_x_update(), XUpdate::Rebuilt);
    let x = e.plot_x();
    assert_eq!(x.len(), 151);
    for (k, v) in x.iter().enumerate() {
        assert_eq!(*v, 100 - 1000 + k as i64);
    }
    assert_eq!(e.plot_y(0).unwrap().last(), Some(&250.0));
}

#[test]
fn live_growth_append_matches_a_full_rebuild() {
    let mut grown = entity(1, 10_000);
    push(&mut grown, 0, 300);
    grown.fill_plot_data_in_range(0, 299, false, SeriesSelector::All).unwrap();
    push(&mut grown, 300, 420);
    grown.fill_plot_data_in_range(0, 419, false, SeriesSelector::All).unwrap();
    assert_eq!(grown.last_x_update(), XUpdate::Appended(120));

    let mut fresh = entity(1, 10_000);
    push(&mut fresh, 0, 420);
    fresh.fill_plot_data_in_range(0, 419, false, SeriesSelector::All).unwrap();
    assert_eq!(fresh.last_x_update(), XUpdate::Rebuilt);

    assert_eq!(grown.plot_x(), fresh.plot_x());
    assert_eq!(grown.plot_y(0).unwrap(), fresh.plot_y(0).unwrap());
    assert_eq!(*grown.plot_x().last().unwrap(), -1);
}

/// Grow a live-following window from `first` to `second` samples and check it
/// against a fresh fill of the final window.
fn grow_and_compare(max_points: usize, first: usize, second: usize) -> XUpdate {
    let mut grown = entity_with_budget(1, 10_000, max_points);
    push(&mut grown, 0, first);
    grown.fill_plot_data_in_range(0, first - 1, false, SeriesSelector::All).unwrap();
    push(&mut grown, first, second);
    grown.fill_plot_data_in_range(0, second - 1, false, SeriesSelector::All).unwrap();

    let mut fresh = entity_with_budget(1, 10_000, max_points);
    push(&mut fresh, 0, second);
    fresh.fill_plot_data_in_range(0, second - 1, false, SeriesSelector::All).unwrap();

    assert_eq!(grown.x_window(), fresh.x_window());
    assert_eq!(grown.plot_x(), fresh.plot_x());
    assert_eq!(grown.plot_y(0).unwrap(), fresh.plot_y(0).unwrap());
    grown.last_x_update()
}

#[test]
fn strided_live_growth_by_whole_strides_appends() {
    // 300 -> 308 samples at ratio 4: two new points, eight new samples
    assert_eq!(grow_and_compare(100, 300, 308), XUpdate::Appended(2));
}

#[test]
fn strided_live_growth_by_partial_strides_rebuilds() {
    assert_eq!(grow_and_compare(100, 201, 211), XUpdate::Rebuilt);

    let mut e = entity_with_budget(1, 10_000, 100);
    push(&mut e, 0, 211);
    e.fill_plot_data_in_range(0, 210, false, SeriesSelector::All).unwrap();
    let x = e.plot_x();
    assert_eq!(x[0], -211);
    assert_eq!(*x.last().unwrap(), 208 - 211);
    assert!(x.windows(2).all(|w| w[1] - w[0] == 4));
    assert_eq!(e.plot_y(0).unwrap().last(), Some(&208.0));
}

#[test]
fn moving_the_start_recomputes_the_whole_region() {
    let mut e = entity(1, 10_000);
    push(&mut e, 0, 1000);
    e.fill_plot_data_in_range(100, 200, false, SeriesSelector::All).unwrap();

    assert!(e.fill_plot_data_in_range(150, 300, false, SeriesSelector::All).unwrap());
    assert_eq!(e.last_x_update(), XUpdate::Rebuilt);
    let s = e.samples_in_chart() as i64;
    let x = e.plot_x();
    assert_eq!(x.len(), 151);
    for (k, v) in x.iter().enumerate() {
        assert_eq!(*v, 150 - s + k as i64);
    }
    let y = e.plot_y(0).unwrap();
    assert_eq!(y.first(), Some(&150.0));
    assert_eq!(y.last(), Some(&300.0));
}

#[test]
fn clear_forces_a_rebuild_for_a_matching_window() {
    let mut e = entity(2, 10_000);
    push(&mut e, 0, 600);
    e.fill_plot_data_in_range(0, 599, false, SeriesSelector::All).unwrap();
    assert!(!e.fill_plot_data_in_range(0, 599, false, SeriesSelector::All).unwrap());

    e.clear();
    assert_eq!(e.plot_count(), 0);
    assert!(e.plot_x().is_empty());

    push(&mut e, 0, 600);
    assert!(e.fill_plot_data_in_range(0, 599, false, SeriesSelector::All).unwrap());
    assert_eq!(e.last_x_update(), XUpdate::Rebuilt);
}

#[test]
fn scrolling_a_full_history_refreshes_y_only() {
    let mut e = entity(1, 200);
    push(&mut e, 0, 200);
    e.fill_plot_data_in_range(0, 199, false, SeriesSelector::All).unwrap();
    let x_before = e.x_plot_buffer().to_vec();

    push(&mut e, 200, 210);
    assert_eq!(e.samples_in_chart(), 200);
    assert!(e.fill_plot_data_in_range(0, 199, false, SeriesSelector::All).unwrap());
    assert_eq!(e.last_x_update(), XUpdate::Unchanged);
    assert_eq!(e.x_plot_buffer(), x_before.as_slice());

    let y = e.plot_y(0).unwrap();
    assert_eq!(y.first(), Some(&10.0));
    assert_eq!(y.last(), Some(&209.0));
}

#[test]
fn plot_count_never_exceeds_budget() {
    let mut e = entity(1, 100_000);
    push(&mut e, 0, 100_000);
    for (begin, end) in [(0, 99_999), (1, 4_096), (500, 1_499), (99_000, 99_999), (7, 7)] {
        e.fill_plot_data_in_range(begin, end, false, SeriesSelector::All).unwrap();
        assert!(e.plot_count() <= M);
        assert_eq!(e.plot_x().len(), e.plot_count());
        assert_eq!(e.plot_y(0).unwrap().len(), e.plot_count());
        let ratio = e.x_window().unwrap().ratio;
        assert_eq!(e.plot_count(), (end - begin + 1).div_ceil(ratio));
    }
}
