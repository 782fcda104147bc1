use dashboard_charts::chart::{
    ChartType, ColorSpec, Palettes, calculate_bubble_point_radius, calculate_data_percentage, chart_data_setup,
    group_others_for,
};
use dashboard_charts::table::{reduce_dataset, summarize_data};
use dashboard_charts::{Cell, ChartError, Row, SummaryType, ValueFormat, format_value, get_keys, validate_allowed_keys};
use serde_json::json;

fn rows(v: serde_json::Value) -> Vec<Row> {
    serde_json::from_value(v).expect("rows")
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn allowed_keys_keep_dataset_order_for_every_subset() {
    let keys = strings(&["agg", "a", "b", "c", "d"]);
    let value_keys = &keys[1..];
    // Every subset of the value keys, requested in reverse order.
    for mask in 0u32..(1 << value_keys.len()) {
        let mut requested: Vec<&str> = value_keys
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, k)| k.as_str())
            .collect();
        requested.reverse();

        let got = validate_allowed_keys(&keys, &requested).unwrap();
        let expected: Vec<String> = keys
            .iter()
            .filter(|k| *k == "agg" || requested.contains(&k.as_str()))
            .cloned()
            .collect();
        assert_eq!(got, expected, "mask {mask:#b}");
    }
}

#[test]
fn unknown_key_is_reported_alone() {
    let keys = strings(&["agg", "a", "b"]);
    assert_eq!(
        validate_allowed_keys(&keys, &["a", "nope"]).unwrap_err(),
        ChartError::UnknownKeys("nope".into())
    );
    assert_eq!(
        validate_allowed_keys(&keys, &["x", "b", "y"]).unwrap_err().to_string(),
        "Unknown keys: x, y"
    );
}

#[test]
fn percentage_rows_sum_to_hundred() {
    let data = rows(json!([
        {"k": "1", "a": 1, "b": "-", "c": 3},
        {"k": "2", "a": 13, "b": 29, "c": 58},
        {"k": "3", "a": 0.3, "b": 0.3, "c": 0.4},
    ]));
    let out = calculate_data_percentage(&data, &["a", "b", "c"]).unwrap();
    assert_eq!(out[0], rows(json!([{"k": "1", "a": 25, "b": "-", "c": 75}]))[0]);
    for row in &out[1..] {
        let total: f64 = ["a", "b", "c"].iter().filter_map(|k| row.get(k).and_then(Cell::as_number)).sum();
        assert!((total - 100.0).abs() <= 1.0);
    }
}

#[test]
fn bubble_radius_degenerate_and_bounds() {
    for v in [-3.0, 0.0, 7.5, 1e6] {
        assert_eq!(calculate_bubble_point_radius(v, (4.0, 4.0), 5.0, 20.0), 5.0);
    }
    assert_eq!(calculate_bubble_point_radius(-10.0, (-10.0, 30.0), 5.0, 20.0), 5.0);
    assert_eq!(calculate_bubble_point_radius(30.0, (-10.0, 30.0), 5.0, 20.0), 20.0);
}

#[test]
fn pie_dataset_shape() {
    let data = rows(json!([{"k": "1", "a": 1}, {"k": "2", "a": "-"}, {"k": "3", "a": 1}]));
    let out = chart_data_setup(&data, ChartType::Pie, &["a"], None, &Palettes::default()).unwrap();
    assert_eq!(out.labels, ["1", "2", "3"]);
    assert_eq!(out.series.len(), 1);
    let series = &out.series[0];
    assert_eq!(series.label, "a");
    assert_eq!(
        series.data.values().unwrap(),
        &[Cell::Number(1.0), Cell::NoValue, Cell::Number(1.0)]
    );
    match &series.background_color {
        Some(ColorSpec::PerPoint(colors)) => assert_eq!(colors.len(), 3),
        other => panic!("expected per-slice colors, got {other:?}"),
    }

    let v = serde_json::to_value(&out).unwrap();
    assert_eq!(v["datasets"][0]["data"], json!([1, "-", 1]));
    assert_eq!(v["datasets"][0]["type"], "pie");
}

#[test]
fn table_grand_sum_ignores_non_numeric() {
    let data = rows(json!([
        {"agg": "1", "a": 1, "b": "-", "c": 3},
        {"agg": "2", "a": "-", "b": "-", "c": 3},
        {"agg": "3", "a": 1, "b": "-", "c": 3},
    ]));
    let keys = get_keys(&data).unwrap();
    assert_eq!(
        summarize_data(&data, &keys, SummaryType::Sum),
        vec![Cell::Text("Grand sum".into()), Cell::Number(2.0), Cell::Number(0.0), Cell::Number(9.0)]
    );
}

#[test]
fn value_formats() {
    assert_eq!(format_value(&Cell::Number(20.0), ValueFormat::Euro), "20€");
    assert_eq!(format_value(&Cell::Number(30.0), ValueFormat::Percent), "30%");
}

#[test]
fn pie_others_bucket() {
    let data = rows(json!([
        {"k": "a", "sales": 10, "avg_price": 2},
        {"k": "b", "sales": 9, "avg_price": 2},
        {"k": "c", "sales": 8, "avg_price": 2},
        {"k": "d", "sales": 7, "avg_price": 2},
        {"k": "e", "sales": 6, "avg_price": 2},
        {"k": "f", "sales": 5, "avg_price": 3},
        {"k": "g", "sales": 4, "avg_price": 5},
    ]));
    let out = group_others_for(ChartType::Pie, &data).unwrap();
    assert_eq!(out.len(), 6);
    assert_eq!(&out[..5], &data[..5]);
    assert_eq!(out[5].get("sales"), Some(&Cell::Number(9.0)));
    assert_eq!(out[5].get("avg_price"), Some(&Cell::Number(4.0)));

    let shaped = chart_data_setup(&data, ChartType::Doughnut, &["sales"], None, &Palettes::default()).unwrap();
    assert_eq!(shaped.labels.last().map(String::as_str), Some("Others"));
    assert_eq!(shaped.series[0].data.len(), 6);
}

#[test]
fn table_pipeline_leaves_input_untouched() {
    let data = rows(json!([
        {"agg": "1", "a": 1, "b": 2},
        {"agg": "2", "a": 3, "b": "-"},
    ]));
    let before = data.clone();
    let reduced = reduce_dataset(&data, Some(&["b"][..])).unwrap();
    let keys = get_keys(&reduced).unwrap();
    let summary = summarize_data(&reduced, &keys, SummaryType::Average);
    assert_eq!(summary, vec![Cell::Text("Grand average".into()), Cell::Number(1.0)]);
    assert_eq!(data, before);
}

#[test]
fn malformed_rows_are_rejected() {
    let data = rows(json!([{"only": 1}]));
    assert_eq!(
        chart_data_setup(&data, ChartType::Line, &["only"], None, &Palettes::default()).unwrap_err(),
        ChartError::MalformedDataset
    );
}
