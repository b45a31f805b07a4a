// tests/extract_e2e.rs
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use school_scrape::config::options::RunOptions;
use school_scrape::runner::{run, run_to};
use school_scrape::specs::SchemaVersion;

const FIXTURE: &str = include_str!("fixtures/school.html");

/// Wrap markup the way the cache stores it: `{"d": "popUpInfoWindow(\"…\", lat, lng)"}`.
fn write_snapshot(dir: &Path, file: &str, html: &str) {
    let literal = serde_json::to_string(html).unwrap();
    let envelope = serde_json::json!({ "d": format!("popUpInfoWindow({}, 51.5, -0.12)", literal) });
    fs::write(dir.join(file), serde_json::to_string(&envelope).unwrap()).unwrap();
}

fn extract(dir: &Path, schema: SchemaVersion) -> String {
    let opts = RunOptions::new(dir, schema);
    let mut buf = Vec::new();
    run_to(&opts, &mut buf, None).unwrap();
    String::from_utf8(buf).unwrap()
}

/// Name -> value for the first data row.
fn first_row(tsv: &str) -> HashMap<String, String> {
    let lines: Vec<&str> = tsv.lines().collect();
    let names = lines[2].split('\t');
    let cells = lines[3].split('\t');
    names.zip(cells).map(|(n, c)| (n.to_string(), c.to_string())).collect()
}

#[test]
fn legacy_row_from_fixture() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), "hill_top.json", FIXTURE);

    let row = first_row(&extract(dir.path(), SchemaVersion::Legacy));
    let expect = [
        ("Name", "Hill Top Primary School"),
        ("AtCapacity", "87%"),
        ("Pupils per Teacher", "21.3"),
        ("Receives Free School Meals", "12%"),
        ("Pupils with SEN Support", "10%"),
        ("OfstedYear", "2019"),
        ("OfstedRating", "2"),
        ("0 Rank", "1234"),
        ("0 Pupils meeting the expected standard", "78%"),
        ("2 Pupils achieving at a higher standard", "15%"),
        ("0 0 Reading", "105"),
        ("0 1 Reading", "+1.2"),
        ("1 0 Maths", "102"),
        ("1 1 Maths", "-0.9"),
        ("2 Writing", "-0.4"),
        ("0 0 Reviews", "30"),
        ("10 3 Reviews", "10"),
        ("11 0 Reviews", "80"),
        ("11 1 Reviews", "20"),
        ("0 Oversubscribed", "150%"),
        ("1 Oversubscribed", "0"),
        ("2 Oversubscribed", "Inf"),
        ("3 Oversubscribed", ""),
        ("1LastDistanceOffered", "0.75"),
        ("2LastDistanceOffered", "0.7"),
        ("0 0 Distribution", "0.5"),
        ("0 1 Distribution", ""),
        ("0 2 Distribution", "812"),
        ("1 2 Distribution", ""),
        ("6 0 Distribution", ""),
    ];
    for (name, value) in expect {
        assert_eq!(row.get(name).map(String::as_str), Some(value), "{name}");
    }
    assert!(!row.contains_key("Address"));
}

#[test]
fn labelled_row_from_fixture() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), "hill_top.json", FIXTURE);

    let row = first_row(&extract(dir.path(), SchemaVersion::Labelled));
    assert_eq!(row["Address"], "1 Hill Road, London N1 1AA");
    assert_eq!(row["1 Rank"], "500");
    assert_eq!(row["0 Positive Reviews"], "0.85");
    assert_eq!(row["0 Negative Reviews"], "0.35");
    assert_eq!(row["11 Positive Reviews"], "0.8");
    assert_eq!(row["11 Negative Reviews"], "0.2");
    assert!(!row.contains_key("OfstedYear"));
    assert!(!row.contains_key("0 Oversubscribed"));
}

#[test]
fn granular_shares_on_four_bucket_charts() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), "hill_top.json", FIXTURE);

    let row = first_row(&extract(dir.path(), SchemaVersion::Granular));
    assert_eq!(row["0 0 ReviewShare"], "0.3");
    assert_eq!(row["0 1 ReviewShare"], "0.4");
    // only four buckets on the page: outer negative buckets are absent
    assert_eq!(row["0 4 ReviewShare"], "");
    assert_eq!(row["0 5 ReviewShare"], "");
    assert_eq!(row["11 1 ReviewShare"], "0.2");
}

#[test]
fn every_line_matches_the_header_width() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), "a.json", FIXTURE);
    write_snapshot(dir.path(), "b.json", "<p>nothing useful</p>");

    for schema in SchemaVersion::ALL {
        let out = extract(dir.path(), schema);
        let widths: Vec<usize> = out.lines().map(|l| l.split('\t').count()).collect();
        assert_eq!(widths.len(), 5, "{schema}");
        assert!(widths.iter().all(|&w| w == widths[0]), "{schema}: {widths:?}");
    }
}

#[test]
fn bad_snapshots_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), "1_good.json", FIXTURE);
    fs::write(dir.path().join("2_not_json.json"), "<html>").unwrap();
    fs::write(dir.path().join("3_no_literal.json"), r#"{"d": "popUpInfoWindow(42)"}"#).unwrap();
    fs::write(dir.path().join("4_unterminated.json"), r#"{"d": "f(\"<p>oops"}"#).unwrap();

    let opts = RunOptions::new(dir.path(), SchemaVersion::Legacy);
    let mut buf = Vec::new();
    let summary = run_to(&opts, &mut buf, None).unwrap();

    assert_eq!(summary.rows, 1);
    assert_eq!(summary.skipped.len(), 3);
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 4);
}

#[test]
fn rows_follow_file_name_order() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), "b.json", r#"<h1 class="infobox_name">Beta</h1>"#);
    write_snapshot(dir.path(), "a.json", r#"<h1 class="infobox_name">Alpha</h1>"#);

    let out = extract(dir.path(), SchemaVersion::Legacy);
    let names: Vec<&str> = out.lines().skip(3).map(|l| l.split('\t').next().unwrap()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), "hill_top.json", FIXTURE);
    write_snapshot(dir.path(), "empty.json", "");

    for schema in SchemaVersion::ALL {
        assert_eq!(extract(dir.path(), schema), extract(dir.path(), schema));
    }
}

#[test]
fn run_writes_file_sink_and_creates_parents() {
    let input = tempfile::tempdir().unwrap();
    write_snapshot(input.path(), "hill_top.json", FIXTURE);
    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("exports/2019/features.tsv");

    let opts = RunOptions { out: Some(target.clone()), ..RunOptions::new(input.path(), SchemaVersion::Legacy) };
    let summary = run(&opts, None).unwrap();

    assert_eq!(summary.rows, 1);
    let written = fs::read_to_string(&target).unwrap();
    assert_eq!(written, extract(input.path(), SchemaVersion::Legacy));
    assert_eq!(written.lines().nth(2).unwrap().split('\t').count(), summary.columns);
}

#[test]
fn custom_envelope_key_and_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let envelope = serde_json::json!({
        "status": 200,
        "html": "showInfo('<h1 class=\"infobox_name\">Gamma</h1>')",
    });
    fs::write(dir.path().join("g.json"), envelope.to_string()).unwrap();

    // "d" is missing, so the first string field is used
    let row = first_row(&extract(dir.path(), SchemaVersion::Legacy));
    assert_eq!(row["Name"], "Gamma");

    let opts = RunOptions { envelope_key: "html".into(), ..RunOptions::new(dir.path(), SchemaVersion::Legacy) };
    let mut buf = Vec::new();
    let summary = run_to(&opts, &mut buf, None).unwrap();
    assert_eq!(summary.rows, 1);
}
