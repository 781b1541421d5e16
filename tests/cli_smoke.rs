use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

const HEADER: &str = "file,line,type,commit,author,date,time,timezone,datetime,depth,length";

// c3 is listed first so first-seen and chronological order differ.
const ROWS: &[&str] = &[
    "style.css,1,css,c3,nadine,2024-01-10,21:00:00-08:00,-08:00,2024-01-10T21:00:00-08:00,0,12",
    "style.css,2,css,c3,nadine,2024-01-10,21:00:00-08:00,-08:00,2024-01-10T21:00:00-08:00,1,18",
    "index.html,1,html,c1,nadine,2024-01-01,09:00:00-08:00,-08:00,2024-01-01T09:00:00-08:00,0,15",
    "main.js,1,js,c1,nadine,2024-01-01,09:00:00-08:00,-08:00,2024-01-01T09:00:00-08:00,0,30",
    "main.js,2,js,c1,nadine,2024-01-01,09:00:00-08:00,-08:00,2024-01-01T09:00:00-08:00,1,22",
    "main.js,1,js,c2,nadine,2024-01-05,14:00:00-08:00,-08:00,2024-01-05T14:00:00-08:00,0,30",
    "main.js,2,js,c2,nadine,2024-01-05,14:00:00-08:00,-08:00,2024-01-05T14:00:00-08:00,1,22",
    "main.js,3,js,c2,nadine,2024-01-05,14:00:00-08:00,-08:00,2024-01-05T14:00:00-08:00,1,8",
    "style.css,1,css,c2,nadine,2024-01-05,14:00:00-08:00,-08:00,2024-01-05T14:00:00-08:00,0,12",
];

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

fn dataset() -> (TempDir, PathBuf) {
    let td = tempdir().unwrap();
    let mut csv = String::from(HEADER);
    for row in ROWS {
        csv.push('\n');
        csv.push_str(row);
    }
    let path = write_file(td.path(), "loc.csv", &csv);
    (td, path)
}

fn run_json(args: &[&str], data: &Path) -> Value {
    let out = Command::cargo_bin("locscope")
        .unwrap()
        .args(args)
        .arg("--data")
        .arg(data)
        .env_remove("LOCSCOPE_COMMIT_URL")
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "locscope {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).unwrap()
}

fn ids(commits: &Value) -> Vec<String> {
    commits
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn summary_json_reports_dataset_totals() {
    let (_td, data) = dataset();
    let v = run_json(&["summary", "--json"], &data);
    assert_eq!(v["version"], 1);
    assert_eq!(v["hours"], "lines");
    assert!(v["cutoff"].is_null());

    let s = &v["summary"];
    assert_eq!(s["commits"], 3);
    assert_eq!(s["total_lines"], 9);
    assert_eq!(s["files"], 3);
    assert_eq!(s["days_worked"], 3);
    assert_eq!(s["time_of_day"], "Afternoon");
    assert_eq!(s["longest_file"]["file"], "main.js");
    assert_eq!(s["longest_file"]["lines"], 5);
}

#[test]
fn commits_order_and_urls() {
    let (_td, data) = dataset();
    let first_seen = run_json(&["commits", "--json"], &data);
    assert_eq!(ids(&first_seen["commits"]), ["c3", "c1", "c2"]);

    let chrono = run_json(&["commits", "--json", "--order", "chronological"], &data);
    let commits = &chrono["commits"];
    assert_eq!(ids(commits), ["c1", "c2", "c3"]);
    assert_eq!(commits[0]["total_lines"], 3);
    assert_eq!(commits[0]["hour_frac"], 9.0);
    assert_eq!(
        commits[0]["url"],
        "https://github.com/nadinemarcus/DSC209R_portfolio/commit/c1"
    );
    assert!(commits[0].get("lines").is_none());
}

#[test]
fn commit_url_override() {
    let (_td, data) = dataset();
    let v = run_json(
        &["commits", "--json", "--commit-url", "https://example.com/c/"],
        &data,
    );
    assert_eq!(v["commits"][0]["url"], "https://example.com/c/c3");
}

#[test]
fn until_and_progress_limit_the_window() {
    let (_td, data) = dataset();
    let until = run_json(&["summary", "--json", "--until", "2024-01-06"], &data);
    assert_eq!(until["summary"]["commits"], 2);
    assert!(until["cutoff"].is_string());

    let start = run_json(&["summary", "--json", "--progress", "0"], &data);
    assert_eq!(start["summary"]["commits"], 1);
    assert_eq!(start["summary"]["total_lines"], 3);

    let end = run_json(&["summary", "--json", "--progress", "100"], &data);
    assert_eq!(end["summary"]["commits"], 3);
    assert!(end["cutoff"].is_null());
}

#[test]
fn until_conflicts_with_progress() {
    let (_td, data) = dataset();
    Command::cargo_bin("locscope")
        .unwrap()
        .args(["summary", "--until", "2024-01-06", "--progress", "10", "--data"])
        .arg(&data)
        .assert()
        .failure();
}

#[test]
fn brush_selects_late_evening_commit() {
    let (_td, data) = dataset();
    let v = run_json(&["select", "--brush", "900,50,1000,100", "--json"], &data);
    assert_eq!(ids(&v["selected"]), ["c3"]);
    assert_eq!(v["brush"], serde_json::json!([900.0, 50.0, 1000.0, 100.0]));
    let langs = v["breakdown"]["languages"].as_array().unwrap();
    assert_eq!(langs.len(), 1);
    assert_eq!(langs[0]["language"], "css");
    assert_eq!(langs[0]["percent"], "100%");
}

#[test]
fn brush_corners_can_be_given_in_any_order() {
    let (_td, data) = dataset();
    let v = run_json(&["select", "--brush", "1000,600,0,0", "--json"], &data);
    assert_eq!(ids(&v["selected"]), ["c1", "c2", "c3"]);
}

#[test]
fn empty_brush_falls_back_to_all_for_breakdown() {
    let (_td, data) = dataset();
    let v = run_json(&["select", "--brush", "0,0,1,1", "--json"], &data);
    assert!(v["selected"].as_array().unwrap().is_empty());
    assert_eq!(v["breakdown"]["total_lines"], 9);
}

#[test]
fn breakdown_json_in_first_seen_order() {
    let (_td, data) = dataset();
    let v = run_json(&["breakdown", "--json"], &data);
    let langs: Vec<(String, u64, String)> = v["breakdown"]["languages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| {
            (
                l["language"].as_str().unwrap().to_string(),
                l["lines"].as_u64().unwrap(),
                l["percent"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        langs,
        vec![
            ("css".to_string(), 3, "33.3%".to_string()),
            ("html".to_string(), 1, "11.1%".to_string()),
            ("js".to_string(), 5, "55.6%".to_string()),
        ]
    );
}

#[test]
fn files_are_ranked_by_length() {
    let (_td, data) = dataset();
    let v = run_json(&["files", "--json"], &data);
    let names: Vec<&str> = v["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["main.js", "style.css", "index.html"]);

    let limited = run_json(&["files", "--json", "--limit", "1"], &data);
    assert_eq!(limited["files"].as_array().unwrap().len(), 1);
}

#[test]
fn ndjson_emits_one_commit_per_line() {
    let (_td, data) = dataset();
    let out = Command::cargo_bin("locscope")
        .unwrap()
        .args(["commits", "--ndjson", "--data"])
        .arg(&data)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        let v: Value = serde_json::from_str(line).unwrap();
        assert!(v["id"].is_string());
    }
}

#[test]
fn table_output_smoke() {
    let (_td, data) = dataset();
    for cmd in ["summary", "commits", "breakdown", "files"] {
        Command::cargo_bin("locscope")
            .unwrap()
            .args([cmd, "--data"])
            .arg(&data)
            .assert()
            .success();
    }
}

#[test]
fn projects_search_and_year_filter() {
    let td = tempdir().unwrap();
    let projects = write_file(
        td.path(),
        "projects.json",
        r#"[
            {"title": "Lab 1", "year": "2024", "description": "HTML basics"},
            {"title": "Meta", "year": 2023, "description": "Commit explorer"},
            {"title": "Lab 5", "year": "2024", "tags": ["viz", "d3"]}
        ]"#,
    );

    let out = Command::cargo_bin("locscope")
        .unwrap()
        .args(["projects", "--json", "--query", "VIZ", "--projects"])
        .arg(&projects)
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["projects"].as_array().unwrap().len(), 1);
    assert_eq!(v["projects"][0]["title"], "Lab 5");

    let out = Command::cargo_bin("locscope")
        .unwrap()
        .args(["projects", "--json", "--year", "2024", "--projects"])
        .arg(&projects)
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    let titles: Vec<&str> = v["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Lab 1", "Lab 5"]);
    let years: Vec<(&str, u64)> = v["years"]
        .as_array()
        .unwrap()
        .iter()
        .map(|y| (y["year"].as_str().unwrap(), y["count"].as_u64().unwrap()))
        .collect();
    assert_eq!(years, [("2024", 2), ("2023", 1)]);
}

#[test]
fn missing_data_file_fails() {
    let td = tempdir().unwrap();
    let out = Command::cargo_bin("locscope")
        .unwrap()
        .args(["summary", "--data"])
        .arg(td.path().join("nope.csv"))
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Failed to load"), "stderr: {stderr}");
}

#[test]
fn malformed_row_fails_whole_load() {
    let td = tempdir().unwrap();
    let csv = format!(
        "{HEADER}\n{}\nmain.js,abc,js,c9,nadine,2024-01-02,10:00:00Z,Z,2024-01-02T10:00:00Z,0,4",
        ROWS[0]
    );
    let data = write_file(td.path(), "loc.csv", &csv);
    let out = Command::cargo_bin("locscope")
        .unwrap()
        .args(["summary", "--json", "--data"])
        .arg(&data)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Malformed row"), "stderr: {stderr}");
}
