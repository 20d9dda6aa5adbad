use port_sweep::report::{render_report, render_table, write_results_json};
use port_sweep::types::PortResult;
use std::time::Duration;

#[test]
fn control_bytes_are_stripped_on_screen_but_kept_in_json() {
    let results = vec![
        PortResult::open("127.0.0.1", 21, b"220 ftp\x07ready\r\n".to_vec()),
        PortResult::open("127.0.0.1", 80, Vec::new()),
    ];

    let table = render_table(&results);
    assert!(table.contains("220 ftpready"));
    assert!(!table.contains('\x07'));
    assert!(table.contains("Unknown"));

    let path = std::env::temp_dir().join(format!("port-sweep-{}.json", std::process::id()));
    write_results_json(&path, &results).expect("write json");
    let text = std::fs::read_to_string(&path).expect("read json");
    std::fs::remove_file(&path).ok();

    // Indented output.
    assert!(text.contains("\n  {"));

    let v: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    let arr = v.as_array().expect("array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["host"], "127.0.0.1");
    assert_eq!(arr[0]["port"], 21);
    assert_eq!(arr[0]["state"], "Open");
    assert_eq!(arr[0]["banner"], "220 ftp\u{7}ready\r\n");
    assert_eq!(arr[1]["banner"], "");
}

#[test]
fn unwritable_path_reports_an_error() {
    let path = std::env::temp_dir()
        .join("port-sweep-missing-dir")
        .join("nested")
        .join("out.json");
    assert!(write_results_json(&path, &[]).is_err());
}

#[test]
fn report_lists_open_count_and_table() {
    let results = vec![PortResult::open("10.0.0.2", 443, Vec::new())];
    let s = render_report(&results, "2026-10-18T12:00:00Z", Duration::from_secs(1), true);
    let lines: Vec<&str> = s.lines().collect();
    let started = lines.iter().position(|l| l.starts_with("Started at: "));
    let taken = lines.iter().position(|l| l.starts_with("Time taken: "));
    assert_eq!(started.map(|i| i + 1), taken);
    assert!(s.contains("Total Open Ports Found: 1"));
    assert!(s.contains("SERVICE/VERSION"));
    assert!(s.contains("10.0.0.2"));
}
