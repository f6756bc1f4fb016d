use chat_week::analysis::analyze;
use chat_week::dialect::ParserConfig;
use chat_week::renderer;
use chat_week::report::Report;
use chat_week::window::parse_instant;

fn fixture_report() -> Report {
    let text = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/group_chat.txt"
    ))
    .unwrap();
    let now = parse_instant("2024-01-05T12:00:00").unwrap();
    analyze(&text, &now, &ParserConfig::default()).unwrap().report
}

#[test]
fn markdown_lists_every_day_and_power_user() {
    let markdown = renderer::md::render(&fixture_report()).unwrap();

    assert!(markdown.starts_with("# 💬 Chat activity: last 7 days\n"));
    assert!(markdown.contains("*2023-12-30 to 2024-01-05"));
    assert!(markdown.contains("| 2023-12-30 | Sat | 2 | 2 |"));
    assert!(markdown.contains("| 2024-01-05 | Fri | 1 | 0 |"));
    assert!(markdown.contains("| 1 | Alice | 4 / 7 |"));
    assert!(markdown.contains("| 2 | Bob | 4 / 7 |"));
    assert!(markdown.contains("- 👥 **Active members:** 4"));
}

#[test]
fn markdown_for_quiet_window() {
    let now = parse_instant("2024-06-01T12:00:00").unwrap();
    let report = analyze("5/1/24, 9:00 AM - Alice: hi", &now, &ParserConfig::default())
        .unwrap()
        .report;
    let markdown = renderer::md::render(&report).unwrap();

    assert!(markdown.contains("Nobody posted in this window"));
    assert!(markdown.contains("*Nobody was active on 4 or more days.*"));
}

#[test]
fn markdown_escapes_pipes_in_names() {
    let text = "\
1/1/24, 9:00 - a|b: one
2/1/24, 9:00 - a|b: two
3/1/24, 9:00 - a|b: three
4/1/24, 9:00 - a|b: four";
    let now = parse_instant("2024-01-05T12:00:00").unwrap();
    let report = analyze(text, &now, &ParserConfig::default()).unwrap().report;
    let markdown = renderer::md::render(&report).unwrap();
    assert!(markdown.contains("| 1 | a\\|b | 4 / 7 |"));
}

#[test]
fn text_report_has_header_and_power_users() {
    let text = renderer::text::render(&fixture_report());

    assert!(text.starts_with("Window 2023-12-30 .. 2024-01-05\n"));
    assert_eq!(text.lines().filter(|l| l.starts_with("202")).count(), 7);
    assert!(text.contains("Power users:"));
    assert!(text.contains("Alice"));
}

#[test]
fn saved_report_renders_the_same() {
    let report = fixture_report();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, report.to_json_pretty().unwrap()).unwrap();

    let loaded = Report::load_from_file(&path).unwrap();
    assert_eq!(
        renderer::md::render(&loaded).unwrap(),
        renderer::md::render(&report).unwrap()
    );
}
