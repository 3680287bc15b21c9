use super::table;
use text_rules::{ApplyOptions, Event, Language, Pipeline};

#[test]
fn english_formatting_runs_paste_then_blur() {
    let rules = table().formatting(Language::English);
    assert_eq!(
        rules.ids(),
        vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 19]
    );
    assert_eq!(
        rules
            .apply(r#"The Messenger (peace and blessings be upon him) said , "be kind"  !"#)
            .unwrap(),
        "The Messenger ﷺ said, “be kind”!"
    );
}

#[test]
fn arabic_formatting() {
    let rules = table().formatting(Language::Arabic);
    assert_eq!(rules.ids(), vec![1, 2, 3, 4, 5, 13, 14, 15, 16, 17, 18, 19]);
    assert_eq!(
        rules
            .apply("السلام عليكم و رحمة الله ، الآية37")
            .unwrap(),
        "السلام عليكم ورحمة الله، الآية 37"
    );
}

#[test]
fn arabic_sanitizing_extends_formatting() {
    let formatting = table().formatting(Language::Arabic);
    let sanitizing = table().sanitizing(Language::Arabic);

    let mut expected = formatting.ids();
    expected.extend([20, 21, 22, 23, 24, 25]);
    assert_eq!(sanitizing.ids(), expected);

    assert_eq!(sanitizing.apply("مُحَمَّدٌ  & 12").unwrap(), "محمد");
}

#[test]
fn english_sanitizing_skips_arabic_only_rules() {
    let ids = table().on_sanitize(Language::English).ids();
    assert_eq!(ids, vec![23, 24, 25]);
}

#[test]
fn event_sets_are_disjoint_in_the_bundled_table() {
    for language in Language::ALL {
        let paste = table().on_paste(language).ids();
        let blur = table().on_blur(language).ids();
        assert!(paste.iter().all(|id| !blur.contains(id)));
    }
}

#[test]
fn pipeline_names_resolve_to_factories() {
    let by_name: Pipeline = "english-on-blur".parse().unwrap();
    assert_eq!(by_name, Pipeline::Event(Language::English, Event::OnBlur));
    assert_eq!(
        table().pipeline(by_name).ids(),
        table().on_blur(Language::English).ids()
    );
}

#[test]
fn trace_has_one_line_per_rule_plus_original() {
    let rules = table().on_blur(Language::English);
    let mut lines = Vec::new();
    let mut sink = |line: &str| lines.push(line.to_string());

    rules
        .apply_with("Hello , world", ApplyOptions::new().with_trace(&mut sink))
        .unwrap();

    assert_eq!(lines.len(), rules.len() + 1);
    assert_eq!(lines[0], "Original: Hello , world");
    assert_eq!(
        lines.last().map(String::as_str),
        Some("After (id,name)=(19,trimEdges): Hello, world")
    );
}

#[test]
fn derived_pipelines_leave_the_table_alone() {
    let before = table().all().ids();
    let _ = table()
        .formatting(Language::Arabic)
        .select(|rule| rule.name() == "trimEdges")
        .combine(&table().sanitizing(Language::English));
    assert_eq!(table().all().ids(), before);
    assert_eq!(before.len(), 25);
}
