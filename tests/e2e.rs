use pretty_assertions::assert_eq;
use rum_actions as rum;
use rum::report::ListOptions;
use rum::source::ActionFilter;
use serde_json::json;

fn click_records() -> Vec<rum::Record> {
    serde_json::from_value(json!([
        {"name": "click", "context": {"page": {"url": "/a"}}},
        {"name": "click", "context": {"page": {"url": "/b"}, "device": {"type": "mobile"}}}
    ]))
    .unwrap()
}

#[test]
fn click_scenario_excludes_device_columns() {
    let flat = rum::flatten_all(&click_records());
    assert_eq!(
        serde_json::to_value(&flat).unwrap(),
        json!([
            {"name": "click", "page.url": "/a"},
            {"name": "click", "page.url": "/b", "device.type": "mobile"}
        ])
    );

    let columns = rum::select_columns(
        &flat,
        &rum::Patterns::default(),
        &rum::Patterns::parse("device."),
        rum::ColumnOrder::FirstSeen,
    );
    assert_eq!(columns.iter().collect::<Vec<_>>(), vec!["page.url"]);
    assert_eq!(
        rum::rows(&flat, &columns),
        vec![vec!["click", "/a"], vec!["click", "/b"]]
    );
}

#[test]
fn list_actions_from_search_response_as_csv() {
    let event = |attrs: serde_json::Value| json!({"attributes": {"attributes": attrs}});
    let doc = json!({
        "data": [
            event(json!({"action": {"name": "click"}, "context": {"page": {"url": "/a"}}})),
            event(json!({"type": "view", "context": {"page": {"url": "/v"}}})),
            event(json!({"action": {"name": "scroll"}, "context": {"page": {"url": "/s"}}})),
            event(json!({
                "action": {"name": "click"},
                "context": {"page": {"url": "/b"}, "device": {"type": "mobile"}}
            })),
        ]
    });
    let opts = ListOptions {
        actions: ActionFilter { names: vec!["click".into()], count: 10 },
        filters: rum::Patterns::parse("device."),
        output: rum::OutputFormat::Csv,
        ..Default::default()
    };
    let out = rum::list_actions(doc.to_string().as_bytes(), &opts).unwrap();
    assert_eq!(out, "name,page.url\nclick,/a\nclick,/b\n");
}

#[test]
fn list_actions_json_keeps_whole_actions() {
    let input = json!([
        {
            "action": {"name": "click", "type": "click"},
            "view": {"url": "/a"},
            "context": {"page": {"url": "/a"}}
        },
        {"action": {"name": "tap"}}
    ])
    .to_string();
    let opts = ListOptions {
        output: rum::OutputFormat::Json,
        ..Default::default()
    };
    let out = rum::list_actions(input.as_bytes(), &opts).unwrap();
    let back: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        back,
        json!([
            {
                "name": "click",
                "attributes": {
                    "action": {"name": "click", "type": "click"},
                    "view": {"url": "/a"},
                    "context": {"page": {"url": "/a"}}
                },
                "context": {"page": {"url": "/a"}}
            },
            {"name": "tap", "attributes": {"action": {"name": "tap"}}, "context": null}
        ])
    );
}

#[test]
fn attributes_stay_out_of_table_columns() {
    let input = r#"[{"action":{"name":"click"},"view":{"url":"/v"},"context":{"k":1}}]"#;
    let opts = ListOptions {
        output: rum::OutputFormat::Csv,
        ..Default::default()
    };
    let out = rum::list_actions(input.as_bytes(), &opts).unwrap();
    assert_eq!(out, "name,k\nclick,1\n");
}

#[test]
fn list_actions_respects_count() {
    let input = (0..5)
        .map(|i| json!({"action": {"name": format!("a{i}")}}).to_string())
        .collect::<Vec<_>>()
        .join("\n");
    let opts = ListOptions {
        actions: ActionFilter { names: Vec::new(), count: 3 },
        output: rum::OutputFormat::Csv,
        ..Default::default()
    };
    let out = rum::list_actions(input.as_bytes(), &opts).unwrap();
    assert_eq!(out, "name\na0\na1\na2\n");
}

#[test]
fn list_actions_fails_on_bad_context() {
    let input = r#"[{"action":{"name":"click"},"context":"not a map"}]"#;
    let err = rum::list_actions(input.as_bytes(), &ListOptions::default()).unwrap_err();
    assert!(matches!(err, rum::RumError::InvalidEvent(_)));
}
