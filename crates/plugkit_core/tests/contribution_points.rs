use plugkit_core::{
    normalize_configuration, ContributionError, ContributionPoints, MenuItem,
    SampleDataContribution, ThemeType,
};
use serde_json::{json, Value};
use std::path::Path;

fn full_manifest() -> Value {
    json!({
        "commands": [
            {"id": "my-plugin.read_tiff", "title": "Read TIFF", "python_name": "my_plugin.io:read_tiff"},
            {"id": "my-plugin.write_tiff", "title": "Write TIFF"},
            {"id": "my-plugin.make_widget", "title": "Open widget"},
            {"id": "my-plugin.make_blobs", "title": "Blobs sample"},
        ],
        "readers": [
            {"command": "my-plugin.read_tiff", "filename_patterns": ["*.tif", "*.tiff"]},
        ],
        "writers": [
            {
                "command": "my-plugin.write_tiff",
                "layer_types": ["image+", "labels?"],
                "filename_extensions": [".tif"],
                "display_name": "TIFF stack",
            },
        ],
        "widgets": [
            {"command": "my-plugin.make_widget", "display_name": "Threshold", "autogenerate": true},
        ],
        "sample_data": [
            {"command": "my-plugin.make_blobs", "key": "blobs", "display_name": "Blobs"},
            {"key": "cells", "display_name": "Cells", "uri": "https://example.org/cells.tif"},
        ],
        "themes": [
            {"id": "night", "label": "Night", "type": "dark", "colors": {"background": "#101010"}},
        ],
        "menus": {
            "viewer/layers/filters": [
                {"submenu": "my-plugin.filters", "group": "filters@1"},
            ],
            "my-plugin.filters": [
                {"command": "my-plugin.make_widget"},
            ],
        },
        "submenus": [
            {"id": "my-plugin.filters", "label": "My filters"},
        ],
        "keybindings": [
            {"command": "my-plugin.make_widget", "key": "Ctrl+Shift+T", "mac": "Cmd+Shift+T"},
        ],
        "configuration": {
            "title": "My Plugin",
            "properties": {"my-plugin.threshold": {"type": "number", "default": 0.5}},
        },
    })
}

#[test]
fn loads_every_contribution_kind() {
    let points = ContributionPoints::from_json_value(full_manifest()).expect("manifest is valid");

    assert_eq!(points.commands().len(), 4);
    assert!(points.get_command("my-plugin.read_tiff").is_some());
    assert!(points.readers()[0].matches_path(Path::new("stack.TIF")));
    assert!(points.writers()[0].accepts_layers(&["image", "labels"]));
    assert!(points.widgets()[0].autogenerate);
    assert!(matches!(
        points.sample_data()[1],
        SampleDataContribution::Uri(_)
    ));
    assert_eq!(points.themes()[0].kind, ThemeType::Dark);
    assert_eq!(points.submenus()[0].label, "My filters");
    assert_eq!(points.keybindings()[0].key, "Ctrl+Shift+T");

    let filter_items = points.menu_items("viewer/layers/filters");
    assert_eq!(filter_items.len(), 1);
    assert!(matches!(filter_items[0], MenuItem::Submenu(_)));
    assert_eq!(filter_items[0].group_order(), (Some("filters"), Some(1)));
}

#[test]
fn single_configuration_section_becomes_list() {
    let points = ContributionPoints::from_json_value(full_manifest()).expect("manifest is valid");
    assert_eq!(points.configuration.len(), 1);
    assert_eq!(points.configuration[0].title, "My Plugin");
}

#[test]
fn configuration_list_is_kept() {
    let points = ContributionPoints::from_json_value(json!({
        "configuration": [{"title": "General"}, {"title": "Advanced"}],
    }))
    .expect("configuration list is valid");
    let titles: Vec<&str> = points
        .configuration
        .iter()
        .map(|section| section.title.as_str())
        .collect();
    assert_eq!(titles, vec!["General", "Advanced"]);
}

#[test]
fn missing_configuration_is_empty_list() {
    let points = ContributionPoints::from_json_value(json!({"commands": []}))
        .expect("document is valid");
    assert!(points.configuration.is_empty());
    assert_eq!(points.to_json_value().unwrap()["configuration"], json!([]));
}

#[test]
fn null_configuration_is_rejected() {
    let err = ContributionPoints::from_json_value(json!({"configuration": null}))
        .expect_err("null section is not a configuration");
    assert!(matches!(err, ContributionError::Schema(_)));
}

#[test]
fn normalize_configuration_properties() {
    let single = json!({"title": "A"});
    assert_eq!(normalize_configuration(single.clone()), vec![single]);

    let many = vec![json!({"title": "A"}), json!({"title": "B"})];
    assert_eq!(normalize_configuration(Value::Array(many.clone())), many);
}

#[test]
fn unknown_field_is_rejected_at_every_level() {
    let cases = [
        ("/typo", json!(true)),
        ("/commands/0/tite", json!("x")),
        ("/readers/0/patterns", json!([])),
        ("/writers/0/layers", json!([])),
        ("/widgets/0/autogen", json!(true)),
        ("/sample_data/0/extra", json!(1)),
        ("/themes/0/colors/bg", json!("#000")),
        ("/menus/my-plugin.filters/0/title", json!("x")),
        ("/submenus/0/parent", json!("x")),
        ("/keybindings/0/windows", json!("x")),
        ("/configuration/properties/my-plugin.threshold/minimum", json!(0)),
    ];

    for (pointer, extra) in cases {
        let mut manifest = full_manifest();
        let (parent, key) = pointer.rsplit_once('/').expect("pointer has a parent");
        let target = if parent.is_empty() {
            &mut manifest
        } else {
            manifest.pointer_mut(parent).expect("parent exists")
        };
        target
            .as_object_mut()
            .expect("parent is an object")
            .insert(key.to_string(), extra);

        let err = ContributionPoints::from_json_value(manifest)
            .expect_err("unknown field must be rejected");
        assert!(
            matches!(err, ContributionError::Schema(_)),
            "{pointer} should be a schema violation, got {err}"
        );
    }
}

#[test]
fn field_format_errors_name_the_field() {
    let mut manifest = full_manifest();
    manifest["widgets"][0]["command"] = json!("make_widget");

    let err = ContributionPoints::from_json_value(manifest).expect_err("unscoped command");
    match err {
        ContributionError::InvalidField { field, value, .. } => {
            assert_eq!(field, "widgets[0].command");
            assert_eq!(value, "make_widget");
        }
        other => panic!("expected field error, got {other}"),
    }
}

#[test]
fn loads_from_file_and_reports_io_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("contributions.json");
    std::fs::write(&path, full_manifest().to_string()).expect("write fixture");

    let points = ContributionPoints::from_path(&path).expect("file should load");
    assert_eq!(points.widgets().len(), 1);

    let err = ContributionPoints::from_path(&dir.path().join("missing.json"))
        .expect_err("missing file must fail");
    assert!(matches!(err, ContributionError::Io { .. }));
}

#[test]
fn malformed_json_is_a_schema_error() {
    let err = ContributionPoints::from_json_str("{\"commands\": [").expect_err("truncated json");
    assert!(matches!(err, ContributionError::Schema(_)));
}

#[test]
fn serialization_round_trips_loaded_document() {
    let points = ContributionPoints::from_json_value(full_manifest()).expect("manifest is valid");
    let value = points.to_json_value().expect("serialize");
    let reloaded = ContributionPoints::from_json_value(value).expect("reload");
    assert_eq!(reloaded, points);
}
