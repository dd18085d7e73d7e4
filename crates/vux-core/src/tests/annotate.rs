use super::{KnownScenes, touch};
use crate::*;
use futures::executor::block_on;

#[test]
fn annotate_end_to_end_without_scenes() {
    let text = "A-->|n:x:y|B\nB-->|m:x:y|C";
    let out = annotate(text, &KnownScenes(vec![])).unwrap();
    assert_eq!(
        out,
        "A-->|n:x:y|B\nB-->|m:x:y|C\n\
linkStyle 0,1 stroke:orange;\n \n\
classDef Red fill:#f00,stroke:#333,stroke-width:4px;\n\
class A Red;\n\
click A call postClickNode(A);\n\
class B Red;\n\
click B call postClickNode(B);\n\
class C Red;\n\
click C call postClickNode(C);\n"
    );
}

#[test]
fn annotate_keeps_source_first() {
    let text = "graph TD\nHome-->|go:nav:main|Missing";
    let out = annotate(text, &KnownScenes(vec!["Home"])).unwrap();
    assert!(out.starts_with(text));
    let link_at = out.find("linkStyle 0 stroke:orange;").unwrap();
    let class_def_at = out.find(scenes::HIGHLIGHT_CLASS_DEF).unwrap();
    assert!(link_at < class_def_at);
}

#[test]
fn annotate_propagates_palette_exhaustion() {
    let text = (0..30)
        .map(|i| format!("A{i}-->|n:c{i}:g|B{i}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(matches!(
        annotate(&text, &KnownScenes(vec![])),
        Err(Error::PaletteExhausted { .. })
    ));
}

#[test]
fn annotate_plain_diagram_only_adds_class_def() {
    let text = "graph TD\nA --> B";
    let out = annotate(text, &KnownScenes(vec![])).unwrap();
    assert_eq!(
        out,
        format!("{text}\n\n{}\n", scenes::HIGHLIGHT_CLASS_DEF)
    );
}

#[test]
fn annotator_is_idempotent_over_unchanged_tree() {
    let tmp = tempfile::tempdir().expect("tempdir");
    touch(&tmp.path().join("src/scenes"), "Home/index.ts");
    let text = "Home-->|a:b:c|Away\nAway-->|d:b:c|Home";

    for strategy in [LookupStrategy::Walk, LookupStrategy::Indexed] {
        let annotator = Annotator::new(tmp.path()).with_lookup_strategy(strategy);
        let first = annotator.annotate_sync(text).unwrap();
        let second = annotator.annotate_sync(text).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("class Away Red;"));
        assert!(!first.contains("class Home Red;"));
    }
}

#[test]
fn annotator_strategies_agree() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let scenes = tmp.path().join("src/scenes");
    touch(&scenes, "Home/index.ts");
    touch(&scenes, "deep/er/CartScene.ts");
    let text = "Home-->|a:b:c|Cart\nCart-->|x|Gone";

    let walk = Annotator::new(tmp.path()).annotate_sync(text).unwrap();
    let indexed = Annotator::new(tmp.path())
        .with_lookup_strategy(LookupStrategy::Indexed)
        .annotate_sync(text)
        .unwrap();
    assert_eq!(walk, indexed);
}

#[test]
fn annotator_async_matches_sync() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let annotator = Annotator::new(tmp.path());
    let text = "A-->|n:x:y|B";
    assert_eq!(
        block_on(annotator.annotate(text)).unwrap(),
        annotator.annotate_sync(text).unwrap()
    );
}

#[test]
fn annotator_defaults_to_one_traversal_per_pass() {
    assert_eq!(LookupStrategy::default(), LookupStrategy::Indexed);
    let tmp = tempfile::tempdir().expect("tempdir");
    assert_eq!(
        Annotator::new(tmp.path()).lookup_strategy(),
        LookupStrategy::Indexed
    );
    assert_eq!(
        Annotator::from_settings(tmp.path(), &Settings::default()).lookup_strategy(),
        LookupStrategy::Indexed
    );
}

#[test]
fn annotator_picks_up_scene_changes_between_passes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let annotator = Annotator::new(tmp.path()).with_lookup_strategy(LookupStrategy::Indexed);
    let text = "Home-->|n:x:y|Home";
    assert!(annotator.annotate_sync(text).unwrap().contains("class Home Red;"));

    touch(&annotator.scenes_root(), "HomeScene.ts");
    assert!(!annotator.annotate_sync(text).unwrap().contains("class Home Red;"));
}

#[test]
fn annotator_resolve_scene_returns_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    touch(&tmp.path().join("src/scenes"), "checkout/PayScene.ts");
    let annotator = Annotator::new(tmp.path());
    assert_eq!(
        annotator.resolve_scene("Pay"),
        Some(annotator.scenes_root().join("checkout").join("PayScene.ts"))
    );
    assert_eq!(annotator.resolve_scene("Nope"), None);
}

#[test]
fn annotator_from_settings_uses_scene_layout() {
    let tmp = tempfile::tempdir().expect("tempdir");
    touch(&tmp.path().join("lib/screens"), "LoginScreen.dart");
    let settings = Settings::from_value(serde_json::json!({
        "vux-editor.scenes.root": "lib/screens",
        "vux-editor.scenes.extension": ".dart",
        "vux-editor.scenes.suffix": "Screen",
    }));
    let annotator = Annotator::from_settings(tmp.path(), &settings);
    assert!(annotator.resolve_scene("Login").is_some());
}

#[test]
fn render_params_combine_document_and_settings() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(tmp.path().join("mermaid.json"), r#"{"theme":"dark"}"#).unwrap();
    let doc = MermaidDocument::new(
        tmp.path().join("flow.mmd"),
        "\n%% @config{mermaid.json}\ngraph TD\nA-->|n:x:y|B\n",
    );
    let settings = Settings::from_value(serde_json::json!({
        "vux-editor.preview.backgroundColor": "black",
    }));

    let params = Annotator::new(tmp.path())
        .render_params(&doc, &settings)
        .unwrap();
    assert!(params.code.starts_with("%% @config{mermaid.json}\ngraph TD"));
    assert!(params.code.contains("linkStyle 0 stroke:orange;"));
    assert_eq!(params.background_color, "black");
    assert_eq!(params.mermaid_config, r#"{"theme":"dark"}"#);

    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json["backgroundColor"], "black");
    assert!(json.get("mermaidConfig").is_some());
}
