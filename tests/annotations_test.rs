//! Annotation store round-trip and fixture-driven cleaning checks.

use std::fs;
use std::path::PathBuf;

use rs_clearhtml::annotations::{BodyAnnotation, BodyAnnotations};
use rs_clearhtml::clean_html;

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rs-clearhtml-{}-{name}", std::process::id()))
}

fn fixture_store() -> BodyAnnotations {
    let mut store = BodyAnnotations::default();
    store.insert(
        "wrapper-divs",
        BodyAnnotation {
            url: "https://example.com/one".to_string(),
            raw_html: r#"<div style="color:blue"><div>paragraph1</div><div>paragraph2</div></div>"#
                .to_string(),
            expected_html: "<article><p>paragraph1</p><p>paragraph2</p></article>".to_string(),
        },
    );
    store.insert(
        "scripted",
        BodyAnnotation {
            url: "https://example.com/two".to_string(),
            raw_html: "<div><p>body</p><script>x()</script></div>".to_string(),
            expected_html: "<article><p>body</p></article>".to_string(),
        },
    );
    store
}

#[test]
fn store_round_trips_through_disk() {
    let path = scratch_file("roundtrip.json");
    let store = fixture_store();

    store.save(&path).unwrap();
    let loaded = BodyAnnotations::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded, store);
    assert_eq!(loaded.len(), 2);
    assert_eq!(
        loaded.get("scripted").map(|a| a.url.as_str()),
        Some("https://example.com/two")
    );
}

#[test]
fn saved_json_is_sorted_and_readable() {
    let path = scratch_file("sorted.json");
    fixture_store().save(&path).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    // keys come out in order, pretty-printed
    let scripted = raw.find("\"scripted\"").unwrap();
    let wrapper = raw.find("\"wrapper-divs\"").unwrap();
    assert!(scripted < wrapper);
    assert!(raw.contains("\n"));
}

#[test]
fn annotated_pages_clean_to_their_expected_bodies() {
    for (id, annotation) in &fixture_store() {
        let cleaned = clean_html(&annotation.raw_html).unwrap();
        assert_eq!(cleaned, annotation.expected_html, "fixture {id}");
    }
}

#[test]
fn loading_a_missing_store_yields_empty() {
    let store = BodyAnnotations::load(&scratch_file("never-written.json")).unwrap();
    assert!(store.is_empty());
}
