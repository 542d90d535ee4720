//! End-to-end resolution of the fixture site: config, data loading, and the
//! per-language views the `build` command writes.

use i18n_data::config::{self, SiteConfig};
use i18n_data::content::Content;
use i18n_data::data;
use i18n_data::localize::Locales;
use i18n_data::resolve::{self, Resolution, ResolveStats};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_site() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site")
}

fn load_fixture() -> (SiteConfig, Content) {
    let site = fixture_site();
    let config = config::load_config(&site).unwrap();
    let tree = data::load_data_dir(&config.data_path(&site)).unwrap();
    (config, tree)
}

fn build_views() -> IndexMap<String, Resolution> {
    let (config, tree) = load_fixture();
    resolve::resolve_languages(
        &tree,
        &config.languages,
        &config.default_lang,
        &config.resolve_options(),
    )
}

/// The view as plain JSON, for readable comparisons.
fn as_json(content: &Content) -> serde_json::Value {
    serde_json::to_value(content).unwrap()
}

#[test]
fn fixture_config_lists_three_languages() {
    let (config, _) = load_fixture();
    assert_eq!(config.languages, vec!["en", "fr", "de"]);
    assert_eq!(config.default_lang, "en");
}

#[test]
fn french_posts_are_fully_resolved() {
    let views = build_views();
    let fr = as_json(&views["fr"].content);
    assert_eq!(
        fr["posts"],
        json!([
            {
                "id": 10,
                "author": {"id": 1, "name": "Ada", "bio": "Écrit sur les moteurs."},
                "tag": {"id": 5, "label": "actualités"},
                "category": {"id": 1, "name": "Ingénierie"},
                "video_id": "dQw4w9WgXcQ",
                "title": "Bonjour",
            },
            {
                "id": 11,
                "author": {"id": 2, "name": "Grace", "bio": "Writes about compilers."},
                "tag": {"id": 7, "label": "version"},
                "title": "Second post",
            },
            {
                "id": 12,
                "author": null,
                "title": null,
            },
        ])
    );
}

#[test]
fn output_keeps_source_key_order() {
    let views = build_views();
    let post = views["fr"].content.get("posts").unwrap().as_collection().unwrap()[0]
        .as_record()
        .unwrap();
    let keys: Vec<&str> = post.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "author", "tag", "category", "video_id", "title"]);
}

#[test]
fn toml_and_nested_data_resolve() {
    let views = build_views();
    let de = as_json(&views["de"].content);
    assert_eq!(de["site"]["title"], json!("Field Notes"));
    assert_eq!(de["site"]["footer"]["text"], json!("Alle Rechte vorbehalten"));
    assert_eq!(de["site"]["updated"], json!("2024-05-01"));
    assert_eq!(de["categories"]["2"]["name"], json!("Reisen"));
    assert_eq!(de["blog"]["series"][0]["name"], json!("Getting started"));
    assert_eq!(de["blog"]["series"][0]["post"]["title"], json!("Hallo"));
}

#[test]
fn embedded_entities_are_not_associated_again() {
    let views = build_views();
    let en = as_json(&views["en"].content);
    let post = &en["blog"]["series"][0]["post"];
    assert_eq!(post["author_id"], json!(1));
    assert!(post.get("author").is_none());
}

#[test]
fn per_language_stats() {
    let views = build_views();
    assert_eq!(
        views["en"].stats,
        ResolveStats {
            localized: 12,
            fallbacks: 0,
            missing_locales: 1,
            associated: 7,
            missing_associations: 1,
        }
    );
    assert_eq!(
        views["fr"].stats,
        ResolveStats {
            localized: 12,
            fallbacks: 3,
            missing_locales: 1,
            associated: 7,
            missing_associations: 1,
        }
    );
    assert_eq!(
        views["de"].stats,
        ResolveStats {
            localized: 12,
            fallbacks: 7,
            missing_locales: 0,
            associated: 7,
            missing_associations: 1,
        }
    );
}

#[test]
fn raw_tree_is_not_modified() {
    let (config, tree) = load_fixture();
    let before = tree.clone();
    let _ = resolve::resolve(&tree, &Locales::new("fr", "en"), &config.resolve_options());
    assert_eq!(tree, before);
    assert_eq!(
        as_json(&tree)["posts"][0]["author_id"],
        json!(1)
    );
}

#[test]
fn written_views_round_trip_through_json() {
    let views = build_views();
    let out = TempDir::new().unwrap();
    for (lang, view) in &views {
        data::write_json(&view.content, &out.path().join(lang).join("data.json")).unwrap();
    }
    let text = std::fs::read_to_string(out.path().join("fr/data.json")).unwrap();
    let reloaded: Content = serde_json::from_str(&text).unwrap();
    assert_eq!(reloaded, views["fr"].content);
}

#[test]
fn retain_original_keys_from_config() {
    let site = TempDir::new().unwrap();
    std::fs::create_dir_all(site.path().join("_data")).unwrap();
    std::fs::write(
        site.path().join("config.toml"),
        "languages = [\"en\", \"fr\"]\n[resolve]\nretain_original_keys = true\n",
    )
    .unwrap();
    std::fs::write(
        site.path().join("_data/authors.json"),
        r#"[{"id": 1, "name": "Ada"}]"#,
    )
    .unwrap();
    std::fs::write(
        site.path().join("_data/page.json"),
        r#"{"author_id": 1, "title_localized": {"en": "Hi", "fr": "Salut"}}"#,
    )
    .unwrap();

    let config = config::load_config(site.path()).unwrap();
    let tree = data::load_data_dir(&config.data_path(site.path())).unwrap();
    let view = resolve::resolve(&tree, &config.locales_for("fr").unwrap(), &config.resolve_options());
    assert_eq!(
        as_json(&view.content)["page"],
        json!({
            "author": {"id": 1, "name": "Ada"},
            "author_id": 1,
            "title": "Salut",
            "title_localized": {"en": "Hi", "fr": "Salut"},
        })
    );
}

#[test]
fn empty_site_resolves_to_empty_views() {
    let site = TempDir::new().unwrap();
    let config = config::load_config(site.path()).unwrap();
    let tree = data::load_data_dir(&config.data_path(site.path())).unwrap();
    let views = resolve::resolve_languages(
        &tree,
        &config.languages,
        &config.default_lang,
        &config.resolve_options(),
    );
    assert_eq!(views.len(), 1);
    assert_eq!(views["en"].content, Content::empty_record());
}
