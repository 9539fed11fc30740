//! End-to-end scrape runs against in-memory sites

use petscout::config::{Config, ScraperConfig, SessionKind};
use petscout::output::write_report;
use petscout::{scrape_site_with, Field, ScrapeReport};
use tempfile::TempDir;

use crate::support::SitePages;

const ROOT: &str = "https://rescue.test/";
const ADOPT_DOGS: &str = "https://rescue.test/adopt?animalType=Dog";
const ADOPT_CATS: &str = "https://rescue.test/adopt?animalType=Cat";
const REX: &str = "https://new.shelterluv.com/embed/animal/42";
const MISTY: &str = "https://new.shelterluv.com/embed/animal/77";

const SCRIPT: &str = r#"<script src="https://new.shelterluv.com/embed/api.js"></script>"#;

/// Creates a static-session configuration with short waits
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.session.kind = SessionKind::Static;
    config.scraper = ScraperConfig {
        element_wait_ms: 10,
        max_pages: None,
    };
    config
}

fn page(head: &str, body: &str) -> String {
    format!("<html><head>{}</head><body>{}</body></html>", head, body)
}

fn animal(name: &str, sex: &str, age: &str) -> String {
    page(
        "",
        &format!(
            r#"<img src="https://new.shelterluv.com/profile-pictures/{name}.jpg">
            <div data-cy="name">
                <h1>{name}</h1>
                <div><span>Breed</span><span>Mixed</span></div>
                <div><span>Sex</span><span>{sex}</span></div>
                <div><span>Age</span><span>{age}</span></div>
            </div>"#
        ),
    )
}

/// Root links to a dog listing and an off-site partner; the listing frames one animal
fn dog_site() -> SitePages {
    SitePages::new()
        .with_page(
            ROOT,
            &page(
                SCRIPT,
                r#"<a href="https://rescue.test/adopt?animalType=Dog">Dogs</a>
                   <a href="https://partner.test/donate">Donate</a>"#,
            ),
        )
        .with_page(
            ADOPT_DOGS,
            &page(
                SCRIPT,
                r#"<iframe class="shelterluv" src="https://new.shelterluv.com/embed/animal/42"></iframe>"#,
            ),
        )
        .with_page(REX, &animal("Rex", "Male", "3 years"))
        .with_page("https://partner.test/donate", &page("", "<p>Thanks</p>"))
}

#[tokio::test]
async fn test_full_scrape_single_embed() {
    let report = scrape_site_with(ROOT, &create_test_config(), dog_site())
        .await
        .expect("static session always opens");

    assert_eq!(report.data.len(), 1);
    let rex = &report.data[0];
    assert_eq!(rex.get(Field::Name), Some("Rex"));
    assert_eq!(rex.get(Field::Type), Some("Dog"));
    assert_eq!(rex.get(Field::Breed), Some("Mixed"));
    assert_eq!(rex.get(Field::Gender), Some("Male"));
    assert_eq!(rex.get(Field::Age), Some("3 years"));
    assert_eq!(
        rex.get(Field::Image),
        Some("https://new.shelterluv.com/profile-pictures/Rex.jpg")
    );
    assert_eq!(rex.get(Field::Price), None);

    // The partner site is never visited
    assert_eq!(report.stats.pages_visited, 2);
    assert_eq!(report.stats.embed_tasks, 1);
}

#[tokio::test]
async fn test_report_json_shape() {
    let report = scrape_site_with(ROOT, &create_test_config(), dog_site())
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "data": [{
                "Name": "Rex",
                "Type": "Dog",
                "Breed": "Mixed",
                "Gender": "Male",
                "Age": "3 years",
                "Image": "https://new.shelterluv.com/profile-pictures/Rex.jpg",
            }]
        })
    );
}

#[tokio::test]
async fn test_cyclic_links_visit_each_page_once() {
    let a = "https://loop.test/";
    let b = "https://loop.test/b";
    let c = "https://loop.test/c";
    let pages = SitePages::new()
        .with_page(a, &page("", r#"<a href="https://loop.test/b"></a><a href="https://loop.test/c"></a>"#))
        .with_page(b, &page("", r#"<a href="https://loop.test/"></a><a href="https://loop.test/c"></a>"#))
        .with_page(c, &page("", r#"<a href="https://loop.test/b"></a><a href="https://loop.test/"></a>"#));

    let report = scrape_site_with(a, &create_test_config(), pages.clone())
        .await
        .unwrap();

    assert!(report.data.is_empty());
    assert_eq!(report.stats.pages_visited, 3);
    assert_eq!(report.stats.pages_enqueued, 2);
    assert_eq!(report.stats.candidates_offered, 6);
    // One classification fetch and one page load per page
    assert_eq!(pages.fetch_count(), 6);
}

#[tokio::test]
async fn test_embed_linked_twice_is_extracted_once() {
    let pages = SitePages::new()
        .with_page(
            ROOT,
            &page(
                SCRIPT,
                r#"<a href="https://rescue.test/adopt?animalType=Dog"></a>
                   <a href="https://rescue.test/adopt?animalType=Cat"></a>"#,
            ),
        )
        .with_page(
            ADOPT_DOGS,
            &page(
                SCRIPT,
                r#"<iframe class="shelterluv" src="https://new.shelterluv.com/embed/animal/42"></iframe>"#,
            ),
        )
        .with_page(
            ADOPT_CATS,
            &page(
                SCRIPT,
                r#"<iframe class="shelterluv" src="https://new.shelterluv.com/embed/animal/42"></iframe>
                   <iframe class="shelterluv" src="https://new.shelterluv.com/embed/animal/77"></iframe>"#,
            ),
        )
        .with_page(REX, &animal("Rex", "Male", "3 years"))
        .with_page(MISTY, &animal("Misty", "Female", "1 year"));

    let report = scrape_site_with(ROOT, &create_test_config(), pages)
        .await
        .unwrap();

    let names: Vec<_> = report
        .data
        .iter()
        .map(|record| record.get(Field::Name).unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["Rex", "Misty"]);

    // Rex keeps the context of the page that found it first
    assert_eq!(report.data[0].get(Field::Type), Some("Dog"));
    assert_eq!(report.data[1].get(Field::Type), Some("Cat"));
    assert_eq!(report.stats.embed_tasks, 2);
}

#[tokio::test]
async fn test_frames_on_unrecognized_pages_are_not_embeds() {
    // Without a provider script the page gets no embed marker or embed host
    let pages = SitePages::new()
        .with_page(
            ROOT,
            &page(
                "",
                r#"<iframe class="widget" src="https://new.shelterluv.com/embed/animal/42"></iframe>"#,
            ),
        )
        .with_page(REX, &animal("Rex", "Male", "3 years"));

    let report = scrape_site_with(ROOT, &create_test_config(), pages)
        .await
        .unwrap();

    assert!(report.data.is_empty());
    assert_eq!(report.stats.candidates_offered, 1);
    assert_eq!(report.stats.embed_tasks, 0);
    assert_eq!(report.stats.pages_enqueued, 0);
}

#[tokio::test]
async fn test_incomplete_and_missing_embeds_are_dropped() {
    let pages = SitePages::new()
        .with_page(
            ROOT,
            &page(
                SCRIPT,
                r#"<iframe class="shelterluv" src="https://new.shelterluv.com/embed/animal/42"></iframe>
                   <iframe class="shelterluv" src="https://new.shelterluv.com/embed/animal/77"></iframe>"#,
            ),
        )
        // No Sex row, so Gender is missing
        .with_page(REX, &page("", r#"<div data-cy="name"><h1>Rex</h1></div>"#));

    let report = scrape_site_with(ROOT, &create_test_config(), pages)
        .await
        .unwrap();

    assert!(report.data.is_empty());
    assert_eq!(report.stats.empty_extractions, 1);
    assert_eq!(report.stats.failed_extractions, 1);
}

#[tokio::test]
async fn test_unreachable_root_yields_empty_report() {
    let report = scrape_site_with(ROOT, &create_test_config(), SitePages::new())
        .await
        .unwrap();

    assert!(report.data.is_empty());
    assert_eq!(report.stats.pages_skipped, 1);
    assert!(report.stats.finished_at.is_some());
}

#[tokio::test]
async fn test_report_written_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");

    let report = scrape_site_with(ROOT, &create_test_config(), dog_site())
        .await
        .unwrap();
    write_report(&report, Some(&path)).unwrap();

    let parsed: ScrapeReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.data, report.data);
}
