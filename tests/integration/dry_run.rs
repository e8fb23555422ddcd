//! Integration tests for the dry-run page plan.

use tempfile::TempDir;

use dossier::merge::SectionMerger;

use crate::common::dossier_setup;

#[tokio::test]
async fn test_plan_computes_mapping_without_output() {
    let dir = TempDir::new().unwrap();
    let (catalog, config) = dossier_setup(dir.path());

    let merger = SectionMerger::new(catalog);
    let plan = merger.plan(&config).await.unwrap();

    assert_eq!(plan.page_mapping.len(), 3);
    assert_eq!(plan.page_mapping.start_page("portadas"), Some(1));
    assert_eq!(
        plan.page_mapping.start_page("presupuesto_programacion"),
        Some(4)
    );
    assert!(plan.skipped.is_empty());

    assert!(!config.output.exists(), "Dry run must not create output");
}

#[tokio::test]
async fn test_plan_contents_entries() {
    let dir = TempDir::new().unwrap();
    let (catalog, config) = dossier_setup(dir.path());

    let merger = SectionMerger::new(catalog);
    let plan = merger.plan(&config).await.unwrap();

    assert_eq!(plan.contents_entries.len(), 2);
    assert_eq!(plan.contents_entries[0].label, 'A');
    assert_eq!(plan.contents_entries[0].name, "Portadas");
    assert_eq!(plan.contents_entries[0].page, 1);
    assert_eq!(plan.contents_entries[1].label, 'B');
    assert_eq!(plan.contents_entries[1].page, 4);
}

#[tokio::test]
async fn test_plan_reports_skipped_sections() {
    let dir = TempDir::new().unwrap();
    let (catalog, mut config) = dossier_setup(dir.path());
    config.budget_path = Some(dir.path().join("missing.pdf"));

    let merger = SectionMerger::new(catalog);
    let plan = merger.plan(&config).await.unwrap();

    assert_eq!(plan.skipped.len(), 1);
    assert_eq!(plan.skipped[0].key, "presupuesto_programacion");
    // Skipped sections keep a start page but contribute zero pages
    assert_eq!(
        plan.page_mapping.start_page("presupuesto_programacion"),
        Some(4)
    );
    assert_eq!(plan.page_mapping.total_pages(), 3);
    assert!(!config.output.exists());
}

#[tokio::test]
async fn test_plan_serializes_to_json() {
    let dir = TempDir::new().unwrap();
    let (catalog, config) = dossier_setup(dir.path());

    let merger = SectionMerger::new(catalog);
    let plan = merger.plan(&config).await.unwrap();

    let json = serde_json::to_string_pretty(&plan).unwrap();
    assert!(json.contains("\"portadas\""));
    assert!(json.contains("\"start_page\": 1"));
}
