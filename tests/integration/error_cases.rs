//! Integration tests for error handling and edge cases.

use std::path::PathBuf;
use tempfile::TempDir;

use dossier::catalog::SectionCatalog;
use dossier::config::MergeConfig;
use dossier::error::DossierError;
use dossier::merge::SectionMerger;

use crate::common::{create_test_pdf, dossier_setup};

#[tokio::test]
async fn test_error_nothing_mergeable() {
    let dir = TempDir::new().unwrap();

    let config = MergeConfig {
        output: dir.path().join("dossier.pdf"),
        ordered_keys: vec!["unknown_a".to_string(), "unknown_b".to_string()],
        quiet: true,
        ..Default::default()
    };

    let merger = SectionMerger::new(SectionCatalog::new());
    let result = merger.merge(&config).await;

    let err = result.unwrap_err();
    assert!(matches!(err, DossierError::NoSectionsMerged));
    assert!(err.is_fatal());
    assert!(!config.output.exists(), "Failed merge must not create output");
}

#[tokio::test]
async fn test_corrupt_section_is_skipped() {
    let dir = TempDir::new().unwrap();
    let (catalog, mut config) = dossier_setup(dir.path());

    let corrupt = dir.path().join("corrupt.pdf");
    std::fs::write(&corrupt, "not a pdf").unwrap();
    config.ordered_keys.insert(1, "corrupt".to_string());
    config.external_files.insert("corrupt".to_string(), corrupt);

    let merger = SectionMerger::new(catalog);
    let outcome = merger.merge(&config).await.unwrap();

    assert_eq!(outcome.statistics.sections_merged, 3);
    assert_eq!(outcome.statistics.sections_skipped, 1);
    assert_eq!(outcome.skipped[0].key, "corrupt");
    // The corrupt section keeps a start page but contributes no pages
    assert_eq!(outcome.page_mapping.start_page("corrupt"), Some(3));
    assert_eq!(
        outcome.page_mapping.start_page("contenido_separadores"),
        Some(3)
    );
}

#[tokio::test]
async fn test_budget_key_without_budget_path() {
    let dir = TempDir::new().unwrap();
    let (catalog, mut config) = dossier_setup(dir.path());
    config.budget_path = None;

    let merger = SectionMerger::new(catalog);
    let outcome = merger.merge(&config).await.unwrap();

    assert_eq!(outcome.statistics.sections_merged, 2);
    assert_eq!(outcome.skipped[0].key, "presupuesto_programacion");
    assert_eq!(outcome.statistics.total_pages, 3);
}

#[tokio::test]
async fn test_error_output_directory_not_exist() {
    let dir = TempDir::new().unwrap();
    let (catalog, mut config) = dossier_setup(dir.path());
    config.output = PathBuf::from("/nonexistent/directory/dossier.pdf");

    let merger = SectionMerger::new(catalog);
    let result = merger.merge(&config).await;

    let err = result.unwrap_err();
    assert!(matches!(err, DossierError::FailedToCreateOutput { .. }));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_error_empty_key_list() {
    let config = MergeConfig {
        output: PathBuf::from("dossier.pdf"),
        ordered_keys: vec![],
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_error_duplicate_keys() {
    let config = MergeConfig {
        output: PathBuf::from("dossier.pdf"),
        ordered_keys: vec!["portadas".to_string(), "portadas".to_string()],
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_error_verbose_and_quiet_conflict() {
    let config = MergeConfig {
        output: PathBuf::from("dossier.pdf"),
        ordered_keys: vec!["portadas".to_string()],
        verbose: true,
        quiet: true,
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_error_zero_jobs() {
    let config = MergeConfig {
        output: PathBuf::from("dossier.pdf"),
        ordered_keys: vec!["portadas".to_string()],
        jobs: Some(0),
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_error_output_same_as_budget() {
    let dir = TempDir::new().unwrap();
    let budget = create_test_pdf(dir.path(), "presupuesto.pdf", 1);

    let config = MergeConfig {
        output: budget.clone(),
        ordered_keys: vec!["presupuesto_programacion".to_string()],
        budget_path: Some(budget),
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_error_malformed_catalog_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = SectionCatalog::from_json_file(&path);
    assert!(matches!(
        result.unwrap_err(),
        DossierError::InvalidCatalog { .. }
    ));
}

#[tokio::test]
async fn test_single_section_dossier() {
    let dir = TempDir::new().unwrap();
    let portadas = create_test_pdf(dir.path(), "portadas.pdf", 2);

    let catalog = SectionCatalog::new().with_section("portadas", &portadas);
    let config = MergeConfig {
        output: dir.path().join("dossier.pdf"),
        ordered_keys: vec!["portadas".to_string()],
        quiet: true,
        ..Default::default()
    };

    let merger = SectionMerger::new(catalog);
    let outcome = merger.merge(&config).await.unwrap();

    assert_eq!(outcome.statistics.sections_merged, 1);
    assert_eq!(outcome.statistics.total_pages, 2);
    assert!(!outcome.statistics.contents_generated);
}
