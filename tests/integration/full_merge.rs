//! Integration tests for complete dossier merges.

use lopdf::Document;
use tempfile::TempDir;

use dossier::catalog::SectionCatalog;
use dossier::config::{CompressionLevel, MergeConfig};
use dossier::merge::SectionMerger;

use crate::common::{create_test_pdf, dossier_setup};

#[tokio::test]
async fn test_full_dossier_merge() {
    let dir = TempDir::new().unwrap();
    let (catalog, config) = dossier_setup(dir.path());

    let merger = SectionMerger::new(catalog);
    let outcome = merger.merge(&config).await.unwrap();

    assert_eq!(outcome.statistics.sections_merged, 3);
    assert_eq!(outcome.statistics.total_pages, 6);
    assert!(outcome.statistics.contents_generated);
    assert!(outcome.skipped.is_empty());

    assert_eq!(outcome.page_mapping.start_page("portadas"), Some(1));
    assert_eq!(
        outcome.page_mapping.start_page("contenido_separadores"),
        Some(3)
    );
    assert_eq!(
        outcome.page_mapping.start_page("presupuesto_programacion"),
        Some(4)
    );

    let written = Document::load(&config.output).unwrap();
    assert_eq!(written.get_pages().len(), 6);
}

#[tokio::test]
async fn test_contents_page_lists_sections() {
    let dir = TempDir::new().unwrap();
    let (catalog, mut config) = dossier_setup(dir.path());
    // Keep content streams readable
    config.compression = CompressionLevel::None;

    let merger = SectionMerger::new(catalog);
    merger.merge(&config).await.unwrap();

    let written = Document::load(&config.output).unwrap();
    let pages = written.get_pages();
    let contents_page = pages[&3];

    let stream = written.get_page_content(contents_page).unwrap();
    let text = String::from_utf8_lossy(&stream);

    assert!(text.contains("Contenido"));
    assert!(text.contains("A. Portadas"));
    assert!(text.contains("B. Presupuesto de programacion"));
    // Dotted fill and the budget's start page
    assert!(text.contains("...."));
    assert!(text.contains(" 4"));
}

#[tokio::test]
async fn test_merge_with_external_override() {
    let dir = TempDir::new().unwrap();
    let (catalog, mut config) = dossier_setup(dir.path());

    // Replace the catalog's portadas with a 5-page substitute
    let replacement = create_test_pdf(dir.path(), "portadas_v2.pdf", 5);
    config
        .external_files
        .insert("portadas".to_string(), replacement);

    let merger = SectionMerger::new(catalog);
    let outcome = merger.merge(&config).await.unwrap();

    assert_eq!(outcome.page_mapping.start_page("portadas"), Some(1));
    assert_eq!(
        outcome.page_mapping.start_page("contenido_separadores"),
        Some(6)
    );
    assert_eq!(outcome.statistics.total_pages, 9);
}

#[tokio::test]
async fn test_merge_with_maximum_compression() {
    let dir = TempDir::new().unwrap();
    let (catalog, mut config) = dossier_setup(dir.path());
    config.compression = CompressionLevel::Maximum;

    let merger = SectionMerger::new(catalog);
    let outcome = merger.merge(&config).await.unwrap();

    assert_eq!(outcome.statistics.total_pages, 6);
    assert!(Document::load(&config.output).is_ok());
}

#[tokio::test]
async fn test_merge_many_sections_parallel() {
    let dir = TempDir::new().unwrap();
    let (catalog, mut config) = dossier_setup(dir.path());
    config.jobs = Some(4);

    for i in 0..5 {
        let key = format!("anexo_{i}");
        let path = create_test_pdf(dir.path(), &format!("{key}.pdf"), 1);
        config.ordered_keys.push(key.clone());
        config.external_files.insert(key, path);
    }

    let merger = SectionMerger::new(catalog);
    let outcome = merger.merge(&config).await.unwrap();

    assert_eq!(outcome.statistics.sections_merged, 8);
    assert_eq!(outcome.statistics.total_pages, 11);
    // The annexes follow the budget in ordered-list order
    assert_eq!(outcome.page_mapping.start_page("anexo_0"), Some(7));
    assert_eq!(outcome.page_mapping.start_page("anexo_4"), Some(11));
}

#[tokio::test]
async fn test_merge_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let (catalog, mut config) = dossier_setup(dir.path());
    let merger = SectionMerger::new(catalog);

    config.output = dir.path().join("dossier_a.pdf");
    let first = merger.merge(&config).await.unwrap();
    let first_output = config.output.clone();

    config.output = dir.path().join("dossier_b.pdf");
    let second = merger.merge(&config).await.unwrap();

    assert_eq!(first.statistics.total_pages, second.statistics.total_pages);

    // Same inputs into two outputs yield byte-equivalent page sequences
    let doc_a = Document::load(&first_output).unwrap();
    let doc_b = Document::load(&config.output).unwrap();
    let pages_a = doc_a.get_pages();
    let pages_b = doc_b.get_pages();
    assert_eq!(pages_a.len(), pages_b.len());

    for (number, page_a) in &pages_a {
        let page_b = pages_b[number];
        assert_eq!(
            doc_a.get_page_content(*page_a).unwrap(),
            doc_b.get_page_content(page_b).unwrap(),
            "page {number} differs between the two outputs"
        );
    }
}

#[tokio::test]
async fn test_merge_more_sections_than_labels() {
    let dir = TempDir::new().unwrap();

    let mut config = MergeConfig {
        output: dir.path().join("dossier.pdf"),
        ordered_keys: vec!["contenido_separadores".to_string()],
        quiet: true,
        ..Default::default()
    };

    for i in 0..30 {
        let key = format!("sec_{i}");
        let path = create_test_pdf(dir.path(), &format!("{key}.pdf"), 1);
        config.ordered_keys.push(key.clone());
        config.external_files.insert(key, path);
    }

    let merger = SectionMerger::new(SectionCatalog::new());

    // The listing stops at the label alphabet
    let plan = merger.plan(&config).await.unwrap();
    assert_eq!(plan.contents_entries.len(), 26);
    assert_eq!(plan.contents_entries[25].label, 'Z');
    assert_eq!(plan.contents_entries[25].name, "SEC 25");

    // Every section merges regardless of the listing cap
    let outcome = merger.merge(&config).await.unwrap();
    assert_eq!(outcome.statistics.sections_merged, 31);
    assert_eq!(outcome.statistics.total_pages, 31);
    assert_eq!(outcome.page_mapping.start_page("sec_29"), Some(31));

    let written = Document::load(&config.output).unwrap();
    assert_eq!(written.get_pages().len(), 31);
}
