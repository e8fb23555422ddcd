//! Shared fixtures for integration tests.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

use dossier::catalog::SectionCatalog;
use dossier::config::MergeConfig;

/// Write a minimal valid PDF with the given number of pages.
pub fn create_test_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(pages);
    for i in 0..pages {
        let content = format!("BT /F1 12 Tf 72 720 Td (page {i}) Tj ET");
        let content_id = doc.add_object(Stream::new(
            lopdf::Dictionary::new(),
            content.into_bytes(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(&path).unwrap();
    path
}

/// A catalog and config for the canonical dossier: a 2-page portadas
/// section, the generated contents page and a 3-page budget document.
pub fn dossier_setup(dir: &Path) -> (SectionCatalog, MergeConfig) {
    let portadas = create_test_pdf(dir, "portadas.pdf", 2);
    let budget = create_test_pdf(dir, "presupuesto.pdf", 3);

    let catalog = SectionCatalog::new()
        .with_section("portadas", &portadas)
        .with_label("portadas", "Portadas")
        .with_label("presupuesto_programacion", "Presupuesto de programacion");

    let config = MergeConfig {
        output: dir.join("dossier.pdf"),
        ordered_keys: vec![
            "portadas".to_string(),
            "contenido_separadores".to_string(),
            "presupuesto_programacion".to_string(),
        ],
        budget_path: Some(budget),
        quiet: true,
        ..Default::default()
    };

    (catalog, config)
}
