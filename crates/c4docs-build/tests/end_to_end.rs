//! Full builds of small docs trees with a fake web component generator.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use c4docs_build::{
    BuildError, BuildSession, GenerateError, GenerateRequest, SessionOptions, SiteBuilder,
    WebComponentGenerator,
};
use c4docs_projects::ProjectKey;
use pretty_assertions::assert_eq;

/// Writes a stub bundle for every request and remembers the projects.
#[derive(Default)]
struct FakeGenerator {
    projects: RefCell<Vec<ProjectKey>>,
}

impl WebComponentGenerator for FakeGenerator {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<(), GenerateError> {
        self.projects.borrow_mut().push(request.project.clone());
        if let Some(parent) = request.output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&request.output, "// bundle")?;
        Ok(())
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_single_project_site() {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("docs");
    let site = temp.path().join("site");
    write(&docs, "likec4.config.json", "{}");
    write(
        &docs,
        "index.md",
        "# Architecture\n\n```likec4-view\nview1\n```\n\nBetween views.\n\n```likec4-view browser=false\nview2\n```\n",
    );
    write(&docs, "about.md", "# About\n\nNo diagrams here.\n");

    let generator = FakeGenerator::default();
    let session = BuildSession::configure(&docs, SessionOptions::default());
    let report = SiteBuilder::new(session).build(&site, &generator).unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.generation.generated, vec![ProjectKey::Default]);
    assert_eq!(generator.projects.into_inner(), vec![ProjectKey::Default]);

    let index = fs::read_to_string(site.join("index.html")).unwrap();
    assert!(!index.contains("```"));
    assert!(index.contains(
        r#"<likec4-view view-id="view1" browser="true" dynamic-variant="diagram"></likec4-view>"#
    ));
    assert!(index.contains(
        r#"<likec4-view view-id="view2" browser="false" dynamic-variant="diagram"></likec4-view>"#
    ));
    assert_eq!(index.matches("<script").count(), 1);
    assert!(index.contains(r#"<script src="assets/likec4/likec4_views.js"></script>"#));
    assert!(index.contains("<title>Architecture</title>"));

    let about = fs::read_to_string(site.join("about.html")).unwrap();
    assert!(!about.contains("<script"));

    assert!(site.join("assets/likec4/likec4_views.js").is_file());
}

#[test]
fn test_multi_project_site() {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("docs");
    let site = temp.path().join("site");
    write(&docs, "billing/likec4.config.json", r#"{ name: "billing" }"#);
    write(&docs, "shipping/likec4.config.json", r#"{"name": "shipping"}"#);
    write(
        &docs,
        "billing/guide/overview.md",
        "# Billing\n\n```likec4-view\ninvoices\n```\n",
    );
    write(
        &docs,
        "index.md",
        "# Home\n\n```likec4-view project=shipping\nroutes\n```\n\n```likec4-view project=ghost\nnothing\n```\n",
    );

    let generator = FakeGenerator::default();
    let session = BuildSession::configure(&docs, SessionOptions::default());
    let report = SiteBuilder::new(session).build(&site, &generator).unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(
        generator.projects.into_inner(),
        vec![ProjectKey::named("billing"), ProjectKey::named("shipping")]
    );
    assert_eq!(report.generation.skipped, vec![ProjectKey::named("ghost")]);

    let overview = fs::read_to_string(site.join("billing/guide/overview.html")).unwrap();
    assert!(overview.contains(r#"<billing-view view-id="invoices""#));
    assert!(overview.contains(
        r#"<script src="../../assets/likec4/likec4_views_billing.js"></script>"#
    ));

    let index = fs::read_to_string(site.join("index.html")).unwrap();
    assert!(index.contains(r#"<shipping-view view-id="routes""#));
    assert!(index.contains(r#"<ghost-view view-id="nothing""#));
    assert!(index.contains(r#"src="assets/likec4/likec4_views_shipping.js""#));

    assert!(site.join("assets/likec4/likec4_views_billing.js").is_file());
    assert!(site.join("assets/likec4/likec4_views_shipping.js").is_file());
    assert!(!site.join("assets/likec4/likec4_views_ghost.js").exists());
}

#[test]
fn test_underscore_project_element_is_kept_as_markup() {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("docs");
    let site = temp.path().join("site");
    write(&docs, "my_proj/likec4.config.json", r#"{"name": "my_proj"}"#);
    write(
        &docs,
        "my_proj/index.md",
        "# Overview\n\n```likec4-view\nindex\n```\n\n- item\n\n  ```likec4-view project=my_proj\n  nested\n  ```\n",
    );

    let generator = FakeGenerator::default();
    let session = BuildSession::configure(&docs, SessionOptions::default());
    let report = SiteBuilder::new(session).build(&site, &generator).unwrap();

    assert_eq!(report.generation.generated, vec![ProjectKey::named("my_proj")]);

    let page = fs::read_to_string(site.join("my_proj/index.html")).unwrap();
    assert!(page.contains(
        r#"<my_proj-view view-id="index" browser="true" dynamic-variant="diagram"></my_proj-view>"#
    ));
    assert!(page.contains(r#"<my_proj-view view-id="nested""#));
    assert!(!page.contains("&lt;my_proj-view"));
    assert!(!page.contains("c4docs-view:"));
    assert!(page.contains(r#"<script src="../assets/likec4/likec4_views_my_proj.js"></script>"#));
}

#[test]
fn test_missing_docs_dir() {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("missing");

    let session = BuildSession::configure(&docs, SessionOptions::default());
    let result = SiteBuilder::new(session).build(&temp.path().join("site"), &FakeGenerator::default());

    assert!(matches!(result, Err(BuildError::SourceNotFound(path)) if path == docs));
}
