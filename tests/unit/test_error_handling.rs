use symdoc::{DocumentComposer, RenderConfig, RenderError, SiteRenderer, Symbol, SymbolIndex, SymbolKind};

fn type_with_docs(markup: &str) -> Symbol {
    Symbol::new("T:Acme.Widget", SymbolKind::Type, "Widget")
        .with_anchor("acme.widget")
        .with_docs(markup)
}

#[test]
fn test_missing_reference_target() {
    let index = SymbolIndex::new(vec![type_with_docs(
        r#"<summary>Pairs with <see cref="T:Acme.Sprocket"/>.</summary>"#,
    )]);
    let config = RenderConfig::default();
    let err = SiteRenderer::new(&index, &config).render().unwrap_err();

    match err {
        RenderError::MissingReferenceTarget { id, referenced_from } => {
            assert_eq!(id, "T:Acme.Sprocket");
            assert_eq!(referenced_from, "T:Acme.Widget");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_target_in_see_also_and_exceptions() {
    for markup in [
        r#"<seealso cref="M:Acme.Gone"/>"#,
        r#"<exception cref="T:Acme.GoneException">Never.</exception>"#,
    ] {
        let index = SymbolIndex::new(vec![type_with_docs(markup)]);
        let config = RenderConfig::default();
        let err = SiteRenderer::new(&index, &config).render().unwrap_err();
        assert!(
            matches!(err, RenderError::MissingReferenceTarget { .. }),
            "{markup}: {err}"
        );
    }
}

#[test]
fn test_external_references_are_not_errors() {
    let index = SymbolIndex::new(vec![type_with_docs(
        r#"<summary>Wraps <see cref="T:System.IO.Stream"/> and <see cref="!:Vendor.Thing"/>.</summary>"#,
    )]);
    let config = RenderConfig::default();
    let site = SiteRenderer::new(&index, &config).render().unwrap();

    assert!(site.documents[0]
        .content
        .contains("Wraps System.IO.Stream and Vendor.Thing."));
}

#[test]
fn test_configured_external_namespaces() {
    let index = SymbolIndex::new(vec![type_with_docs(
        r#"<summary>Uses <see cref="T:Vendor.Sdk.Client"/>.</summary>"#,
    )]);

    let strict = RenderConfig::default();
    assert!(SiteRenderer::new(&index, &strict).render().is_err());

    let relaxed = RenderConfig {
        external_namespaces: vec!["System.".to_string(), "Vendor.".to_string()],
        ..RenderConfig::default()
    };
    assert!(SiteRenderer::new(&index, &relaxed).render().is_ok());
}

#[test]
fn test_malformed_markup() {
    for markup in [
        "<summary>Open",
        "<summary>Crossed <b>tags</summary></b>",
        "<summary>Bad &entity; here</summary>",
        "</summary>",
    ] {
        let index = SymbolIndex::new(vec![type_with_docs(markup)]);
        let config = RenderConfig::default();
        let err = SiteRenderer::new(&index, &config).render().unwrap_err();
        assert!(
            matches!(err, RenderError::MalformedMarkup { ref id, .. } if id == "T:Acme.Widget"),
            "{markup}: {err}"
        );
    }
}

#[test]
fn test_symbol_without_anchor_cannot_be_composed() {
    let index = SymbolIndex::new(vec![Symbol::new("T:Loose", SymbolKind::Type, "Loose")]);
    let config = RenderConfig::default();
    let composer = DocumentComposer::new(&index, &config);

    let err = composer.compose(index.get("T:Loose").unwrap()).unwrap_err();
    assert!(matches!(err, RenderError::ConfigurationInconsistency(_)));

    // The batch renderer skips it instead
    let site = SiteRenderer::new(&index, &config).render().unwrap();
    assert!(site.documents.is_empty());
}

#[test]
fn test_unknown_id_lookup() {
    let index = SymbolIndex::new(Vec::new());
    let err = index.get("T:Nothing").unwrap_err();
    assert_eq!(err.to_string(), "symbol not found: T:Nothing");
}
