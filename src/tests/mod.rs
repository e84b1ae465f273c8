#[cfg(test)]
mod scenario_tests {
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    use crate::parser::types::{Accessibility, Document, Symbol, SymbolKind};
    use crate::{RenderConfig, RenderError, RenderedSite, SiteRenderer, SymbolIndex};

    fn render(symbols: Vec<Symbol>, config: &RenderConfig) -> RenderedSite {
        let index = SymbolIndex::new(symbols);
        SiteRenderer::new(&index, config).render().unwrap()
    }

    fn document<'a>(site: &'a RenderedSite, path: &str) -> &'a Document {
        site.documents
            .iter()
            .find(|doc| doc.path == path)
            .unwrap_or_else(|| panic!("no document at {}", path))
    }

    fn foo_graph() -> Vec<Symbol> {
        vec![
            Symbol::new("T:Foo", SymbolKind::Type, "Foo")
                .with_anchor("foo")
                .with_docs("<summary>The foo.</summary>"),
            Symbol::new("M:Foo.Bar()", SymbolKind::Method, "Bar")
                .with_container("T:Foo")
                .with_anchor("foo.bar")
                .with_docs("<summary>Public bar.</summary>"),
            Symbol::new("M:Foo.Baz()", SymbolKind::Method, "Baz")
                .with_container("T:Foo")
                .with_anchor("foo.baz")
                .with_accessibility(Accessibility::Private)
                .with_docs("<summary>Private baz.</summary>"),
        ]
    }

    #[test]
    fn test_private_members_are_invisible() {
        let site = render(foo_graph(), &RenderConfig::default());

        let foo = document(&site, "foo.md");
        assert!(foo.content.contains("|[Bar](./foo.bar.md)|Public bar.|"));
        assert!(!foo.content.contains("Baz"));
        assert!(site.documents.iter().all(|doc| doc.path != "foo.baz.md"));
        assert!(site.documents.iter().all(|doc| !doc.content.contains("foo.baz")));
    }

    #[test]
    fn test_anchorless_targets_are_never_links() {
        let symbols = vec![
            Symbol::new("N:Acme", SymbolKind::Namespace, "Acme").with_anchor("acme"),
            Symbol::new("T:Acme.Ghost", SymbolKind::Type, "Ghost")
                .with_full_name("Acme.Ghost")
                .with_container("N:Acme"),
            Symbol::new("T:Acme.Host", SymbolKind::Type, "Host")
                .with_container("N:Acme")
                .with_anchor("acme.host")
                .with_base_type("T:Acme.Ghost")
                .with_docs(
                    r#"<summary>Haunted by <see cref="T:Acme.Ghost"/>.</summary><seealso cref="T:Acme.Ghost"/>"#,
                ),
        ];
        let site = render(symbols, &RenderConfig::default());

        for doc in &site.documents {
            assert!(!doc.content.contains("](/acme.ghost"), "{}", doc.content);
            assert!(!doc.content.contains("(./acme.ghost"), "{}", doc.content);
        }
        let host = document(&site, "acme.host.md");
        assert!(host.content.contains("Haunted by Ghost."));
        assert!(host.content.contains("Inherits from Ghost"));
        assert!(host.content.contains("* Acme.Ghost"));
        assert!(site.toc.content.contains("  * Ghost\n"));
    }

    #[test]
    fn test_reserved_characters_escaped_once() {
        let symbols = vec![Symbol::new("T:Box", SymbolKind::Type, "Box")
            .with_anchor("box")
            .with_docs(r"<summary>Holds a[i] \ (x) #1 `t` &lt;T&gt;</summary>")];
        let site = render(symbols, &RenderConfig::default());

        let content = &document(&site, "box.md").content;
        assert!(content.contains(r"Holds a\[i\] \\ \(x\) \#1 \`t\` \<T\>"));
        assert!(!content.contains(r"\\["));
    }

    #[test]
    fn test_three_document_round_trip() {
        let symbols = vec![
            Symbol::new("N:Acme", SymbolKind::Namespace, "Acme")
                .with_anchor("acme")
                .with_docs("<summary>Namespace summary.</summary>"),
            Symbol::new("T:Acme.Widget", SymbolKind::Type, "Widget")
                .with_container("N:Acme")
                .with_anchor("acme.widget")
                .with_docs("<summary>Type summary.</summary>"),
            Symbol::new("M:Acme.Widget.Spin", SymbolKind::Method, "Spin")
                .with_container("T:Acme.Widget")
                .with_anchor("acme.widget.spin")
                .with_docs("<summary>Method summary.</summary>"),
        ];
        let site = render(symbols, &RenderConfig::default());

        assert_eq!(site.documents.len(), 3);
        let paths: BTreeSet<_> = site.documents.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths.len(), 3);

        // A document's own summary is body text; a child's only appears in a
        // table row, and a parent's never appears
        let namespace = document(&site, "acme.md");
        assert!(namespace.content.contains("\n\nNamespace summary.\n"));
        assert!(!namespace.content.contains("Method summary."));

        let widget = document(&site, "acme.widget.md");
        assert!(widget.content.contains("\n\nType summary.\n"));
        assert!(!widget.content.contains("Namespace summary."));

        let spin = document(&site, "acme.widget.spin.md");
        assert!(spin.content.contains("\n\nMethod summary.\n"));
        assert!(!spin.content.contains("Type summary."));
        assert!(!spin.content.contains("Namespace summary."));
    }

    #[test]
    fn test_grouping_is_deterministic() {
        let symbols = vec![
            Symbol::new("T:Acme.Widget", SymbolKind::Type, "Widget").with_anchor("acme.widget"),
            Symbol::new("P:Acme.Widget.Size", SymbolKind::Property, "Size")
                .with_container("T:Acme.Widget")
                .with_anchor("acme.widget.size"),
            Symbol::new("M:Acme.Widget.Stop", SymbolKind::Method, "Stop")
                .with_container("T:Acme.Widget")
                .with_anchor("acme.widget.stop"),
            Symbol::new("M:Acme.Widget.Spin", SymbolKind::Method, "Spin")
                .with_container("T:Acme.Widget")
                .with_anchor("acme.widget.spin"),
        ];
        let site = render(symbols, &RenderConfig::default());
        let content = &document(&site, "acme.widget.md").content;

        let methods = content.find("## Methods").unwrap();
        let properties = content.find("## Properties").unwrap();
        let spin = content.find("[Spin]").unwrap();
        let stop = content.find("[Stop]").unwrap();
        let size = content.find("[Size]").unwrap();

        assert!(methods < spin && spin < stop && stop < properties);
        assert!(properties < size);
    }

    #[test]
    fn test_empty_returns_is_suppressed() {
        let symbols = vec![
            Symbol::new("M:Acme.Run", SymbolKind::Method, "Run")
                .with_anchor("acme.run")
                .with_docs("<summary>Runs.</summary><returns></returns>"),
            Symbol::new("M:Acme.Walk", SymbolKind::Method, "Walk")
                .with_anchor("acme.walk")
                .with_docs("<summary>Walks.</summary><returns>\n   </returns>"),
        ];
        let site = render(symbols, &RenderConfig::default());

        for doc in &site.documents {
            assert!(!doc.content.contains("Returns"), "{}", doc.content);
        }
    }

    #[test]
    fn test_see_also_summary() {
        let symbols = vec![
            Symbol::new("T:Widget", SymbolKind::Type, "Widget")
                .with_anchor("widget")
                .with_docs("<summary>\n    A small\n    widget.\n  </summary>"),
            Symbol::new("T:Gear", SymbolKind::Type, "Gear")
                .with_anchor("gear")
                .with_docs(r#"<summary>A gear.</summary><seealso cref="T:Widget"/>"#),
        ];
        let site = render(symbols, &RenderConfig::default());

        assert!(document(&site, "gear.md")
            .content
            .contains("## See Also\n\n* [Widget](/widget.md): A small widget.\n"));
    }

    #[test]
    fn test_outline_children_ascend_after_descending_push() {
        // Children are sorted by descending id before being pushed on the
        // stack, so they pop out ascending regardless of graph order
        let symbols = vec![
            Symbol::new("N:Zoo", SymbolKind::Namespace, "Zoo").with_anchor("zoo"),
            Symbol::new("T:Zoo.Zebra", SymbolKind::Type, "Zebra")
                .with_container("N:Zoo")
                .with_anchor("zoo.zebra"),
            Symbol::new("T:Zoo.Ape", SymbolKind::Type, "Ape")
                .with_container("N:Zoo")
                .with_anchor("zoo.ape"),
        ];
        let site = render(symbols, &RenderConfig::default());

        assert_eq!(
            site.toc.content,
            "* [Zoo Namespace](/zoo.md)\n  * [Ape](/zoo.ape.md)\n  * [Zebra](/zoo.zebra.md)\n"
        );
    }

    #[test]
    fn test_front_matter_and_manifest_agree() {
        let config = RenderConfig {
            output_front_matter: true,
            slug_prefix: "/reference".to_string(),
            manifest_group: "Reference".to_string(),
            ..RenderConfig::default()
        };
        let site = render(foo_graph(), &config);

        let foo = document(&site, "foo.md");
        assert!(foo.content.starts_with("---\ntitle: Foo\nslug: /reference/foo\n---\n"));
        assert!(!foo.content.contains("\n# "));

        let section = &site.manifest.navigation[0];
        assert_eq!(section.group, "Reference");
        let pages: Vec<_> = section
            .pages
            .iter()
            .map(|p| (p.title.as_str(), p.path.as_str()))
            .collect();
        assert_eq!(pages, vec![("Foo", "foo.md"), ("Bar()", "foo.bar.md")]);
    }

    #[test]
    fn test_broken_markup_aborts_render() {
        let mut symbols = foo_graph();
        symbols[1].documentation_markup = "<summary>Public <b>bar.</summary>".to_string();
        let index = SymbolIndex::new(symbols);
        let config = RenderConfig::default();

        let err = SiteRenderer::new(&index, &config).render().unwrap_err();
        assert!(matches!(err, RenderError::MalformedMarkup { ref id, .. } if id == "M:Foo.Bar()"));
    }
}
