use pretty_assertions::assert_eq;
use symdoc::parser::types::{ParameterInfo, TypeCategory};
use symdoc::{RenderConfig, SiteRenderer, Symbol, SymbolIndex, SymbolKind};

fn toolkit() -> Vec<Symbol> {
    let mut widget = Symbol::new("T:Acme.Widget", SymbolKind::Type, "Widget")
        .with_full_name("Acme.Widget")
        .with_container("N:Acme")
        .with_anchor("acme.widget")
        .with_declaration("public class Widget : Gadget")
        .with_base_type("T:Acme.Gadget")
        .with_docs(
            r#"<summary>A small widget.</summary>
            <remarks>
              Widgets are <b>not</b> thread safe.
              <para style="info">Prefer <see cref="T:Acme.Gadget"/> for shared use.</para>
            </remarks>"#,
        );
    widget.type_category = Some(TypeCategory::Class);

    let mut gadget = Symbol::new("T:Acme.Gadget", SymbolKind::Type, "Gadget")
        .with_full_name("Acme.Gadget")
        .with_container("N:Acme")
        .with_anchor("acme.gadget")
        .with_declaration("public abstract class Gadget")
        .with_docs("<summary>Base of all gadgets.</summary>");
    gadget.type_category = Some(TypeCategory::Class);

    let mut spin = Symbol::new("M:Acme.Widget.Spin(System.Int32,Acme.Gadget)", SymbolKind::Method, "Spin")
        .with_full_name("Acme.Widget.Spin")
        .with_container("T:Acme.Widget")
        .with_anchor("acme.widget.spin")
        .with_type_name("System.Boolean")
        .with_declaration("public bool Spin(int times, Gadget partner)")
        .with_docs(
            r#"<summary>Spins <paramref name="times"/> times.</summary>
            <param name="times">How often.</param>
            <param name="partner" typeID="T:Acme.Gadget">Who to spin with.</param>
            <returns><see langword="true"/> if it spun.</returns>"#,
        );
    spin.parameters = vec![
        ParameterInfo {
            name: "times".to_string(),
            type_name: Some("System.Int32".to_string()),
            type_id: None,
        },
        ParameterInfo {
            name: "partner".to_string(),
            type_name: Some("Acme.Gadget".to_string()),
            type_id: Some("T:Acme.Gadget".to_string()),
        },
    ];

    vec![
        Symbol::new("N:Acme", SymbolKind::Namespace, "Acme")
            .with_anchor("acme")
            .with_docs("<summary>Things from Acme.</summary>"),
        widget,
        gadget,
        spin,
        Symbol::new("P:Acme.Widget.Speed", SymbolKind::Property, "Speed")
            .with_full_name("Acme.Widget.Speed")
            .with_container("T:Acme.Widget")
            .with_anchor("acme.widget.speed")
            .with_type_name("System.Double")
            .with_declaration("public double Speed { get; }")
            .with_docs("<summary>Current speed.</summary>"),
    ]
}

fn content_of(config: &RenderConfig, path: &str) -> String {
    let index = SymbolIndex::new(toolkit());
    let site = SiteRenderer::new(&index, config).render().unwrap();
    site.documents
        .into_iter()
        .find(|doc| doc.path == path)
        .map(|doc| doc.content)
        .unwrap_or_default()
}

#[test]
fn test_type_document() {
    let content = content_of(&RenderConfig::default(), "acme.widget.md");

    assert_eq!(
        content,
        "# Acme.Widget\n\
         \n\
         Class in [Acme](/acme.md)\n\
         \n\
         Inherits from [`Gadget`](/acme.gadget.md)\n\
         \n\
         A small widget.\n\
         \n\
         ```csharp\n\
         public class Widget : Gadget\n\
         ```\n\
         \n\
         **Remarks**: Widgets are **not** thread safe.\n\
         \n\
         {% hint style=\"info\" %}\n\
         Prefer [Gadget](/acme.gadget.md) for shared use.\n\
         {% endhint %}\n\
         \n\
         ## Methods\n\
         \n\
         |Type|Name|Summary|\n\
         |:---|:---|:---|\n\
         |bool|[Spin](./acme.widget.spin.md)|Spins `times` times.|\n\
         \n\
         ## Properties\n\
         \n\
         |Type|Name|Summary|\n\
         |:---|:---|:---|\n\
         |double|[Speed](./acme.widget.speed.md)|Current speed.|\n"
    );
}

#[test]
fn test_method_document() {
    let content = content_of(&RenderConfig::default(), "acme.widget.spin.md");

    assert!(content.starts_with(
        "# Spin(int times, [Acme.Gadget](/acme.gadget.md) partner)\n\nMethod in [Widget](/acme.widget.md)\n"
    ));
    assert!(content.contains(
        "## Parameters\n\n`int` times - How often.\n\n[Acme.Gadget](/acme.gadget.md) partner - Who to spin with."
    ));
    assert!(content.ends_with("## Returns\n\n`true` if it spun.\n"));
}

#[test]
fn test_namespace_document_lists_classes() {
    let content = content_of(&RenderConfig::default(), "acme.md");

    assert_eq!(
        content,
        "# Acme Namespace\n\
         \n\
         Things from Acme.\n\
         \n\
         ## Classes\n\
         \n\
         |Type|Name|Summary|\n\
         |:---|:---|:---|\n\
         |Class|[Gadget](./acme.gadget.md)|Base of all gadgets.|\n\
         |Class|[Widget](./acme.widget.md)|A small widget.|\n"
    );
}

#[test]
fn test_prefixes_and_stripped_extensions() {
    let config = RenderConfig {
        path_prefix: "/docs/api".to_string(),
        strip_extension_from_links: true,
        ..RenderConfig::default()
    };
    let content = content_of(&config, "acme.widget.md");

    assert!(content.contains("Class in [Acme](/docs/api/acme)"));
    assert!(content.contains("|bool|[Spin](./acme.widget.spin)|"));
}

#[test]
fn test_inline_members() {
    let config = RenderConfig {
        output_member_files: false,
        ..RenderConfig::default()
    };
    let index = SymbolIndex::new(toolkit());
    let site = SiteRenderer::new(&index, &config).render().unwrap();

    let paths: Vec<_> = site.documents.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, vec!["acme.md", "acme.widget.md", "acme.gadget.md"]);

    let widget = &site.documents[1].content;
    assert!(!widget.contains("Class in"));
    assert!(widget.contains("|bool|[Spin](#acme.widget.spin)|"));
    assert!(widget.contains(
        "## <a id='Methods-detail' /> Methods\n\n### <a id='acme.widget.spin'/>bool Spin(int times, [Acme.Gadget](/acme.gadget.md) partner)\n\nSpins `times` times.\n\n#### Parameters"
    ));
    assert!(widget.contains("#### Returns\n\n`true` if it spun.\n\n## <a id='Properties-detail' /> Properties"));
    assert!(widget.ends_with("### <a id='acme.widget.speed'/>double Speed\n\nCurrent speed.\n"));
}

#[test]
fn test_outline_document() {
    let config = RenderConfig {
        summary_indent_level: 4,
        ..RenderConfig::default()
    };
    let index = SymbolIndex::new(toolkit());
    let site = SiteRenderer::new(&index, &config).render().unwrap();

    assert_eq!(
        site.toc.content,
        "    * [Acme Namespace](/acme.md)\n\
         \x20     * [Gadget](/acme.gadget.md)\n\
         \x20     * [Widget](/acme.widget.md)\n\
         \x20       * [Spin](/acme.widget.spin.md)\n\
         \x20       * [Speed](/acme.widget.speed.md)\n"
    );
}
