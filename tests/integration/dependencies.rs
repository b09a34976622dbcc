//! Transitive dependency maps built by `get_partial_dependencies`.

use anyhow::Result;
use hbs_partials::get_partial_dependencies;

use super::common::TemplateTree;

#[tokio::test]
async fn templates_without_references_resolve_to_an_empty_map() -> Result<()> {
    let tree = TemplateTree::new();
    let dependencies =
        get_partial_dependencies("<h1>{{title}}</h1>", &tree.config()).await?;
    assert!(dependencies.is_empty());
    Ok(())
}

#[tokio::test]
async fn sibling_references_resolve_against_search_paths() -> Result<()> {
    let tree = TemplateTree::new();
    let one = tree.write("a/one.ext", "first");
    let two = tree.write("a/two.ext", "second");

    let config = tree.config().with_extensions(vec!["ext".to_string()]);
    let dependencies =
        get_partial_dependencies("{{> a/one }} and {{> a/two }}", &config).await?;

    assert_eq!(dependencies.len(), 2);
    assert_eq!(dependencies.get("a/one"), Some(&one));
    assert_eq!(dependencies.get("a/two"), Some(&two));
    Ok(())
}

#[tokio::test]
async fn dependencies_are_discovered_transitively() -> Result<()> {
    let tree = TemplateTree::new();
    let header = tree.write("header.hbs", "{{> logo}}");
    let logo = tree.write("logo.hbs", "<img>");

    let dependencies =
        get_partial_dependencies("{{> header}}", &tree.config()).await?;

    assert_eq!(dependencies.len(), 2);
    assert_eq!(dependencies.get("header"), Some(&header));
    assert_eq!(dependencies.get("logo"), Some(&logo));
    Ok(())
}

#[tokio::test]
async fn override_names_are_excluded_but_their_bodies_are_explored() -> Result<()> {
    let tree = TemplateTree::new();
    let reachable = tree.write("reachable.hbs", "leaf");
    tree.write("direct.hbs", "leaf");

    // `wrapper` only exists as an override; `reachable` is only referenced
    // from the override's body
    let config = tree.config().with_override("wrapper", "{{> reachable}}");
    let dependencies =
        get_partial_dependencies("{{> wrapper}}{{> direct}}", &config).await?;

    assert!(!dependencies.contains_key("wrapper"));
    assert_eq!(dependencies.get("reachable"), Some(&reachable));
    assert!(dependencies.contains_key("direct"));
    Ok(())
}

#[tokio::test]
async fn reference_cycles_terminate_with_each_name_exactly_once() -> Result<()> {
    let tree = TemplateTree::new();
    tree.write("a.hbs", "{{> b}}");
    tree.write("b.hbs", "{{> c}}");
    tree.write("c.hbs", "{{> a}}");

    let dependencies = get_partial_dependencies("{{> a}}", &tree.config()).await?;

    let mut found: Vec<&str> = dependencies.keys().map(String::as_str).collect();
    found.sort_unstable();
    assert_eq!(found, ["a", "b", "c"]);
    Ok(())
}

#[tokio::test]
async fn local_resolution_takes_precedence_over_catalogs() -> Result<()> {
    let tree = TemplateTree::new();
    let local = tree.write("kit/button.hbs", "local button");
    tree.write(
        "catalogs/kit/catalog.toml",
        "[components.button]\nentry = \"index.hbs\"\n",
    );
    tree.write("catalogs/kit/button/index.hbs", "catalog button");

    let dependencies =
        get_partial_dependencies("{{> kit/button}}", &tree.config()).await?;
    assert_eq!(dependencies.get("kit/button"), Some(&local));
    Ok(())
}

#[tokio::test]
async fn catalog_partials_participate_in_the_graph() -> Result<()> {
    let tree = TemplateTree::new();
    tree.write(
        "catalogs/kit/catalog.toml",
        "[components.button]\nentry = \"index.hbs\"\n\n[components.icon]\nentry = \"index.hbs\"\n",
    );
    let button = tree.write("catalogs/kit/button/index.hbs", "{{> kit/icon}}");
    let icon = tree.write("catalogs/kit/icon/index.hbs", "<svg/>");

    let dependencies =
        get_partial_dependencies("{{> kit/button}}", &tree.config()).await?;

    assert_eq!(dependencies.get("kit/button"), Some(&button));
    assert_eq!(dependencies.get("kit/icon"), Some(&icon));
    Ok(())
}

#[tokio::test]
async fn mixed_static_dynamic_and_inline_references() -> Result<()> {
    let tree = TemplateTree::new();
    tree.write("real.hbs", "leaf");

    let source = r#"
        {{#*inline "widget"}}inline body{{/inline}}
        {{> widget}}
        {{> (pick)}}
        {{> real}}
        {{> @partial-block}}
    "#;
    let dependencies = get_partial_dependencies(source, &tree.config()).await?;

    let mut found: Vec<&str> = dependencies.keys().map(String::as_str).collect();
    found.sort_unstable();
    assert_eq!(found, ["real"]);
    Ok(())
}

#[tokio::test]
async fn failures_discard_partial_progress() -> Result<()> {
    let tree = TemplateTree::new();
    tree.write("good.hbs", "fine");

    let err = get_partial_dependencies("{{> good}}{{> missing}}", &tree.config())
        .await
        .expect_err("one unresolvable reference must fail the whole call");
    assert!(err.is_not_found());
    assert!(err.to_string().contains("missing"));
    Ok(())
}
