//! Registering templates and catalogs into a Handlebars registry.

use anyhow::Result;
use handlebars::Handlebars;
use hbs_partials::{RegisterOptions, register_catalog, register_partial, resolve_catalog};
use serde_json::json;

use super::common::TemplateTree;

fn options_for(tree: &TemplateTree) -> RegisterOptions {
    RegisterOptions {
        dependency_config: tree.config(),
        ..RegisterOptions::default()
    }
}

#[tokio::test]
async fn registers_the_root_and_every_dependency() -> Result<()> {
    let tree = TemplateTree::new();
    tree.write("header.hbs", "{{> logo}}HEADER");
    tree.write("logo.hbs", "LOGO ");

    let mut registry = Handlebars::new();
    register_partial(
        &mut registry,
        "page",
        "{{> header}} body",
        &options_for(&tree),
    )
    .await?;

    assert!(registry.get_template("page").is_some());
    assert!(registry.get_template("header").is_some());
    assert!(registry.get_template("logo").is_some());
    assert_eq!(registry.render("page", &json!({}))?, "LOGO HEADER body");
    Ok(())
}

#[tokio::test]
async fn already_registered_names_are_left_untouched() -> Result<()> {
    let tree = TemplateTree::new();
    tree.write("header.hbs", "FROM DISK");

    let mut registry = Handlebars::new();
    registry.register_template_string("header", "PREREGISTERED")?;
    register_partial(&mut registry, "page", "{{> header}}", &options_for(&tree)).await?;

    assert_eq!(registry.render("page", &json!({}))?, "PREREGISTERED");
    Ok(())
}

#[tokio::test]
async fn transitive_registration_can_be_disabled() -> Result<()> {
    let tree = TemplateTree::new();
    tree.write("header.hbs", "HEADER");

    let mut registry = Handlebars::new();
    let options = RegisterOptions {
        register_transitive_dependencies: false,
        dependency_config: tree.config(),
    };
    register_partial(&mut registry, "page", "{{> header}}", &options).await?;

    assert!(registry.get_template("page").is_some());
    assert!(registry.get_template("header").is_none());
    Ok(())
}

#[tokio::test]
async fn override_sources_are_not_registered_from_disk() -> Result<()> {
    let tree = TemplateTree::new();
    tree.write("leaf.hbs", "LEAF");

    let mut registry = Handlebars::new();
    let mut options = options_for(&tree);
    options.dependency_config = options
        .dependency_config
        .with_override("injected", "{{> leaf}}");
    register_partial(&mut registry, "page", "{{> injected}}", &options).await?;

    // the override's body was explored, so `leaf` is registered, but the
    // override itself has no file to read and is skipped
    assert!(registry.get_template("leaf").is_some());
    assert!(registry.get_template("injected").is_none());
    Ok(())
}

#[tokio::test]
async fn catalogs_register_components_with_entry_files() -> Result<()> {
    let tree = TemplateTree::new();
    tree.write(
        "catalogs/kit/catalog.toml",
        concat!(
            "[components.button]\nentry = \"index.hbs\"\n\n",
            "[components.icon]\nentry = \"index.hbs\"\n\n",
            "[components.styles-only]\n",
        ),
    );
    tree.write("catalogs/kit/button/index.hbs", "{{> kit/icon}}BUTTON");
    tree.write("catalogs/kit/icon/index.hbs", "ICON ");

    let config = tree.config();
    let catalog = resolve_catalog("kit", &config)
        .await?
        .expect("catalog should resolve");

    // default options know nothing about this tree; the catalog's own
    // parent directory is enough to resolve cross-component references
    let mut registry = Handlebars::new();
    register_catalog(&mut registry, &catalog, &RegisterOptions::default()).await?;

    assert!(registry.get_template("kit/button").is_some());
    assert!(registry.get_template("kit/icon").is_some());
    assert!(registry.get_template("kit/styles-only").is_none());
    assert_eq!(registry.render("kit/button", &json!({}))?, "ICON BUTTON");
    Ok(())
}
