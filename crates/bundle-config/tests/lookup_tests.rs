//! The read-only lookup surface over the aggregated configuration.

use bundle_config::{Configs, Error};
use bundle_test_utils::{TestExtension, TestWorld};
use pretty_assertions::assert_eq;

fn world_with_blog(name: &str) -> TestWorld {
    let mut world = TestWorld::new();
    world.add(
        TestExtension::new(name)
            .config_file(
                "jarves.xml",
                r#"<bundle>
                     <objects><object id="Post" label="Posts"/></objects>
                     <content-types><content-type id="text"/></content-types>
                     <field-types><field-type id="textarea"/></field-types>
                     <themes><theme id="default"/></themes>
                   </bundle>"#,
            )
            .manifest(
                r#"
[extension]
name = "blog"
version = "1.0.0"

[dependencies]
comments = "*"
"#,
            ),
    );
    world
}

#[test]
fn config_lookup_accepts_bare_and_suffixed_names() {
    for registered in ["blog", "blogbundle", "BlogBundle"] {
        let world = world_with_blog(registered);
        let mut configs = Configs::new(world.registry());
        configs.load_bundles(&[registered]).unwrap();

        for query in ["blog", "Blog", "BlogBundle", "blogbundle"] {
            assert!(
                configs.config(query).is_some(),
                "registered {registered:?}, query {query:?}"
            );
        }
    }
}

#[test]
fn compound_object_lookup() {
    let world = world_with_blog("blog");
    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["blog"]).unwrap();
    configs.boot().unwrap();

    let post = configs.object("blog/post").unwrap().unwrap();
    assert_eq!(post.key, "blog/post");
    assert_eq!(post.label.as_deref(), Some("Posts"));

    // accepted separator spellings
    assert!(configs.object("Blog:Post").unwrap().is_some());

    // loaded extension, unknown object
    assert!(configs.object("blog/missing").unwrap().is_none());

    // key without a separator resolves to nothing
    assert!(configs.object("post").unwrap().is_none());

    // unknown extension segment is a typed not-found error
    let err = configs.object("shop/product").unwrap_err();
    assert!(matches!(err, Error::ExtensionNotFound(_)), "got {err:?}");
}

#[test]
fn flattened_lookups_and_first_match_wins() {
    let mut world = TestWorld::new();
    world.add(TestExtension::new("blog").config_file(
        "jarves.xml",
        r#"<bundle>
             <objects><object id="Post"/></objects>
             <content-types><content-type id="text" label="blog text"/></content-types>
             <field-types><field-type id="textarea" label="blog textarea"/></field-types>
           </bundle>"#,
    ));
    world.add(TestExtension::new("shop").config_file(
        "jarves.xml",
        r#"<bundle>
             <objects><object id="Product"/></objects>
             <content-types><content-type id="text" label="shop text"/></content-types>
             <field-types><field-type id="price"/></field-types>
           </bundle>"#,
    ));

    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["blog", "shop"]).unwrap();

    assert_eq!(configs.objects().len(), 2);
    assert_eq!(configs.content_types().len(), 2);
    assert_eq!(configs.field_types().len(), 2);

    // both extensions declare content type "text"; the first loaded wins
    assert_eq!(
        configs.content_type("text").unwrap().label.as_deref(),
        Some("blog text")
    );
    assert!(configs.content_type("video").is_none());
    assert!(configs.field_type("price").is_some());
}

#[test]
fn first_match_follows_request_order_not_alphabetical_order() {
    let mut world = TestWorld::new();
    world.add(TestExtension::new("zeta").config_file(
        "jarves.xml",
        r#"<bundle>
             <content-types><content-type id="ct" label="from-zeta"/></content-types>
           </bundle>"#,
    ));
    world.add(TestExtension::new("alpha").config_file(
        "jarves.xml",
        r#"<bundle>
             <content-types><content-type id="ct" label="from-alpha"/></content-types>
           </bundle>"#,
    ));

    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["zeta", "alpha"]).unwrap();

    // zeta was requested first, so its declaration wins the scan
    assert_eq!(
        configs.content_type("ct").unwrap().label.as_deref(),
        Some("from-zeta")
    );
    let names: Vec<&str> = configs.iter().map(|config| config.bundle_name()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

#[test]
fn theme_lookup_scans_all_extensions() {
    let world = world_with_blog("blog");
    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["blog"]).unwrap();

    assert!(configs.theme("default").is_some());
    assert!(configs.theme("missing").is_none());
}

#[test]
fn to_value_annotates_each_extension_with_its_manifest() {
    let world = world_with_blog("blog");
    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["blog"]).unwrap();
    configs.boot().unwrap();

    let value = configs.to_value();
    let blog = &value["blog"];
    assert_eq!(blog["name"], "blog");
    assert_eq!(blog["objects"][0]["id"], "Post");
    assert_eq!(blog["manifest"]["extension"]["version"], "1.0.0");
    assert_eq!(blog["manifest"]["dependencies"]["comments"], "*");
}

#[test]
fn to_value_without_manifest_has_empty_metadata_block() {
    let mut world = TestWorld::new();
    world.add(TestExtension::new("blog").config_file("jarves.xml", "<bundle/>"));

    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["blog"]).unwrap();

    let value = configs.to_value();
    assert_eq!(value["blog"]["manifest"], serde_json::json!({}));
}

#[test]
fn config_hash_resolves_through_the_registry() {
    let world = world_with_blog("blog");
    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["blog"]).unwrap();

    let hash = configs.config_hash("BlogBundle").unwrap();
    assert_eq!(hash, configs.config_hash("blog").unwrap());
    assert!(configs.config_hash("shop").is_err());
}
