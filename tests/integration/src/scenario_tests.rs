//! End-to-end aggregation scenarios over realistic extension trees.

use std::path::Path;

use bundle_config::{
    BootContext, BundleConfig, Configs, Element, ExtensionConfig, ImportError, ObjectDefinition,
    element::parse_document,
};
use bundle_test_utils::{TestExtension, TestWorld};
use pretty_assertions::assert_eq;

fn blog_and_comments() -> TestWorld {
    let mut world = TestWorld::new();
    world.add(
        TestExtension::new("blog")
            .config_file(
                "jarves.xml",
                r#"<bundle>
                     <objects>
                       <object id="Post" label="Posts">
                         <field id="title" type="text"/>
                       </object>
                     </objects>
                     <content-types><content-type id="text" label="Text"/></content-types>
                     <themes><theme id="default" label="Default"/></themes>
                   </bundle>"#,
            )
            .manifest(
                r#"
[extension]
name = "blog"
version = "2.1.0"
description = "Blog posts"
"#,
            ),
    );
    world.add(
        TestExtension::new("comments")
            .config_file(
                "jarves.xml",
                r#"<bundle priority="10">
                     <objects>
                       <object id="Comment" label="Comments">
                         <field id="body" type="text"/>
                         <field id="post" type="object" object="blog/post"/>
                       </object>
                     </objects>
                   </bundle>"#,
            )
            .manifest(
                r#"
[extension]
name = "comments"
version = "1.0.0"

[dependencies]
blog = ">=2.0"
"#,
            ),
    );
    world
}

#[test]
fn blog_and_comments_aggregate_and_boot() {
    let world = blog_and_comments();
    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["blog", "comments"]).unwrap();
    configs.boot().unwrap();

    let post = configs.object("blog/post").unwrap().unwrap();
    assert_eq!(post.key, "blog/post");

    let comment = configs.object("comments/comment").unwrap().unwrap();
    assert_eq!(comment.key, "comments/comment");
    assert_eq!(comment.fields[1].target_object.as_deref(), Some("blog/post"));

    assert_eq!(configs.objects().len(), 2);
    assert!(configs.theme("default").is_some());
    assert!(configs.content_type("text").is_some());
}

#[test]
fn aggregate_serialization_carries_package_metadata() {
    let world = blog_and_comments();
    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["blog", "comments"]).unwrap();
    configs.boot().unwrap();

    let value = configs.to_value();
    assert_eq!(value["blog"]["manifest"]["extension"]["version"], "2.1.0");
    assert_eq!(
        value["comments"]["manifest"]["dependencies"]["blog"],
        ">=2.0"
    );
    assert_eq!(value["comments"]["objects"][0]["id"], "Comment");
}

/// Blog variant whose objects only become visible after its own boot ran,
/// forcing the cross-extension reference in comments to miss on pass 0.
struct LateBlog {
    objects: Vec<ObjectDefinition>,
    revealed: bool,
}

impl LateBlog {
    fn new() -> Self {
        let element = parse_document(r#"<object id="Post"/>"#).unwrap();
        Self {
            objects: vec![ObjectDefinition::from_element("blog", &element).unwrap()],
            revealed: false,
        }
    }
}

impl ExtensionConfig for LateBlog {
    fn bundle_name(&self) -> &str {
        "blog"
    }

    fn import(&mut self, _element: &Element, _file: &Path) -> Result<(), ImportError> {
        Ok(())
    }

    fn boot(&mut self, _ctx: &mut BootContext) {
        self.revealed = true;
    }

    fn object(&self, name: &str) -> Option<&ObjectDefinition> {
        self.objects()
            .iter()
            .find(|object| object.id.eq_ignore_ascii_case(name))
    }

    fn objects(&self) -> &[ObjectDefinition] {
        if self.revealed { &self.objects } else { &[] }
    }
}

#[test]
fn late_contribution_resolves_on_second_sweep() {
    let mut comments = BundleConfig::new("comments", None);
    let fragment = parse_document(
        r#"<bundle><objects>
             <object id="Comment">
               <field id="post" type="object" object="blog/post"/>
             </object>
           </objects></bundle>"#,
    )
    .unwrap();
    comments
        .import(&fragment, Path::new("jarves.xml"))
        .unwrap();

    let mut configs = Configs::new(TestWorld::new().registry());
    configs.add_config(Box::new(LateBlog::new()));
    configs.add_config(Box::new(comments));

    // pass 0: blog/post not yet visible, comments signals a reboot;
    // pass 1: the reference resolves and the fixed point terminates
    configs.boot().unwrap();

    assert!(configs.object("blog/post").unwrap().is_some());
    assert!(configs.object("comments/comment").unwrap().is_some());
}

#[test]
fn priorities_across_extensions_shape_the_final_catalog() {
    let mut world = TestWorld::new();
    // shop injects a field into blog's Post at a higher priority
    world.add(TestExtension::new("blog").config_file(
        "jarves.xml",
        r#"<bundle>
             <objects><object id="Post"><field id="title"/></object></objects>
           </bundle>"#,
    ));
    world.add(TestExtension::new("shop").config_file(
        "jarves.xml",
        r#"<config>
             <bundle><objects><object id="Product"/></objects></bundle>
             <bundle name="blog" priority="20">
               <objects><object id="Post"><field id="related_product" type="object" object="shop/product"/></object></objects>
             </bundle>
           </config>"#,
    ));

    let mut configs = Configs::new(world.registry());
    configs.load_bundles(&["blog", "shop"]).unwrap();
    configs.boot().unwrap();

    let post = configs.object("blog/post").unwrap().unwrap();
    let field_ids: Vec<&str> = post.fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(field_ids, vec!["title", "related_product"]);
}
