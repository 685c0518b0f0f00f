//! Example: Rendering a tree from a programmatic grammar
//!
//! This example demonstrates the basic workflow of:
//! 1. Building a grammar schema with the attribute builders
//! 2. Building a syntax tree snapshot
//! 3. Rendering the tree through both backends

use weft::{
    Renderer,
    grammar::{Attribute, GrammarSchema, Orientation, TypeDefinition, tags},
    identifier::QualifiedName,
    tree::SyntaxNode,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A miniature configuration language: sections with key/value entries.
    let mut schema = GrammarSchema::new();
    schema.insert(
        "conf",
        "document",
        TypeDefinition::concrete(vec![Attribute::sequence("sections")]),
    );
    schema.insert(
        "conf",
        "section",
        TypeDefinition::concrete(vec![
            Attribute::terminal("["),
            Attribute::property("name"),
            Attribute::terminal("]"),
            Attribute::container(
                Orientation::Vertical,
                vec![Attribute::each("entries")],
            )
            .with_tag(tags::INDENT),
        ]),
    );
    schema.insert(
        "conf",
        "entry",
        TypeDefinition::concrete(vec![
            Attribute::property("key"),
            Attribute::terminal("=").with_tag(tags::SPACE_AROUND),
            Attribute::property("value").with_tag(tags::DOUBLE_QUOTE),
        ]),
    );

    // Build a document with two sections.
    let tree = SyntaxNode::new(QualifiedName::new("conf", "document"))
        .with_child(
            "sections",
            SyntaxNode::new(QualifiedName::new("conf", "section"))
                .with_property("name", "package")
                .with_child("entries", entry("name", "weft"))
                .with_child("entries", entry("edition", "2024")),
        )
        .with_child(
            "sections",
            SyntaxNode::new(QualifiedName::new("conf", "section"))
                .with_property("name", "profile"),
        );

    let renderer = Renderer::new(schema);

    println!("Rendering through the fragment-stream backend...\n");
    let text = renderer.render(&tree)?;
    println!("{text}\n");

    println!("Rendering through the layout-document backend...\n");
    let pretty = renderer.render_pretty(&tree)?;
    println!("{pretty}\n");

    println!("Backends agree: {}", text == pretty);
    Ok(())
}

fn entry(key: &str, value: &str) -> SyntaxNode {
    SyntaxNode::new(QualifiedName::new("conf", "entry"))
        .with_property("key", key)
        .with_property("value", value)
}
