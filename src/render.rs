//! Menu rendering.
//! Builds a typed node tree for a `MenuDocument` with the same structure as
//! the statically authored menu (filter controls plus category sections), then
//! mounts it into a `Document`. Text is kept raw in the tree; the document
//! serializer does the escaping.

use crate::dom::{Document, NodeId};
use crate::model::{ALL_CATEGORIES, Category, Item, MenuDocument};

pub const NO_DATA_MESSAGE: &str = "No menu data available.";
pub const ALL_LABEL: &str = "All";

// Class names shared with the static markup.
pub const LAYOUT_CLASS: &str = "menu-layout";
pub const SIDEBAR_CLASS: &str = "menu-sidebar";
pub const FILTERS_CLASS: &str = "menu-filters";
pub const FILTER_BUTTON_CLASS: &str = "filter-btn";
pub const CONTENT_CLASS: &str = "menu-content";
pub const CATEGORY_CLASS: &str = "menu-category";
pub const NO_DATA_CLASS: &str = "no-data";
pub const CATEGORY_ATTR: &str = "data-category";

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn into_node(self) -> Node {
        Node::Element(self)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        el.into_node()
    }
}

impl Node {
    /// Creates the node (and its subtree) in `doc` and appends it to `parent`.
    pub fn mount(&self, doc: &mut Document, parent: NodeId) -> NodeId {
        let id = match self {
            Node::Text(text) => doc.create_text(text),
            Node::Element(el) => {
                let id = doc.create_element(el.tag);
                for class in &el.classes {
                    doc.add_class(id, class);
                }
                for (name, value) in &el.attrs {
                    doc.set_attr(id, name, value);
                }
                for child in &el.children {
                    child.mount(doc, id);
                }
                id
            }
        };
        doc.append_child(parent, id);
        id
    }
}

/// Renders the full menu: sidebar filters and category sections, or the
/// no-data message when there are no categories.
pub fn render_menu(menu: &MenuDocument) -> Node {
    if menu.is_empty() {
        return Element::new("p").class(NO_DATA_CLASS).text(NO_DATA_MESSAGE).into();
    }

    Element::new("div")
        .class(LAYOUT_CLASS)
        .child(render_sidebar(menu))
        .child(
            Element::new("div")
                .class(CONTENT_CLASS)
                .children(menu.categories.iter().map(render_category)),
        )
        .into()
}

fn render_sidebar(menu: &MenuDocument) -> Element {
    let all = Element::new("button")
        .class(FILTER_BUTTON_CLASS)
        .class("active")
        .attr("type", "button")
        .attr(CATEGORY_ATTR, ALL_CATEGORIES)
        .text(ALL_LABEL);

    let buttons = menu.categories.iter().map(|category| -> Node {
        Element::new("button")
            .class(FILTER_BUTTON_CLASS)
            .attr("type", "button")
            .attr(CATEGORY_ATTR, category.id.as_str())
            .text(category.name.as_str())
            .into()
    });

    Element::new("aside").class(SIDEBAR_CLASS).child(
        Element::new("nav")
            .class(FILTERS_CLASS)
            .child(all)
            .children(buttons),
    )
}

fn render_category(category: &Category) -> Node {
    let mut section = Element::new("section")
        .class(CATEGORY_CLASS)
        .attr("id", format!("category-{}", category.id))
        .attr(CATEGORY_ATTR, category.id.as_str())
        .child(
            Element::new("h2")
                .class("category-title")
                .text(category.name.as_str()),
        );

    if let Some(description) = &category.description {
        section = section.child(
            Element::new("p")
                .class("category-description")
                .text(description.as_str()),
        );
    }

    section
        .child(
            Element::new("ul")
                .class("menu-items")
                .children(category.items.iter().map(render_item)),
        )
        .into()
}

fn render_item(item: &Item) -> Node {
    let header = Element::new("div")
        .class("item-header")
        .child(Element::new("span").class("item-name").text(item.name.as_str()))
        .child(
            Element::new("span")
                .class("item-price")
                .text(item.display_price()),
        );

    let mut li = Element::new("li").class("menu-item").child(header);
    if let Some(description) = &item.description {
        li = li.child(
            Element::new("p")
                .class("item-description")
                .text(description.as_str()),
        );
    }
    li.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_categories() -> MenuDocument {
        serde_json::from_str(
            r#"{"categories": [
                {"id": "starters", "name": "<b>Starters</b>", "items": [
                    {"name": "Fish & Chips", "price": 12.5, "description": "With \"tartare\""}
                ]},
                {"id": "drinks", "name": "Drinks", "description": "Cold", "items": [
                    {"name": "Lemonade", "price": 3}
                ]}
            ]}"#,
        )
        .unwrap()
    }

    fn mounted(menu: &MenuDocument) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let node = render_menu(menu).mount(&mut doc, root);
        (doc, node)
    }

    #[test]
    fn test_one_visible_section_per_category() {
        let (doc, node) = mounted(&two_categories());
        let sections = doc.find_by_class(node, CATEGORY_CLASS);
        assert_eq!(sections.len(), 2);
        assert!(sections.iter().all(|s| !doc.has_class(*s, "hidden")));
        assert_eq!(doc.attr(sections[0], CATEGORY_ATTR), Some("starters"));
        assert_eq!(doc.attr(sections[1], "id"), Some("category-drinks"));
    }

    #[test]
    fn test_filter_buttons_start_with_active_all() {
        let (doc, node) = mounted(&two_categories());
        let buttons = doc.find_by_class(node, FILTER_BUTTON_CLASS);
        let keys: Vec<_> = buttons
            .iter()
            .map(|b| doc.attr(*b, CATEGORY_ATTR).unwrap())
            .collect();
        assert_eq!(keys, vec!["all", "starters", "drinks"]);
        assert!(doc.has_class(buttons[0], "active"));
        assert!(!doc.has_class(buttons[1], "active"));
    }

    #[test]
    fn test_prices_have_two_decimals() {
        let (doc, node) = mounted(&two_categories());
        let prices: Vec<_> = doc
            .find_by_class(node, "item-price")
            .into_iter()
            .map(|p| doc.text_content(p))
            .collect();
        assert_eq!(prices, vec!["12.50", "3.00"]);
    }

    #[test]
    fn test_markup_in_names_is_escaped() {
        let (doc, node) = mounted(&two_categories());
        let html = doc.to_html(node);
        assert!(html.contains("&lt;b&gt;Starters&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("Fish &amp; Chips"));
        assert!(html.contains("With \"tartare\""));
    }

    #[test]
    fn test_optional_descriptions() {
        let (doc, node) = mounted(&two_categories());
        let descriptions = doc.find_by_class(node, "category-description");
        assert_eq!(descriptions.len(), 1);
        assert_eq!(doc.text_content(descriptions[0]), "Cold");
        assert_eq!(doc.find_by_class(node, "item-description").len(), 1);
    }

    #[test]
    fn test_empty_menu_renders_no_data() {
        let (doc, node) = mounted(&MenuDocument::default());
        assert!(doc.has_class(node, NO_DATA_CLASS));
        assert_eq!(doc.text_content(node), NO_DATA_MESSAGE);
        assert!(doc.find_by_class(node, CATEGORY_CLASS).is_empty());
    }
}
