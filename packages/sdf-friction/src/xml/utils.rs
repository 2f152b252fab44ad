//! Lookup helpers for navigating the owned element tree.

use super::tree::{Element, Node};

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use sdf_friction::xml::{find_child, Element};
///
/// let root = Element::new("root")
///     .with_child(Element::new("child1"))
///     .with_child(Element::new("child2"));
///
/// assert!(find_child(&root, "child1").is_some());
/// assert!(find_child(&root, "missing").is_none());
/// ```
pub fn find_child<'a>(element: &'a Element, tag: &str) -> Option<&'a Element> {
    element.elements().find(|child| child.name == tag)
}

/// Find all child elements with the given tag name, in document order.
pub fn find_children<'a>(element: &'a Element, tag: &'a str) -> impl Iterator<Item = &'a Element> {
    element.elements().filter(move |child| child.name == tag)
}

/// Mutable variant of [`find_children`].
pub fn find_children_mut<'a>(
    element: &'a mut Element,
    tag: &'a str,
) -> impl Iterator<Item = &'a mut Element> {
    element.elements_mut().filter(move |child| child.name == tag)
}

/// Return the first child named `tag`, appending a new one at the end if absent.
///
/// # Examples
/// ```
/// use sdf_friction::xml::{ensure_child, Element};
///
/// let mut collision = Element::new("collision");
/// ensure_child(&mut collision, "surface");
/// ensure_child(&mut collision, "surface");
/// assert_eq!(collision.elements().count(), 1);
/// ```
pub fn ensure_child<'a>(element: &'a mut Element, tag: &str) -> &'a mut Element {
    let index = element
        .children
        .iter()
        .position(|child| matches!(child, Node::Element(e) if e.name == tag));

    match index {
        Some(index) => match &mut element.children[index] {
            Node::Element(child) => child,
            _ => unreachable!("position matched an element"),
        },
        None => element.append_child(tag),
    }
}

/// Find a descendant element matching a slash-separated path of tag names.
///
/// # Examples
/// ```
/// use sdf_friction::xml::{find_by_path, Element};
///
/// let collision = Element::new("collision").with_child(
///     Element::new("surface").with_child(Element::new("friction")),
/// );
/// assert!(find_by_path(&collision, "surface/friction").is_some());
/// assert!(find_by_path(&collision, "surface/contact").is_none());
/// ```
pub fn find_by_path<'a>(element: &'a Element, path: &str) -> Option<&'a Element> {
    path.split('/')
        .try_fold(element, |current, part| find_child(current, part))
}

/// Get the trimmed text content of an element, or an empty string.
pub fn get_text(element: &Element) -> String {
    element
        .text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    fn parse(xml: &str) -> Element {
        XmlDocument::parse(xml).unwrap().root
    }

    #[test]
    fn test_find_child() {
        let root = parse("<root><a/><b/><c/></root>");
        assert!(find_child(&root, "a").is_some());
        assert!(find_child(&root, "c").is_some());
        assert!(find_child(&root, "d").is_none());
    }

    #[test]
    fn test_find_children_in_order() {
        let root = parse(r#"<root><item n="1"/><other/><item n="2"/></root>"#);
        let items: Vec<_> = find_children(&root, "item")
            .filter_map(|e| e.attribute("n"))
            .collect();
        assert_eq!(items, vec!["1", "2"]);
    }

    #[test]
    fn test_find_by_path() {
        let root = parse("<root><l1><l2><target>found</target></l2></l1></root>");
        let target = find_by_path(&root, "l1/l2/target").unwrap();
        assert_eq!(get_text(target), "found");
        assert!(find_by_path(&root, "l1/missing").is_none());
    }

    #[test]
    fn test_ensure_child_reuses_first_match() {
        let mut root = parse(r#"<root><ode tag="first"/><ode tag="second"/></root>"#);
        let ode = ensure_child(&mut root, "ode");
        assert_eq!(ode.attribute("tag"), Some("first"));
        assert_eq!(root.elements().count(), 2);
    }

    #[test]
    fn test_ensure_child_appends_after_siblings() {
        let mut root = parse("<root><torsional/><bounce/></root>");
        ensure_child(&mut root, "ode");
        let names: Vec<_> = root.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["torsional", "bounce", "ode"]);
    }

    #[test]
    fn test_find_children_mut() {
        let mut root = parse("<root><link/><joint/><link/></root>");
        for link in find_children_mut(&mut root, "link") {
            link.set_attribute("seen", "yes");
        }
        assert_eq!(
            find_children(&root, "link")
                .filter(|l| l.attribute("seen") == Some("yes"))
                .count(),
            2
        );
    }

    #[test]
    fn test_get_text_trims() {
        let root = parse("<mu>  0.5  </mu>");
        assert_eq!(get_text(&root), "0.5");
        assert_eq!(get_text(&Element::new("empty")), "");
    }
}
