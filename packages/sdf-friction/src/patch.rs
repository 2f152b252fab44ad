//! In-place friction patching of an SDF element tree.
//!
//! The pipeline for one document is:
//!
//! 1. collect `<model>` elements (root children first, then each `<world>`'s),
//! 2. keep the ones matching the profile's target model,
//! 3. for every configured link present in a model, drop link-level
//!    `<surface>` tags and write `surface/friction/ode/{mu,mu2}` into the
//!    preferred `<collision>`.

use tracing::{debug, warn};

use crate::config::{FrictionPair, FrictionProfile};
use crate::error::{PatchError, Result};
use crate::format::format_coefficient;
use crate::xml::{ensure_child, find_children_mut, Element, Node, XmlDocument};

/// Required root tag of an SDF document.
pub const SDF_ROOT: &str = "sdf";

/// Suffix marking the preferred collision of a link.
pub const COLLISION_SUFFIX: &str = "_collision";

/// Outcome of patching one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Models that passed the target filter.
    pub models_matched: usize,
    /// Links whose collision received friction values.
    pub patched_links: usize,
    /// Link-level `<surface>` tags removed.
    pub removed_surfaces: usize,
    /// Links that matched but had no `<collision>` to patch.
    pub missing_collisions: Vec<String>,
}

impl PatchReport {
    fn merge(&mut self, other: PatchReport) {
        self.models_matched += other.models_matched;
        self.patched_links += other.patched_links;
        self.removed_surfaces += other.removed_surfaces;
        self.missing_collisions.extend(other.missing_collisions);
    }
}

/// Fail unless the document root is `<sdf>`.
pub fn validate_root(doc: &XmlDocument) -> Result<()> {
    if doc.root.name == SDF_ROOT {
        Ok(())
    } else {
        Err(PatchError::InvalidRoot {
            found: doc.root.name.clone(),
        })
    }
}

/// Patch every matching model in the document.
///
/// # Examples
/// ```
/// use sdf_friction::config::FrictionProfile;
/// use sdf_friction::patch::patch_document;
/// use sdf_friction::xml::{find_by_path, get_text, XmlDocument};
///
/// let mut doc = XmlDocument::parse(
///     r#"<sdf><model name="k9_robot"><link name="drivewhl_l_link"><surface/><collision name="x_collision"/></link></model></sdf>"#,
/// ).unwrap();
///
/// let report = patch_document(&mut doc, &FrictionProfile::default()).unwrap();
/// assert_eq!(report.patched_links, 1);
/// assert_eq!(report.removed_surfaces, 1);
///
/// let mu = find_by_path(&doc.root, "model/link/collision/surface/friction/ode/mu").unwrap();
/// assert_eq!(get_text(mu), "1.1");
/// ```
pub fn patch_document(doc: &mut XmlDocument, profile: &FrictionProfile) -> Result<PatchReport> {
    validate_root(doc)?;

    let mut report = PatchReport::default();
    for model in select_models(&mut doc.root, profile) {
        report.merge(patch_model(model, profile));
    }
    Ok(report)
}

/// Collect the `<model>` elements to patch, in processing order.
///
/// Direct children of the root come first, followed by the models of each
/// `<world>` in document order. Models not matching the target are skipped.
pub fn select_models<'a>(root: &'a mut Element, profile: &FrictionProfile) -> Vec<&'a mut Element> {
    let mut direct = Vec::new();
    let mut in_worlds = Vec::new();

    // One pass over the children keeps the borrows disjoint.
    for child in root.elements_mut() {
        if child.name == "model" {
            direct.push(child);
        } else if child.name == "world" {
            in_worlds.extend(find_children_mut(child, "model"));
        }
    }

    direct
        .into_iter()
        .chain(in_worlds)
        .filter(|model| {
            let keep = profile.matches_model(model.attribute("name"));
            if !keep {
                debug!(model = model.attribute("name"), "Skipping model not matching target");
            }
            keep
        })
        .collect()
}

/// Patch all configured links of a single model.
pub fn patch_model(model: &mut Element, profile: &FrictionProfile) -> PatchReport {
    let model_name = model.attribute("name").unwrap_or_default().to_string();
    let mut report = PatchReport {
        models_matched: 1,
        ..PatchReport::default()
    };

    for link_friction in &profile.links {
        let Some(link) = find_link_mut(model, &link_friction.name) else {
            debug!(model = %model_name, link = %link_friction.name, "Link not present");
            continue;
        };

        let removed = remove_link_surfaces(link);
        if removed > 0 {
            debug!(link = %link_friction.name, removed, "Removed link-level <surface> tags");
        }
        report.removed_surfaces += removed;

        let Some(collision) = find_collision_mut(link) else {
            warn!(model = %model_name, "No collision found for link '{}'", link_friction.name);
            report.missing_collisions.push(link_friction.name.clone());
            continue;
        };

        debug!(
            link = %link_friction.name,
            collision = collision.attribute("name").unwrap_or_default(),
            mu = link_friction.mu,
            mu2 = link_friction.mu2,
            "Writing friction"
        );
        ensure_friction(collision, link_friction.pair());
        report.patched_links += 1;
    }

    report
}

/// Find a model's immediate `<link>` child with an exact `name` match.
pub fn find_link<'a>(model: &'a Element, name: &str) -> Option<&'a Element> {
    model
        .elements()
        .find(|child| child.name == "link" && child.attribute("name") == Some(name))
}

/// Mutable variant of [`find_link`].
pub fn find_link_mut<'a>(model: &'a mut Element, name: &str) -> Option<&'a mut Element> {
    find_children_mut(model, "link").find(|link| link.attribute("name") == Some(name))
}

/// Index among `link.children` of the collision to patch.
///
/// Prefers the first collision whose name ends in `_collision`, then the
/// first collision of any name.
fn collision_index(link: &Element) -> Option<usize> {
    let preferred = link.children.iter().position(|child| {
        as_collision(child)
            .and_then(|e| e.attribute("name"))
            .is_some_and(|name| name.ends_with(COLLISION_SUFFIX))
    });
    preferred.or_else(|| {
        link.children
            .iter()
            .position(|child| as_collision(child).is_some())
    })
}

fn as_collision(node: &Node) -> Option<&Element> {
    match node {
        Node::Element(e) if e.name == "collision" => Some(e),
        _ => None,
    }
}

/// Resolve the collision element friction is written into.
pub fn find_collision(link: &Element) -> Option<&Element> {
    match link.children.get(collision_index(link)?)? {
        Node::Element(e) => Some(e),
        _ => None,
    }
}

/// Mutable variant of [`find_collision`].
pub fn find_collision_mut(link: &mut Element) -> Option<&mut Element> {
    let index = collision_index(link)?;
    match link.children.get_mut(index)? {
        Node::Element(e) => Some(e),
        _ => None,
    }
}

/// Remove `<surface>` elements placed directly under a link.
pub fn remove_link_surfaces(link: &mut Element) -> usize {
    link.remove_children("surface")
}

/// Write `mu`/`mu2` into `collision/surface/friction/ode`.
///
/// Missing levels are appended after existing siblings; existing ones are
/// reused and only the two leaf texts are rewritten. Idempotent.
pub fn ensure_friction(collision: &mut Element, pair: FrictionPair) {
    let surface = ensure_child(collision, "surface");
    let friction = ensure_child(surface, "friction");
    let ode = ensure_child(friction, "ode");

    ensure_child(ode, "mu").set_text(format_coefficient(pair.mu));
    ensure_child(ode, "mu2").set_text(format_coefficient(pair.mu2));
}
