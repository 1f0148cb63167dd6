//! Depth-first lookups over a layer tree.

use crate::model::layer::Layer;

/// Depth-first search for the layer with `id`, the root included.
pub fn find_by_id<'a>(root: &'a Layer, id: &str) -> Option<&'a Layer> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|child| find_by_id(child, id))
}

/// Mutable counterpart of [`find_by_id`].
pub fn find_by_id_mut<'a>(root: &'a mut Layer, id: &str) -> Option<&'a mut Layer> {
    if root.id == id {
        return Some(root);
    }
    root.children
        .iter_mut()
        .find_map(|child| find_by_id_mut(child, id))
}

/// Layers from `root` down to the layer with `id`, both inclusive.
pub fn find_path_to<'a>(root: &'a Layer, id: &str) -> Option<Vec<&'a Layer>> {
    fn walk<'a>(node: &'a Layer, id: &str, path: &mut Vec<&'a Layer>) -> bool {
        path.push(node);
        if node.id == id {
            return true;
        }
        for child in &node.children {
            if walk(child, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

/// The sequence holding the layer with `id` and its index there.
///
/// The root has no holding sequence, so it yields `None`.
pub fn find_siblings<'a>(root: &'a Layer, id: &str) -> Option<(&'a [Layer], usize)> {
    if let Some(idx) = root.children.iter().position(|c| c.id == id) {
        return Some((root.children.as_slice(), idx));
    }
    root.children
        .iter()
        .find_map(|child| find_siblings(child, id))
}

/// Mutable counterpart of [`find_siblings`].
pub fn find_siblings_mut<'a>(root: &'a mut Layer, id: &str) -> Option<(&'a mut Vec<Layer>, usize)> {
    if let Some(idx) = root.children.iter().position(|c| c.id == id) {
        return Some((&mut root.children, idx));
    }
    for child in root.children.iter_mut() {
        if let Some(found) = find_siblings_mut(child, id) {
            return Some(found);
        }
    }
    None
}

/// Visit every layer depth-first, parents before children.
pub fn walk<'a>(root: &'a Layer, visit: &mut impl FnMut(&'a Layer)) {
    visit(root);
    for child in &root.children {
        walk(child, visit);
    }
}

/// Every layer id in pre-order.
pub fn collect_ids(root: &Layer) -> Vec<&str> {
    let mut ids = Vec::new();
    walk(root, &mut |layer| ids.push(layer.id.as_str()));
    ids
}

/// Resolve a layer name to its id.
///
/// Names are not unique. A name matching several layers is ambiguous and resolves
/// to `None` (with a warning) rather than to whichever layer comes first.
pub fn find_id_by_name(root: &Layer, name: &str) -> Option<String> {
    let mut matches = Vec::new();
    walk(root, &mut |layer| {
        if layer.name == name {
            matches.push(layer.id.as_str());
        }
    });
    match matches.as_slice() {
        [] => None,
        [id] => Some((*id).to_owned()),
        ids => {
            tracing::warn!(name, candidates = ?ids, "ambiguous layer name");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/traverse.rs"]
mod tests;
