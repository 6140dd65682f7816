//! Transform System
//!
//! Performs the hierarchical world matrix update for the scene graph.
//! Decoupled from `Scene` so it only borrows the node storage and the
//! root list, avoiding borrow conflicts with component pools.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Updates world matrices for the whole hierarchy.
///
/// Uses an explicit stack instead of recursion to avoid stack overflow
/// on deep hierarchies, and to reduce repeated borrow overhead.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    // Work stack: (node handle, parent world matrix, parent changed)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    // Seed with all root nodes
    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    while let Some((node_handle, parent_world_matrix, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        // 1. Refresh the local matrix
        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        // 2. Refresh the world matrix
        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        // 3. Snapshot child info before the borrow ends
        let current_world = node.transform.world_matrix;
        let children_count = node.children.len();

        // 4. Push children in reverse to preserve traversal order
        for i in (0..children_count).rev() {
            if let Some(node) = nodes.get(node_handle)
                && let Some(&child_handle) = node.children.get(i)
            {
                stack.push((child_handle, current_world, world_needs_update));
            }
        }
    }
}

/// Updates world matrices for a single subtree.
///
/// Used for partial refreshes of the scene graph, e.g. after attaching
/// a freshly built model under an existing parent.
pub fn update_subtree(nodes: &mut SlotMap<NodeHandle, Node>, root_handle: NodeHandle) {
    // Resolve the parent world matrix, if the subtree root has one
    let parent_world = if let Some(node) = nodes.get(root_handle) {
        if let Some(parent_handle) = node.parent {
            nodes
                .get(parent_handle)
                .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix)
        } else {
            Affine3A::IDENTITY
        }
    } else {
        return;
    };

    update_transform_recursive(nodes, root_handle, parent_world, true);
}

/// Recursively updates one node and its subtree.
fn update_transform_recursive(
    nodes: &mut SlotMap<NodeHandle, Node>,
    node_handle: NodeHandle,
    parent_world_matrix: Affine3A,
    parent_changed: bool,
) {
    // Phase 1: process the current node
    let (current_world_matrix, children_handles, world_needs_update) = {
        let Some(node) = nodes.get_mut(node_handle) else {
            return;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        // Snapshot to avoid holding the borrow across recursion
        let world = node.transform.world_matrix;
        let children: Vec<NodeHandle> = node.children.clone();

        (world, children, world_needs_update)
    };

    // Phase 2: recurse into children
    for child_handle in children_handles {
        update_transform_recursive(nodes, child_handle, current_world_matrix, world_needs_update);
    }
}
