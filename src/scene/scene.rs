use slotmap::SlotMap;

use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::transform_system;
use crate::scene::{MaterialKey, MeshKey, NodeHandle};

/// Scene graph container.
///
/// `Scene` is a pure data layer: it owns the node hierarchy and the
/// component pools (meshes, materials). All animation and deformation
/// systems borrow from it; rendering is left to the host.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Component / resource pools ====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub materials: SlotMap<MaterialKey, Material>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            materials: SlotMap::with_key(),
        }
    }

    /// Starts building a node.
    pub fn build_node(&'_ mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Adds a node to the scene as a root node.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node under an existing parent.
    pub fn add_to_parent(&mut self, child: Node, parent_handle: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);

        if let Some(p) = self.nodes.get_mut(parent_handle) {
            p.children.push(handle);
        }
        if let Some(c) = self.nodes.get_mut(handle) {
            c.parent = Some(parent_handle);
        }

        handle
    }

    /// Removes a node and, recursively, all of its children.
    ///
    /// Meshes attached to removed nodes are dropped from the pool.
    /// Materials stay: they may be shared with surviving meshes.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        // Take the children list first to avoid borrow conflicts
        let children = if let Some(node) = self.nodes.get(handle) {
            node.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        // Unlink from the parent, or from the root list
        let parent_opt = self.nodes.get(handle).and_then(|n| n.parent);

        if let Some(parent_handle) = parent_opt {
            if let Some(parent) = self.nodes.get_mut(parent_handle)
                && let Some(pos) = parent.children.iter().position(|&x| x == handle)
            {
                parent.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(pos);
        }

        // === Component cleanup ===
        if let Some(node) = self.nodes.get(handle)
            && let Some(mesh_key) = node.mesh
        {
            self.meshes.remove(mesh_key);
        }

        self.nodes.remove(handle);
    }

    /// Establishes a parent-child relationship.
    pub fn attach(&mut self, child_handle: NodeHandle, parent_handle: NodeHandle) {
        if child_handle == parent_handle {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        // 1. Detach from old
        let old_parent = self.nodes.get(child_handle).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child_handle)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child_handle) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent_handle) {
            p.children.push(child_handle);
        } else {
            log::error!("Parent node not found during attach!");
            // Put the child back in root_nodes so it is not lost
            self.root_nodes.push(child_handle);
            return;
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child_handle) {
            c.parent = Some(parent_handle);
            c.transform.mark_dirty();
        }
    }

    /// Read-only node access.
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    /// Mutable node access (for TRS edits).
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    // ========================================================================
    // Name resolution
    // ========================================================================

    /// Finds the first node with the given name, depth-first across all
    /// root nodes in insertion order.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeHandle> {
        for &root in &self.root_nodes {
            if let Some(found) = self.find_node_from(root, name) {
                return Some(found);
            }
        }
        None
    }

    /// Finds the first node with the given name within a subtree.
    #[must_use]
    pub fn find_node_from(&self, current: NodeHandle, name: &str) -> Option<NodeHandle> {
        if let Some(node) = self.get_node(current) {
            if node.name == name {
                return Some(current);
            }
            for &child in &node.children {
                if let Some(found) = self.find_node_from(child, name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Collects every mesh in a subtree, in depth-first preorder.
    ///
    /// The order is stable for a given hierarchy, which matters to
    /// callers that rank the results.
    #[must_use]
    pub fn collect_meshes(&self, root: NodeHandle) -> Vec<(NodeHandle, MeshKey)> {
        let mut out = Vec::new();
        self.collect_meshes_into(root, &mut out);
        out
    }

    fn collect_meshes_into(&self, current: NodeHandle, out: &mut Vec<(NodeHandle, MeshKey)>) {
        if let Some(node) = self.get_node(current) {
            if let Some(mesh_key) = node.mesh {
                out.push((current, mesh_key));
            }
            for &child in &node.children {
                self.collect_meshes_into(child, out);
            }
        }
    }

    // ========================================================================
    // Component query API
    // ========================================================================

    /// Queries a node's transform together with its mesh.
    pub fn query_mesh_bundle(
        &mut self,
        node_handle: NodeHandle,
    ) -> Option<(&mut crate::scene::Transform, &Mesh)> {
        let mesh_key = self.nodes.get(node_handle)?.mesh?;
        let mesh = self.meshes.get(mesh_key)?;
        let transform = &mut self.nodes.get_mut(node_handle)?.transform;
        Some((transform, mesh))
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Updates world matrices for the whole scene.
    ///
    /// Call this once per frame after animation systems have written
    /// their local transforms.
    pub fn update_matrix_world(&mut self) {
        // Iterative version avoids stack overflow on deep hierarchies
        transform_system::update_hierarchy_iterative(&mut self.nodes, &self.root_nodes);
    }

    /// Updates world matrices for one subtree only.
    pub fn update_subtree(&mut self, root_handle: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, root_handle);
    }

    // === Resource management API ===

    /// Inserts a mesh and creates a root node carrying it.
    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_node(node)
    }

    /// Inserts a mesh and creates a node for it under a parent.
    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeHandle) -> NodeHandle {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_to_parent(node, parent)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    #[must_use]
    pub fn get_material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn get_material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }
}

/// Chainable builder for inserting configured nodes.
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    node: Node,
    parent: Option<NodeHandle>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            node: Node::new(name),
            parent: None,
        }
    }

    // === Chainable configuration ===

    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.position = glam::Vec3::new(x, y, z);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: glam::Quat) -> Self {
        self.node.transform.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, s: f32) -> Self {
        self.node.transform.scale = glam::Vec3::splat(s);
        self
    }

    /// Sets the parent node.
    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attaches a mesh, inserting it into the scene's pool.
    #[must_use]
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.node.mesh = Some(self.scene.meshes.insert(mesh));
        self
    }

    // === Finalizer ===

    /// Finishes the build, inserting the node into the scene.
    pub fn build(self) -> NodeHandle {
        let node_handle = self.scene.nodes.insert(self.node);

        if let Some(parent_handle) = self.parent {
            self.scene.attach(node_handle, parent_handle);
        } else {
            self.scene.root_nodes.push(node_handle);
        }

        node_handle
    }
}
