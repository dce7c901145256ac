// extensions/transform.rs
//
// Transform hierarchy: tracks parent-child relationships by EntityId.
// A reel container is the parent of every symbol on its strip: moving the
// container scrolls the whole strip, and its blur applies to all symbols.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(symbol_id, LocalTransform::at(offset));
//   graph.set_parent(symbol_id, Some(container_id));
//   graph.propagate(&mut scene);  // Updates world positions from local offsets

use std::collections::HashMap;
use glam::Vec2;
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Local transform data for entities in a hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent (or world if no parent).
    pub offset: Vec2,
}

impl LocalTransform {
    pub fn at(offset: Vec2) -> Self {
        Self { offset }
    }
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Transform hierarchy graph: manages parent-child relationships.
///
/// Lives beside the Scene; only the reel surface builds one.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent (top-level), in registration order.
    roots: Vec<EntityId>,
    /// Set when hierarchy or offsets change, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
        }

        // Remove from old parent's children
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Move an entity relative to its parent.
    pub fn set_offset(&mut self, id: EntityId, offset: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.local.offset != offset {
                node.local.offset = offset;
                self.dirty = true;
            }
        }
    }

    /// Propagate positions from roots down through the hierarchy.
    /// Children also take their parent's blur.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }
        for &root in &self.roots {
            let blur = scene.get(root).map(|e| e.blur).unwrap_or(0.0);
            self.propagate_recursive(root, Vec2::ZERO, blur, scene);
        }
        self.dirty = false;
    }

    fn propagate_recursive(&self, id: EntityId, parent_pos: Vec2, blur: f32, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };
        let world_pos = parent_pos + node.local.offset;

        if let Some(entity) = scene.get_mut(id) {
            entity.pos = world_pos;
            entity.blur = blur;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world_pos, blur, scene);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force propagation on the next call, e.g. after a blur change.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.dirty = false;
    }
}
