// ============================================================================
// Menu Core - Menu Tree
// File: crates/menu-core/src/domain/tree.rs
// Description: Arena of menu items linked by parent id
// ============================================================================

use std::collections::HashMap;

use menu_shared::EntityId;

use crate::domain::MenuItem;
use crate::error::DomainError;

/// Menu items of one or more groups, arranged by `parent_id`.
///
/// Every parent must be present, belong to the child's group and the links
/// must be acyclic; `build` rejects anything else.
#[derive(Debug, Clone)]
pub struct MenuTree {
    nodes: Vec<MenuItem>,
    index: HashMap<EntityId, usize>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl MenuTree {
    pub fn build(items: Vec<MenuItem>) -> Result<Self, DomainError> {
        let index: HashMap<EntityId, usize> = items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.id, position))
            .collect();

        let mut children = vec![Vec::new(); items.len()];
        let mut roots = Vec::new();

        for (position, item) in items.iter().enumerate() {
            match item.parent_id {
                None => roots.push(position),
                Some(parent_id) => {
                    let parent = *index
                        .get(&parent_id)
                        .ok_or(DomainError::ParentNotFound(parent_id))?;
                    if items[parent].menu_group_id != item.menu_group_id {
                        return Err(DomainError::ParentNotInGroup {
                            parent_id,
                            group_id: item.menu_group_id,
                        });
                    }
                    children[parent].push(position);
                }
            }
        }

        let order = |a: &usize, b: &usize| {
            (items[*a].sort_order, items[*a].id).cmp(&(items[*b].sort_order, items[*b].id))
        };
        roots.sort_by(order);
        for siblings in children.iter_mut() {
            siblings.sort_by(order);
        }

        let tree = Self { nodes: items, index, children, roots };

        // Items on a cycle are never reachable from a root.
        let mut reached = vec![false; tree.nodes.len()];
        for (_, position) in tree.walk_positions() {
            reached[position] = true;
        }
        if let Some(position) = reached.iter().position(|seen| !seen) {
            return Err(DomainError::CycleDetected(tree.nodes[position].id));
        }

        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&MenuItem> {
        self.index.get(&id).map(|position| &self.nodes[*position])
    }

    pub fn roots(&self) -> Vec<&MenuItem> {
        self.roots.iter().map(|position| &self.nodes[*position]).collect()
    }

    pub fn children(&self, id: EntityId) -> Vec<&MenuItem> {
        match self.index.get(&id) {
            Some(position) => self.children[*position]
                .iter()
                .map(|child| &self.nodes[*child])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Level of an item; roots are level 1.
    pub fn depth(&self, id: EntityId) -> Option<usize> {
        let mut current = self.get(id)?;
        let mut depth = 1;
        while let Some(parent_id) = current.parent_id {
            current = self.get(parent_id)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Pre-order traversal with levels, siblings by sort order.
    pub fn walk(&self) -> Vec<(usize, &MenuItem)> {
        self.walk_positions()
            .into_iter()
            .map(|(depth, position)| (depth, &self.nodes[position]))
            .collect()
    }

    fn walk_positions(&self) -> Vec<(usize, usize)> {
        let mut visited = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, usize)> =
            self.roots.iter().rev().map(|position| (1, *position)).collect();

        while let Some((depth, position)) = stack.pop() {
            visited.push((depth, position));
            for child in self.children[position].iter().rev() {
                stack.push((depth + 1, *child));
            }
        }
        visited
    }
}
