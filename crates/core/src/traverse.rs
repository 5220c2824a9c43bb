//! The hybrid menu-tree traversal shared by every pass.
//!
//! The order is neither depth-first nor breadth-first:
//!
//! 1. visit the root;
//! 2. for a group, visit all of its direct slots, row by row, left to right,
//!    without descending;
//! 3. then scan the same slots again and apply step 2 to every slot that is
//!    itself a group.
//!
//! Because a group's direct slots are visited as one uninterrupted run, the
//! ids handed out in this order give each group a contiguous block of
//! `5 * rows` children. The validator, symbol generator, exploder and table
//! builder all go through [`walk`] or [`walk_mut`] so they agree on that
//! order.

use crate::grammar::ast::{MenuNode, NULL_ID, Row};

/// Read-only visitor driven by [`walk`].
pub trait Visit<'a> {
    /// Error type that aborts the walk.
    type Error;

    /// Called once per node. `parent` is `None` only for the root.
    fn visit_node(
        &mut self,
        node: &'a MenuNode,
        parent: Option<&'a MenuNode>,
    ) -> Result<(), Self::Error>;

    /// Called before the direct slots of `group` are visited.
    fn enter_group(&mut self, _group: &'a MenuNode) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called before the slots of row `index` of `group` are visited.
    fn enter_row(
        &mut self,
        _group: &'a MenuNode,
        _row: &'a Row,
        _index: usize,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Mutating visitor driven by [`walk_mut`].
pub trait VisitMut {
    /// Error type that aborts the walk.
    type Error;

    /// Called once per node with the id of its enclosing group
    /// ([`NULL_ID`] for the root).
    ///
    /// A group's rows may be changed here; the walk reads them afterwards.
    fn visit_node(&mut self, node: &mut MenuNode, parent_id: u8) -> Result<(), Self::Error>;
}

/// Walk `root` in hybrid order.
pub fn walk<'a, V: Visit<'a>>(root: &'a MenuNode, visitor: &mut V) -> Result<(), V::Error> {
    visitor.visit_node(root, None)?;
    walk_group(root, visitor)
}

fn walk_group<'a, V: Visit<'a>>(node: &'a MenuNode, visitor: &mut V) -> Result<(), V::Error> {
    let MenuNode::Group { rows, .. } = node else {
        return Ok(());
    };
    visitor.enter_group(node)?;

    // Direct children of the current group.
    for (index, row) in rows.iter().enumerate() {
        visitor.enter_row(node, row, index)?;
        for slot in &row.slots {
            visitor.visit_node(slot, Some(node))?;
        }
    }

    // Then descend into sub-groups.
    for slot in rows.iter().flat_map(|row| &row.slots) {
        walk_group(slot, visitor)?;
    }
    Ok(())
}

/// Walk `root` in hybrid order with mutable access.
pub fn walk_mut<V: VisitMut>(root: &mut MenuNode, visitor: &mut V) -> Result<(), V::Error> {
    visitor.visit_node(root, NULL_ID)?;
    walk_group_mut(root, visitor)
}

fn walk_group_mut<V: VisitMut>(node: &mut MenuNode, visitor: &mut V) -> Result<(), V::Error> {
    let MenuNode::Group { info, rows } = node else {
        return Ok(());
    };
    let parent_id = info.id;

    for slot in rows.iter_mut().flat_map(|row| row.slots.iter_mut()) {
        visitor.visit_node(slot, parent_id)?;
    }

    for slot in rows.iter_mut().flat_map(|row| row.slots.iter_mut()) {
        walk_group_mut(slot, visitor)?;
    }
    Ok(())
}

/// All nodes in hybrid order, root first.
pub fn flatten(root: &MenuNode) -> Vec<&MenuNode> {
    struct Collect<'a>(Vec<&'a MenuNode>);

    impl<'a> Visit<'a> for Collect<'a> {
        type Error = std::convert::Infallible;

        fn visit_node(
            &mut self,
            node: &'a MenuNode,
            _parent: Option<&'a MenuNode>,
        ) -> Result<(), Self::Error> {
            self.0.push(node);
            Ok(())
        }
    }

    let mut collect = Collect(Vec::new());
    match walk(root, &mut collect) {
        Ok(()) => collect.0,
        Err(never) => match never {},
    }
}
