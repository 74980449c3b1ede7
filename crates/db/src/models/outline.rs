//! Outline models and the flat-rows-to-forest builder.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

/// A row from the `novel_outlines` table. Outlines form a tree via
/// `parent_id`; acyclicity is enforced at write time by
/// `OutlineRepo::move_node`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Outline {
    pub id: DbId,
    pub novel_id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub summary: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an outline node.
#[derive(Debug, Deserialize)]
pub struct CreateOutline {
    pub novel_id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub summary: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating an outline node's content (reparenting goes through
/// `OutlineRepo::move_node`, which carries the cycle check).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOutline {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub sort_order: Option<i32>,
}

/// An outline row with its children attached.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineNode {
    #[serde(flatten)]
    pub outline: Outline,
    pub children: Vec<OutlineNode>,
}

/// Build a nested forest from a flat, ordered row set.
///
/// Rows are grouped by parent in one pass, then subtrees are assembled
/// root-first with an explicit stack. A row whose `parent_id` does not
/// appear in the input set is treated as a root, not dropped.
pub fn build_tree(rows: Vec<Outline>) -> Vec<OutlineNode> {
    let ids: std::collections::HashSet<DbId> = rows.iter().map(|r| r.id).collect();

    let mut roots: Vec<Outline> = Vec::new();
    let mut by_parent: HashMap<DbId, Vec<Outline>> = HashMap::new();
    for row in rows {
        match row.parent_id {
            Some(pid) if ids.contains(&pid) => by_parent.entry(pid).or_default().push(row),
            _ => roots.push(row),
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(root, &mut by_parent))
        .collect()
}

/// Assemble one subtree iteratively: push nodes depth-first, then fold
/// finished children back into their parents.
fn assemble(root: Outline, by_parent: &mut HashMap<DbId, Vec<Outline>>) -> OutlineNode {
    // Stack entries are (node, remaining unexpanded children).
    let mut stack: Vec<(OutlineNode, Vec<Outline>)> = Vec::new();
    let pending = by_parent.remove(&root.id).unwrap_or_default();
    stack.push((
        OutlineNode {
            outline: root,
            children: Vec::new(),
        },
        pending,
    ));

    loop {
        let (_, remaining) = stack.last_mut().expect("stack is never empty here");
        if let Some(child) = remaining.pop() {
            let grandchildren = by_parent.remove(&child.id).unwrap_or_default();
            stack.push((
                OutlineNode {
                    outline: child,
                    children: Vec::new(),
                },
                grandchildren,
            ));
            continue;
        }

        let (mut done, _) = stack.pop().expect("stack is never empty here");
        // Children were expanded in reverse (Vec::pop), restore row order.
        done.children.reverse();
        match stack.last_mut() {
            Some((parent, _)) => parent.children.push(done),
            None => return done,
        }
    }
}
