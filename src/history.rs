//! Move histories shared between copied cube states.
//!
//! A history is a persistent singly linked list with the newest move at the head. Copying a
//! cube copies only the head pointer, so the thousands of cubes cloned from one survivor share
//! its whole history. Nodes are never mutated: canonicalization rewrites a private id buffer
//! and, when anything changed, installs a freshly built list on the owner only.

use std::fmt;
use std::sync::Arc;

use crate::moves::Move;

struct Node {
    mv: Move,
    next: Option<Arc<Node>>,
}

#[derive(Clone, Default)]
pub struct MoveHistory {
    head: Option<Arc<Node>>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `mv` as the newest move.
    pub fn push(&mut self, mv: Move) {
        let next = self.head.take();
        self.head = Some(Arc::new(Node { mv, next }));
    }

    pub fn clear(&mut self) {
        release(self.head.take());
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Raw number of recorded moves, redundancies included.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Moves from newest to oldest.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Moves in the order they were applied.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = self.iter().collect();
        moves.reverse();
        moves
    }

    /// True when both histories point at the very same head node.
    pub fn shares_head(&self, other: &MoveHistory) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Rewrite the history into its canonical form and return its length.
    ///
    /// Histories that are already canonical keep their (possibly shared) nodes.
    pub fn canonicalize(&mut self) -> usize {
        let mut ids: Vec<u8> = self.iter().map(Move::id).collect();
        if !canonicalize_ids(&mut ids) {
            return ids.len();
        }
        self.clear();
        for mv in ids.iter().rev().filter_map(|&id| Move::from_id(id)) {
            self.push(mv);
        }
        ids.len()
    }
}

impl Drop for MoveHistory {
    fn drop(&mut self) {
        release(self.head.take());
    }
}

/// Unlink uniquely owned nodes one at a time so long chains never recurse in `Drop`.
fn release(mut next: Option<Arc<Node>>) {
    while let Some(node) = next {
        match Arc::try_unwrap(node) {
            Ok(mut node) => next = node.next.take(),
            Err(_) => break,
        }
    }
}

impl fmt::Debug for MoveHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.moves()).finish()
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node.mv
        })
    }
}

/// Combine two turns of the same face. `None` when they cancel.
fn compose(a: u8, b: u8) -> Option<u8> {
    let turn = a % 3;
    let sum = turn + b % 3;
    if sum == 2 {
        None
    } else {
        Some(a - turn + (sum + 1) % 4)
    }
}

/// Remove same-face pairs and opposite-face sandwiches from a newest-first id list.
///
/// A pass scans forward and stays on the current position after a rewrite; passes repeat
/// until one completes without rewriting. Returns whether anything was rewritten.
pub fn canonicalize_ids(ids: &mut Vec<u8>) -> bool {
    let mut rewritten = false;
    loop {
        let mut clean = true;
        let mut i = 0;
        while i + 1 < ids.len() {
            let (a, b) = (ids[i], ids[i + 1]);
            if a / 3 == b / 3 {
                clean = false;
                match compose(a, b) {
                    None => {
                        ids.drain(i..i + 2);
                    }
                    Some(merged) => {
                        ids[i] = merged;
                        ids.remove(i + 1);
                    }
                }
            } else if a / 6 == b / 6 && i + 2 < ids.len() && a / 3 == ids[i + 2] / 3 {
                // b turns the opposite face, so it commutes with both a and ids[i + 2]
                clean = false;
                match compose(a, ids[i + 2]) {
                    None => {
                        ids.remove(i + 2);
                        ids.remove(i);
                    }
                    Some(merged) => {
                        ids[i] = merged;
                        ids.remove(i + 2);
                    }
                }
            } else {
                i += 1;
            }
        }
        if clean {
            return rewritten;
        }
        rewritten = true;
    }
}
