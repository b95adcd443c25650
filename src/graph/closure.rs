//! Cycle-safe flattening of direct dependencies into a transitive list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// All files reachable from `start`, in pre-order DFS discovery order.
///
/// `direct` is asked for the children of each newly discovered file exactly once, and
/// children are visited in the order it returns them. `start` itself is never part of
/// the result; an edge leading back to it is dropped like any other revisit.
pub fn transitive_dependencies<F>(start: &Path, mut direct: F) -> Vec<PathBuf>
where
    F: FnMut(&Path) -> Vec<PathBuf>,
{
    let mut visited: HashSet<PathBuf> = HashSet::from([start.to_path_buf()]);
    let mut order = Vec::new();
    let mut stack = vec![direct(start).into_iter()];

    while let Some(children) = stack.last_mut() {
        match children.next() {
            Some(child) => {
                if visited.insert(child.clone()) {
                    let grandchildren = direct(&child);
                    order.push(child);
                    stack.push(grandchildren.into_iter());
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    order
}
