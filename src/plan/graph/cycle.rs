//! Cycle detection over `blockedBy` edges

use std::collections::{HashMap, HashSet};

/// Find the first cycle reachable from `order`, walking roots in that order.
///
/// Iterative DFS with an explicit frame stack so deep chains cannot overflow
/// the call stack. The frame stack doubles as the current recursion path:
/// when a neighbor is already on it, the cycle is the path slice from that
/// neighbor to the top, closed by repeating the neighbor.
pub fn find_cycle(order: &[String], edges: &HashMap<String, Vec<String>>) -> Option<Vec<String>> {
    let mut visited: HashSet<&str> = HashSet::new();

    for root in order {
        if visited.contains(root.as_str()) {
            continue;
        }

        // (node, index of the next neighbor to visit)
        let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
        let mut on_path: HashSet<&str> = HashSet::from([root.as_str()]);
        visited.insert(root.as_str());

        while let Some(&(node, next)) = stack.last() {
            let neighbors = edges.get(node).map(Vec::as_slice).unwrap_or(&[]);

            let Some(neighbor) = neighbors.get(next) else {
                stack.pop();
                on_path.remove(node);
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            let neighbor = neighbor.as_str();

            if on_path.contains(neighbor) {
                let start = stack
                    .iter()
                    .position(|(id, _)| *id == neighbor)
                    .unwrap_or(0);
                let mut cycle: Vec<String> =
                    stack[start..].iter().map(|(id, _)| id.to_string()).collect();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }

            if visited.insert(neighbor) {
                on_path.insert(neighbor);
                stack.push((neighbor, 0));
            }
        }
    }

    None
}
