//! Dependency- and priority-aware system ordering.
//!
//! The execution order is a topological order of the dependency graph in
//! which, whenever several systems are simultaneously runnable, the
//! highest-priority one is emitted first (registration order breaking
//! ties). Dependencies always win over priority: a low-priority system
//! that a high-priority system depends on still runs first.

use std::collections::HashMap;

use crate::error::SceneError;
use crate::system::System;

/// Resolve the execution order for a scene's systems.
///
/// Returns indices into `systems` in execution order. Dependency names
/// that match no registered system are ignored. A dependency cycle yields
/// [`SceneError::CircularDependency`] naming one system on the cycle.
pub fn resolve_order(systems: &[Box<dyn System>]) -> Result<Vec<usize>, SceneError> {
    let count = systems.len();
    let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(count);
    for (index, system) in systems.iter().enumerate() {
        index_of.insert(system.name(), index);
    }

    // pending[i] counts unsatisfied dependency edges into system i.
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut pending: Vec<usize> = vec![0; count];
    for (index, system) in systems.iter().enumerate() {
        for dep_name in system.dependencies() {
            if let Some(&dep) = index_of.get(dep_name) {
                dependents[dep].push(index);
                pending[index] += 1;
            }
        }
    }

    let mut order = Vec::with_capacity(count);
    let mut ready: Vec<usize> = (0..count).filter(|&index| pending[index] == 0).collect();
    while !ready.is_empty() {
        let mut best_slot = 0;
        for slot in 1..ready.len() {
            let candidate = ready[slot];
            let current = ready[best_slot];
            let candidate_priority = systems[candidate].priority();
            let current_priority = systems[current].priority();
            if candidate_priority > current_priority
                || (candidate_priority == current_priority && candidate < current)
            {
                best_slot = slot;
            }
        }
        let next = ready.swap_remove(best_slot);
        order.push(next);
        for &dependent in &dependents[next] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(dependent);
            }
        }
    }

    if order.len() < count {
        let member = find_cycle_member(systems, &index_of).unwrap_or(0);
        return Err(SceneError::CircularDependency {
            system: systems[member].name().to_string(),
        });
    }
    Ok(order)
}

/// DFS for a system that is on a dependency cycle.
fn find_cycle_member(
    systems: &[Box<dyn System>],
    index_of: &HashMap<&str, usize>,
) -> Option<usize> {
    // 0 = unvisited, 1 = on the current path, 2 = finished.
    let mut state = vec![0u8; systems.len()];
    for start in 0..systems.len() {
        if state[start] == 0 {
            if let Some(member) = visit(start, systems, index_of, &mut state) {
                return Some(member);
            }
        }
    }
    None
}

fn visit(
    index: usize,
    systems: &[Box<dyn System>],
    index_of: &HashMap<&str, usize>,
    state: &mut [u8],
) -> Option<usize> {
    state[index] = 1;
    for dep_name in systems[index].dependencies() {
        if let Some(&dep) = index_of.get(dep_name) {
            match state[dep] {
                0 => {
                    if let Some(member) = visit(dep, systems, index_of, state) {
                        return Some(member);
                    }
                }
                1 => return Some(dep),
                _ => {}
            }
        }
    }
    state[index] = 2;
    None
}
