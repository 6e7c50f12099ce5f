//! A parent/child view over the tasks of one list

use std::collections::{HashMap, HashSet};

use crate::list::TaskList;
use crate::task::Task;

/// The materialized parent/child links of one [`TaskList`].
///
/// Tasks only carry their parent's UID; this view resolves those references
/// against the list once, in O(n), and answers navigation queries from the
/// resulting index. It borrows the list, so the borrow checker guarantees it
/// cannot go stale: mutate the list, then build a fresh view.
///
/// Resolution is forgiving. A task whose parent UID matches nothing in the
/// list is treated as a root, and reference loops (a task among its own
/// ancestors) do not make traversal hang; they are detected while walking.
pub struct Hierarchy<'c> {
    list: &'c TaskList,
    /// Arena index of each task, by UID (tasks without a UID are not addressable)
    index_by_uid: HashMap<&'c str, usize>,
    /// child arena index to parent arena index, for links that resolved
    parent_links: HashMap<usize, usize>,
    /// parent arena index to child arena indexes, in arena order
    child_links: HashMap<usize, Vec<usize>>,
}

impl<'c> Hierarchy<'c> {
    pub fn new(list: &'c TaskList) -> Self {
        let tasks = list.tasks();

        let mut index_by_uid = HashMap::new();
        for (index, task) in tasks.iter().enumerate() {
            if let Some(uid) = task.uid() {
                index_by_uid.insert(uid, index);
            }
        }

        let mut parent_links = HashMap::new();
        let mut child_links: HashMap<usize, Vec<usize>> = HashMap::new();
        for (index, task) in tasks.iter().enumerate() {
            let parent_uid = match task.parent_uid() {
                Some(parent_uid) => parent_uid,
                None => continue,
            };
            match index_by_uid.get(parent_uid) {
                Some(&parent_index) => {
                    parent_links.insert(index, parent_index);
                    child_links.entry(parent_index).or_insert_with(Vec::new).push(index);
                }
                None => {
                    log::debug!(
                        "Task {:?} references parent '{}' which is not in list '{}', treating it as a root",
                        task.uid(), parent_uid, list.uid()
                    );
                }
            }
        }

        Self { list, index_by_uid, parent_links, child_links }
    }

    fn task_at(&self, index: usize) -> &'c Task {
        &self.list.tasks()[index]
    }

    /// The resolved parent of this task, if it has one in the list
    pub fn parent_of(&self, uid: &str) -> Option<&'c Task> {
        let index = self.index_by_uid.get(uid)?;
        self.parent_links.get(index).map(|&parent| self.task_at(parent))
    }

    /// The direct children of this task, in list order
    pub fn children_of(&self, uid: &str) -> Vec<&'c Task> {
        match self.index_by_uid.get(uid).and_then(|index| self.child_links.get(index)) {
            Some(children) => children.iter().map(|&child| self.task_at(child)).collect(),
            None => Vec::new(),
        }
    }

    /// The tasks with no resolved parent (including those whose parent UID
    /// matches nothing in the list), in list order
    pub fn roots(&self) -> Vec<&'c Task> {
        self.list
            .tasks()
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.parent_links.contains_key(index))
            .map(|(_, task)| task)
            .collect()
    }

    /// The chain of ancestors of this task, nearest first.
    ///
    /// The task itself is never listed; when the parent links loop back to a
    /// task already seen, the chain stops there
    pub fn ancestors_of(&self, uid: &str) -> Vec<&'c Task> {
        let mut ancestors = Vec::new();
        let mut current = match self.index_by_uid.get(uid) {
            Some(&index) => index,
            None => return ancestors,
        };

        let mut visited = HashSet::new();
        visited.insert(current);
        while let Some(&parent) = self.parent_links.get(&current) {
            if !visited.insert(parent) {
                log::warn!("The parent chain of task '{}' loops back on itself", uid);
                break;
            }
            ancestors.push(self.task_at(parent));
            current = parent;
        }
        ancestors
    }

    /// Walk the whole list depth-first, returning each task with its depth
    /// (roots are at depth 0).
    ///
    /// Every task shows up exactly once, even tasks caught in a reference
    /// loop; those are walked as if they were roots, since no root leads to them
    pub fn walk(&self) -> Vec<(&'c Task, usize)> {
        let mut walked = Vec::new();
        let mut visited = HashSet::new();
        for index in 0..self.list.len() {
            if !self.parent_links.contains_key(&index) {
                self.walk_from(index, 0, &mut visited, &mut walked);
            }
        }
        // Tasks in a loop are reachable from no root
        for index in 0..self.list.len() {
            if !visited.contains(&index) {
                log::debug!(
                    "Task {:?} is part of a parent reference loop",
                    self.task_at(index).uid()
                );
                self.walk_from(index, 0, &mut visited, &mut walked);
            }
        }
        walked
    }

    fn walk_from(
        &self,
        index: usize,
        depth: usize,
        visited: &mut HashSet<usize>,
        walked: &mut Vec<(&'c Task, usize)>,
    ) {
        if !visited.insert(index) {
            return;
        }
        walked.push((self.task_at(index), depth));
        if let Some(children) = self.child_links.get(&index) {
            for &child in children {
                self.walk_from(child, depth + 1, visited, walked);
            }
        }
    }
}
