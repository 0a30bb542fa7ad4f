//! Hierarchy reconstruction from a flat, depth-annotated task sequence.
//!
//! Source exports carry tasks as a flat list in document order, each with an
//! outline level (1 = top). The builder walks the sequence once with an
//! ancestor stack: for each task it pops every stack entry at the same or a
//! deeper level, and whatever remains on top is the parent. The target
//! platform only understands "child of row X", so the output is a placement
//! per task, in the same order as the input.
//!
//! Depth irregularities never abort the build. A level jump of more than one
//! resolves to the nearest valid ancestor with a warning; a depth beyond the
//! platform maximum is clamped to it, also with a warning.

/// Where one task lands relative to the tasks before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Top-level task.
    Root,
    /// Nested under the task at `parent_index` (an index into the same
    /// sequence), at nesting depth `indent` (1 = directly under a root).
    Child { parent_index: usize, indent: u32 },
}

impl Placement {
    /// Nesting depth of the placed task; 0 for roots.
    #[must_use]
    pub const fn indent(self) -> u32 {
        match self {
            Self::Root => 0,
            Self::Child { indent, .. } => indent,
        }
    }
}

/// Placements for one task sequence, plus structural warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyPlan {
    /// One placement per input task, same order.
    pub placements: Vec<Placement>,
    pub warnings: Vec<String>,
}

/// Build placements for a sequence of outline levels (1 = top level).
///
/// `max_indent` is the deepest nesting the target platform accepts; tasks
/// that would exceed it are re-parented to the deepest ancestor still inside
/// the limit.
#[must_use]
pub fn build(levels: &[u32], max_indent: u32) -> HierarchyPlan {
    let mut placements = Vec::with_capacity(levels.len());
    let mut warnings = Vec::new();
    // (outline level, task index, effective indent) for each open ancestor.
    let mut stack: Vec<(u32, usize, u32)> = Vec::new();
    let mut prev_level = 0;

    for (index, &level) in levels.iter().enumerate() {
        if level > prev_level + 1 {
            warnings.push(format!(
                "task {}: outline level jumps from {prev_level} to {level}; \
                 treating it as one level deeper than the previous task",
                index + 1
            ));
        }

        while stack.last().is_some_and(|(l, _, _)| *l >= level) {
            stack.pop();
        }

        let placement = match stack.last().copied() {
            None => {
                stack.push((level, index, 0));
                Placement::Root
            }
            Some((_, mut parent_index, parent_indent)) => {
                let mut indent = parent_indent + 1;
                if indent > max_indent {
                    if let Some((_, ancestor_index, ancestor_indent)) = stack
                        .iter()
                        .rev()
                        .find(|(_, _, ind)| *ind < max_indent)
                        .copied()
                    {
                        parent_index = ancestor_index;
                        indent = ancestor_indent + 1;
                    }
                    warnings.push(format!(
                        "task {}: nesting depth exceeds the platform maximum of {max_indent}; \
                         clamped",
                        index + 1
                    ));
                }
                stack.push((level, index, indent));
                Placement::Child {
                    parent_index,
                    indent,
                }
            }
        };

        placements.push(placement);
        prev_level = level;
    }

    HierarchyPlan {
        placements,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MAX: u32 = 10;

    fn indents(levels: &[u32]) -> Vec<u32> {
        build(levels, MAX)
            .placements
            .iter()
            .map(|p| p.indent())
            .collect()
    }

    #[test]
    fn flat_sequence_stays_flat() {
        let plan = build(&[1, 1, 1], MAX);
        assert_eq!(plan.placements, vec![Placement::Root; 3]);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn siblings_share_their_parent() {
        // Phase / two subtasks / next phase.
        let plan = build(&[1, 2, 2, 1], MAX);
        assert_eq!(
            plan.placements,
            vec![
                Placement::Root,
                Placement::Child {
                    parent_index: 0,
                    indent: 1
                },
                Placement::Child {
                    parent_index: 0,
                    indent: 1
                },
                Placement::Root,
            ]
        );
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn deeper_nesting_chains_parents() {
        let plan = build(&[1, 2, 3, 3, 2], MAX);
        assert_eq!(
            plan.placements,
            vec![
                Placement::Root,
                Placement::Child {
                    parent_index: 0,
                    indent: 1
                },
                Placement::Child {
                    parent_index: 1,
                    indent: 2
                },
                Placement::Child {
                    parent_index: 1,
                    indent: 2
                },
                Placement::Child {
                    parent_index: 0,
                    indent: 1
                },
            ]
        );
    }

    #[test]
    fn level_jump_warns_but_resolves() {
        let plan = build(&[1, 3], MAX);
        assert_eq!(
            plan.placements[1],
            Placement::Child {
                parent_index: 0,
                indent: 1
            }
        );
        assert_eq!(plan.warnings.len(), 1);
        assert!(plan.warnings[0].contains("jumps from 1 to 3"));
    }

    #[test]
    fn first_task_below_top_level_becomes_root() {
        let plan = build(&[2, 2], MAX);
        assert_eq!(plan.placements, vec![Placement::Root, Placement::Root]);
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn depth_beyond_maximum_is_clamped() {
        let plan = build(&[1, 2, 3, 4], 2);
        assert_eq!(
            plan.placements[3],
            Placement::Child {
                parent_index: 1,
                indent: 2
            }
        );
        assert_eq!(plan.warnings.len(), 1);
        assert!(plan.warnings[0].contains("clamped"));
    }

    #[test]
    fn step_by_one_sequences_round_trip() {
        // For sequences that only ever deepen by one, indent + 1 re-derives
        // the original levels.
        for levels in [
            vec![1, 2, 3, 2, 1, 2],
            vec![1, 1, 2, 2, 3, 1],
            vec![1, 2, 2, 1],
        ] {
            let rederived: Vec<u32> = indents(&levels).iter().map(|i| i + 1).collect();
            assert_eq!(rederived, levels);
        }
    }

    #[test]
    fn empty_sequence_yields_empty_plan() {
        let plan = build(&[], MAX);
        assert!(plan.placements.is_empty());
        assert!(plan.warnings.is_empty());
    }
}
