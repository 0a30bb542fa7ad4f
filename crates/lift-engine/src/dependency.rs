//! Dependency mapping: predecessor links to target dependency tokens.
//!
//! The target platform addresses dependencies by *row number*, which only
//! exists after placement. Mapping therefore runs strictly after the
//! hierarchy pass (two-pass scheme): the row map assigns each task its
//! 1-based insertion position, and tokens are rendered against that map.
//!
//! Token shape: `{row}{TYPE}{signed lag}d`, the lag part omitted when zero.
//! `2FS+2d` reads "finish-to-start on row 2, two days of lag"; `4SS-1d` is a
//! one-day lead. Multiple links joined with `", "` in declaration order —
//! identical input always renders the identical string.

use lift_core::records::PredecessorLink;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Map each task id to its 1-based row position, in iteration order.
///
/// Callers pass the accepted tasks in insertion order; children follow their
/// parents contiguously, so insertion order and final sheet order agree.
#[must_use]
pub fn build_row_map<'a>(task_ids: impl Iterator<Item = &'a str>) -> HashMap<String, u32> {
    task_ids
        .enumerate()
        .map(|(index, id)| (id.to_owned(), index as u32 + 1))
        .collect()
}

/// Render the dependency cell for one task.
///
/// Links whose predecessor is not in the row map are dropped with a warning;
/// the remaining links still render. Returns `None` when no link survives.
#[must_use]
pub fn render_tokens(
    task_id: &str,
    links: &[PredecessorLink],
    row_map: &HashMap<String, u32>,
) -> (Option<String>, Vec<String>) {
    let mut tokens = Vec::with_capacity(links.len());
    let mut warnings = Vec::new();

    for link in links {
        let Some(row) = row_map.get(&link.predecessor_id) else {
            warnings.push(format!(
                "task {task_id}: predecessor {} is not part of this project; link dropped",
                link.predecessor_id
            ));
            continue;
        };

        let mut token = format!("{row}{}", link.link_type);
        if link.lag_days != 0 {
            let _ = write!(token, "{:+}d", link.lag_days);
        }
        tokens.push(token);
    }

    if tokens.is_empty() {
        (None, warnings)
    } else {
        (Some(tokens.join(", ")), warnings)
    }
}
