//! Resource family classification and assignment column planning.
//!
//! Every resource belongs to exactly one of three families — People,
//! Material, Cost — decided by its source category tag. People is the
//! default for absent or unrecognized tags. Families drive two things: which
//! destination column a resource row populates, and which assignment columns
//! the task sheet grows.

use lift_core::enums::ResourceFamily;
use lift_core::records::SourceResource;
use lift_core::sheet::{ColumnId, ColumnKind, ColumnSpec, SheetId, SourceLink};

/// Category tag selecting the Material family.
pub const MATERIAL_TAG: &str = "Material";
/// Category tag selecting the Cost family.
pub const COST_TAG: &str = "Cost";

/// Decide the family of one resource.
#[must_use]
pub fn classify(resource: &SourceResource) -> ResourceFamily {
    match resource.category.as_deref().map(str::trim) {
        Some(tag) if tag.eq_ignore_ascii_case(MATERIAL_TAG) => ResourceFamily::Material,
        Some(tag) if tag.eq_ignore_ascii_case(COST_TAG) => ResourceFamily::Cost,
        _ => ResourceFamily::People,
    }
}

/// Families that occur in the given resource pool, in canonical order.
#[must_use]
pub fn families_present(resources: &[SourceResource]) -> Vec<ResourceFamily> {
    ResourceFamily::ALL
        .into_iter()
        .filter(|family| resources.iter().any(|r| classify(r) == *family))
        .collect()
}

/// Column ids on the resource sheet that assignment columns source from.
#[derive(Debug, Clone, Copy)]
pub struct ResourceColumnRefs {
    pub sheet_id: SheetId,
    /// Contact column carrying People identities.
    pub contact: ColumnId,
    /// Text column carrying Material names.
    pub material: ColumnId,
    /// Text column carrying Cost center names.
    pub cost: ColumnId,
}

/// Title of the task-sheet assignment column for one family.
#[must_use]
pub const fn assignment_column_title(family: ResourceFamily) -> &'static str {
    match family {
        ResourceFamily::People => "Assigned People",
        ResourceFamily::Material => "Assigned Materials",
        ResourceFamily::Cost => "Assigned Cost Centers",
    }
}

/// Build the task-sheet column spec for one family's assignments.
///
/// All three are multi-valued; People sources contacts from the resource
/// sheet's contact column, the other two source text values from their
/// plain-text columns. The cross-sheet link requires stable column ids on
/// the resource sheet, which is why assignment configuration runs last in
/// the pipeline.
#[must_use]
pub fn assignment_column_spec(family: ResourceFamily, refs: ResourceColumnRefs) -> ColumnSpec {
    let (kind, column_id) = match family {
        ResourceFamily::People => (ColumnKind::MultiContactList, refs.contact),
        ResourceFamily::Material => (ColumnKind::MultiPicklist, refs.material),
        ResourceFamily::Cost => (ColumnKind::MultiPicklist, refs.cost),
    };
    ColumnSpec::sourced(
        assignment_column_title(family),
        kind,
        SourceLink {
            sheet_id: refs.sheet_id,
            column_id,
        },
    )
}
