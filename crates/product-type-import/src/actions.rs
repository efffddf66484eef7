use serde::{Deserialize, Serialize};

use crate::definition::{AttributeDefinition, ProductType, ProductTypeDraft};

/// A single catalog mutation.
///
/// Additive only: the remote service treats existing attributes as
/// immutable once created, so the diff never emits removals, renames,
/// or edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum UpdateAction {
    AddAttributeDefinition { attribute: AttributeDefinition },
}

/// Compute the update actions that bring `existing` up to date with
/// `new`: one `addAttributeDefinition` per attribute of `new` whose
/// name is absent from `existing`, in the relative order of
/// `new.attributes`. Attributes already present remotely are left
/// untouched even if their payloads differ.
pub fn build_update_actions(
    new: &ProductTypeDraft,
    existing: &ProductType,
) -> Vec<UpdateAction> {
    new.attributes
        .iter()
        .filter(|attribute| {
            !existing.attributes.iter().any(|present| {
                match (present.name(), attribute.name()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            })
        })
        .cloned()
        .map(|attribute| UpdateAction::AddAttributeDefinition { attribute })
        .collect()
}
