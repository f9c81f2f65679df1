//! Compiler policies that the source format leaves implicit.

use serde::{Deserialize, Serialize};

/// What happens when two property names normalize to the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// A renamed entry replaces whatever holds its canonical name; an entry
    /// already in canonical form never displaces one. Among renamed entries
    /// the later one wins.
    #[default]
    PreferRenamed,
    /// The entry later in source order replaces the earlier one.
    KeepLast,
    /// The first entry in source order is kept, later ones are dropped.
    KeepFirst,
}

/// Order in which types receive their embedded foreign types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedOrder {
    /// Document order. A copied type carries only the embeddings it has
    /// received so far, so chains of foreign types depend on type order.
    #[default]
    Declaration,
    /// Referenced types are embedded into before they are copied anywhere,
    /// so every copy is complete. Cycles are rejected.
    Dependencies,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub collision_policy: CollisionPolicy,
    pub embed_order: EmbedOrder,
}
