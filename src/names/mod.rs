//! Person-name identity resolution: normalization, pairwise matching,
//! author-list parsing and cross-source reconciliation.

pub mod authors;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod reconcile;

pub use authors::{
    is_author, parse_author_list, same_authors, AuthorEntry, AuthorListFormat, AuthorPosition, NameOrder,
};
pub use error::NameError;
pub use matcher::{canonicalize, canonicalize_normalized, is_in, safe_distance, same_name, MatchTolerance};
pub use normalize::{bare, normalize, normalize_compact, NormalizedName};
pub use reconcile::{
    apply_canon_map, canon_maps, canonical_for, CanonMap, ReconcileOptions, Record, MAX_RECONCILE_EDIT_DISTANCE,
};
