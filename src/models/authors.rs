use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::names::ToleranceParams;
use crate::names::{AuthorEntry, AuthorListFormat, AuthorPosition, NameError, NameOrder};

/// Author-list layout; omitted fields use the defaults
/// (configured separator, "Last, First" order).
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct FormatParams {
    /// Entry separator (default: `;`)
    pub sep: Option<String>,
    /// One of `","`, `"LAST_FIRST"`, `"FIRST_FIRST"`
    pub order: Option<String>,
    #[serde(default)]
    pub allow_extras: bool,
    #[serde(default)]
    pub super_compact: bool,
}

impl FormatParams {
    pub fn resolve(&self, default_separator: &str) -> Result<AuthorListFormat, NameError> {
        let order = match &self.order {
            Some(order) => order.parse::<NameOrder>()?,
            None => NameOrder::default(),
        };
        let format = AuthorListFormat {
            separator: self
                .sep
                .clone()
                .unwrap_or_else(|| default_separator.to_string()),
            order,
            allow_extras: self.allow_extras,
            super_compact: self.super_compact,
        };
        format.validate()?;
        Ok(format)
    }
}

/// `"FIRST"` or a 0-based index.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PositionParam {
    Index(i64),
    Label(String),
}

impl TryFrom<&PositionParam> for AuthorPosition {
    type Error = NameError;

    fn try_from(param: &PositionParam) -> Result<Self, Self::Error> {
        match param {
            PositionParam::Index(i) => usize::try_from(*i)
                .map(AuthorPosition::Index)
                .map_err(|_| NameError::InvalidPosition(i.to_string())),
            PositionParam::Label(label) => label.parse(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct IsAuthorRequest {
    pub name: Option<String>,
    /// Delimited author list, e.g. "SILVA, Fulano; COSTA, Siclano B."
    pub authors: Option<String>,
    pub position: Option<PositionParam>,
    #[serde(flatten)]
    pub format: FormatParams,
    #[serde(flatten)]
    pub tolerance: ToleranceParams,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SameAuthorsRequest {
    pub a: Option<String>,
    pub b: Option<String>,
    #[serde(flatten)]
    pub format: FormatParams,
    #[serde(flatten)]
    pub tolerance: ToleranceParams,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ParseAuthorsRequest {
    pub authors: String,
    #[serde(flatten)]
    pub format: FormatParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorEntryResponse {
    pub position: usize,
    /// The entry rearranged as "First Middle Last"
    pub name: String,
}

impl From<AuthorEntry> for AuthorEntryResponse {
    fn from(entry: AuthorEntry) -> Self {
        Self {
            position: entry.position,
            name: entry.name,
        }
    }
}
