//! Column type definitions for Tillage schemas.

/// Default bound for string columns declared without `max_length`.
pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Semantic type of a column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Signed integer.
    Integer,
    /// Bounded text.
    String {
        /// Maximum length in characters.
        max_length: usize,
    },
    /// Integer identity of a row in another table.
    ForeignKey {
        /// Referenced table. `None` only for lenient declarations that
        /// omitted `references=`.
        references: Option<String>,
    },
}

impl ColumnType {
    /// Returns whether values of this type are stored as integers.
    pub fn is_integer(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::ForeignKey { .. })
    }

    /// Returns a short name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::String { .. } => "string",
            ColumnType::ForeignKey { .. } => "foreign key",
        }
    }
}

/// Sort order for ordered listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl Order {
    /// SQL keyword for this order.
    pub fn keyword(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}
