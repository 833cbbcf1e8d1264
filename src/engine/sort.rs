/// Field a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Orderings selectable through the `sort` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// `latest`: newest first
    Latest,
    /// `oldest`: oldest first
    Oldest,
    /// `a-z`: position ascending
    AToZ,
    /// `z-a`: position descending
    ZToA,
}

impl SortOrder {
    /// Resolve a sort keyword.
    ///
    /// Unknown or missing keywords resolve to `None`: no ORDER BY is sent and
    /// rows come back in whatever order the store produces. That order is not
    /// stable across requests.
    pub fn resolve(keyword: Option<&str>) -> Option<SortOrder> {
        match keyword.map(str::trim)? {
            "latest" => Some(SortOrder::Latest),
            "oldest" => Some(SortOrder::Oldest),
            "a-z" => Some(SortOrder::AToZ),
            "z-a" => Some(SortOrder::ZToA),
            _ => None,
        }
    }

    pub fn key(self) -> (SortField, Direction) {
        match self {
            SortOrder::Latest => (SortField::CreatedAt, Direction::Descending),
            SortOrder::Oldest => (SortField::CreatedAt, Direction::Ascending),
            SortOrder::AToZ => (SortField::Position, Direction::Ascending),
            SortOrder::ZToA => (SortField::Position, Direction::Descending),
        }
    }

    /// ORDER BY body for the jobs table.
    ///
    /// `id` breaks ties in the same direction, so opposite orders are exact
    /// reversals and OFFSET paging never repeats or skips a row.
    pub fn sql(self) -> &'static str {
        match self.key() {
            (SortField::CreatedAt, Direction::Descending) => "created_at DESC, id DESC",
            (SortField::CreatedAt, Direction::Ascending) => "created_at ASC, id ASC",
            (SortField::Position, Direction::Ascending) => "position ASC, id ASC",
            (SortField::Position, Direction::Descending) => "position DESC, id DESC",
        }
    }
}
