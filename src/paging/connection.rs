//! Connection shapes returned to resolvers

use crate::paging::cursor::Cursor;
use serde::{Deserialize, Serialize};

/// Slicing arguments of a connection field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionArgs {
    /// Return items after this cursor
    pub after: Option<Cursor>,
    /// Return items before this cursor
    pub before: Option<Cursor>,
    /// Return at most this many items from the front of the window
    pub first: Option<usize>,
    /// Return at most this many items from the back of the window
    pub last: Option<usize>,
}

impl ConnectionArgs {
    /// Take the first `n` items
    pub fn first(n: usize) -> Self {
        Self {
            first: Some(n),
            ..Self::default()
        }
    }

    /// Take the last `n` items
    pub fn last(n: usize) -> Self {
        Self {
            last: Some(n),
            ..Self::default()
        }
    }

    /// Only consider items after `cursor`
    pub fn after(mut self, cursor: Cursor) -> Self {
        self.after = Some(cursor);
        self
    }

    /// Only consider items before `cursor`
    pub fn before(mut self, cursor: Cursor) -> Self {
        self.before = Some(cursor);
        self
    }
}

/// Paging metadata of one connection result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<Cursor>,
    pub end_cursor: Option<Cursor>,
}

/// One item of a connection with its cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: Cursor,
}

/// A page of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Build a connection, deriving start and end cursors from the edges
    pub fn new(edges: Vec<Edge<T>>, has_previous_page: bool, has_next_page: bool) -> Self {
        let page_info = PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };
        Self { edges, page_info }
    }

    /// A connection with no edges and both page flags false
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
        }
    }

    /// Shape each node, keeping cursors and page info
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Connection<U> {
        Connection {
            edges: self
                .edges
                .into_iter()
                .map(|edge| Edge {
                    node: f(edge.node),
                    cursor: edge.cursor,
                })
                .collect(),
            page_info: self.page_info,
        }
    }

    /// Borrow the nodes in order
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_graphql_field_names() {
        let conn = Connection::new(
            vec![Edge {
                node: "a",
                cursor: Cursor::offset(0),
            }],
            false,
            true,
        );
        let json = serde_json::to_value(&conn).unwrap();

        assert_eq!(json["pageInfo"]["hasNextPage"], true);
        assert_eq!(json["pageInfo"]["hasPreviousPage"], false);
        assert_eq!(json["pageInfo"]["startCursor"], json["edges"][0]["cursor"]);
        assert_eq!(json["edges"][0]["node"], "a");
    }

    #[test]
    fn map_keeps_cursors() {
        let conn = Connection::new(
            vec![Edge {
                node: 1,
                cursor: Cursor::offset(7),
            }],
            true,
            false,
        );
        let mapped = conn.map(|n| n * 10);
        assert_eq!(mapped.edges[0].node, 10);
        assert_eq!(mapped.edges[0].cursor, Cursor::offset(7));
        assert!(mapped.page_info.has_previous_page);
    }
}
