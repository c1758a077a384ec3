//! Foreign-key edge resolver.
//!
//! Runs after layout: reads the geometry and cell-identifier lookups, never
//! table data. Constraints that cannot be resolved against the rendered set
//! are dropped without error.

use crate::layout::Layout;
use crate::schema::Table;

/// Schema qualifier stripped from dotted paths when it leads.
const SCHEMA_PREFIX: &str = "public";

/// Edge identifiers count up from here, disjoint from node and cell ids.
const FIRST_EDGE_ID: u64 = 10000;

/// A drawable connector between two column cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub source_cell: String,
    pub target_cell: String,
    /// Exit point: right edge of the source node at its header line.
    pub source_point: (f64, f64),
    /// Entry point: left edge of the target node at its header line.
    pub target_point: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Endpoint<'a> {
    table: &'a str,
    column: &'a str,
}

/// Split a dotted path into table and column names.
///
/// Paths shorter than 3 segments are malformed and yield `None`. The column
/// is always the last segment; the table is the first, or the second when
/// the path is schema-qualified (`public.requests.requester_id`).
fn parse_endpoint(path: &str) -> Option<Endpoint<'_>> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 3 {
        return None;
    }
    let table = if parts[0] == SCHEMA_PREFIX {
        parts[1]
    } else {
        parts[0]
    };
    Some(Endpoint {
        table,
        column: parts[parts.len() - 1],
    })
}

fn resolve_cell<'a>(layout: &'a Layout, endpoint: Endpoint<'_>) -> Option<&'a str> {
    layout
        .cell_ids
        .get(endpoint.table)?
        .get(endpoint.column)
        .map(String::as_str)
}

/// Emit one edge per constraint whose endpoints both resolve to rendered
/// cells.
pub fn resolve_edges(tables: &[Table], layout: &Layout) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut next_id = FIRST_EDGE_ID;

    for table in tables {
        for fk in &table.foreign_key_constraints {
            if fk.source.is_empty() || fk.target.is_empty() {
                continue;
            }
            let Some(source) = parse_endpoint(&fk.source) else {
                continue;
            };
            let Some(target) = parse_endpoint(&fk.target) else {
                continue;
            };
            let Some(source_cell) = resolve_cell(layout, source) else {
                continue;
            };
            let Some(target_cell) = resolve_cell(layout, target) else {
                continue;
            };
            // Both cells resolved, so the node boxes exist too.
            let src = layout.positions[source.table];
            let tgt = layout.positions[target.table];

            edges.push(Edge {
                id: format!("edge-{next_id}"),
                source_cell: source_cell.to_string(),
                target_cell: target_cell.to_string(),
                source_point: (src.x + src.width, src.y + layout.header_height),
                target_point: (tgt.x, tgt.y + layout.header_height),
            });
            next_id += 1;
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridLayout;
    use crate::schema::{Column, ForeignKey, Table};

    fn table(name: &str, column_names: &[&str], fks: &[(&str, &str)]) -> Table {
        Table {
            name: name.to_string(),
            columns: column_names
                .iter()
                .map(|n| Column {
                    name: n.to_string(),
                    data_type: "uuid".to_string(),
                    options: vec![],
                    enums: vec![],
                })
                .collect(),
            primary_keys: vec![],
            foreign_key_constraints: fks
                .iter()
                .map(|(s, t)| ForeignKey {
                    source: s.to_string(),
                    target: t.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_parse_qualified_endpoint() {
        let ep = parse_endpoint("public.requests.requester_id").unwrap();
        assert_eq!(ep.table, "requests");
        assert_eq!(ep.column, "requester_id");
    }

    #[test]
    fn test_parse_unqualified_endpoint() {
        let ep = parse_endpoint("requests.extra.requester_id").unwrap();
        assert_eq!(ep.table, "requests");
        assert_eq!(ep.column, "requester_id");
    }

    #[test]
    fn test_short_path_is_malformed() {
        assert_eq!(parse_endpoint("bad"), None);
        assert_eq!(parse_endpoint("users.id"), None);
    }

    #[test]
    fn test_resolvable_constraint_emits_one_edge() {
        let tables = vec![
            table("users", &["id"], &[]),
            table(
                "requests",
                &["id", "requester_id"],
                &[("public.requests.requester_id", "public.users.id")],
            ),
        ];
        let layout = GridLayout::default().layout(&tables);
        let edges = resolve_edges(&tables, &layout);

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].id, "edge-10000");
        assert_eq!(edges[0].source_cell, "requests-requester_id");
        assert_eq!(edges[0].target_cell, "users-id");
    }

    #[test]
    fn test_routing_points_sit_at_header_line() {
        let tables = vec![
            table("users", &["id"], &[]),
            table(
                "requests",
                &["requester_id"],
                &[("public.requests.requester_id", "public.users.id")],
            ),
        ];
        let layout = GridLayout::default().layout(&tables);
        let edges = resolve_edges(&tables, &layout);

        // requests is the second node: x = 700. Source exits its right edge.
        assert_eq!(edges[0].source_point, (1000.0, 80.0));
        // users is the first node: edge enters its left edge.
        assert_eq!(edges[0].target_point, (50.0, 80.0));
    }

    #[test]
    fn test_malformed_paths_are_dropped() {
        let tables = vec![
            table("users", &["id"], &[("bad", "public.users.id")]),
            table("posts", &["id"], &[("", "public.users.id")]),
        ];
        let layout = GridLayout::default().layout(&tables);

        assert!(resolve_edges(&tables, &layout).is_empty());
    }

    #[test]
    fn test_unrendered_endpoints_are_dropped() {
        let tables = vec![table(
            "requests",
            &["requester_id"],
            &[
                ("public.requests.requester_id", "public.missing.id"),
                ("public.requests.no_such_column", "public.requests.requester_id"),
            ],
        )];
        let layout = GridLayout::default().layout(&tables);

        assert!(resolve_edges(&tables, &layout).is_empty());
    }

    #[test]
    fn test_edge_ids_are_monotonic() {
        let tables = vec![
            table("users", &["id"], &[]),
            table(
                "requests",
                &["requester_id", "approver_id"],
                &[
                    ("public.requests.requester_id", "public.users.id"),
                    ("public.requests.approver_id", "public.users.id"),
                ],
            ),
        ];
        let layout = GridLayout::default().layout(&tables);
        let edges = resolve_edges(&tables, &layout);

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].id, "edge-10000");
        assert_eq!(edges[1].id, "edge-10001");
    }
}
