//! Serializer for the draw.io `mxfile` XML dialect.
//!
//! Column cells are children of their table cell in the `parent` attribute
//! sense only; every `mxCell` is serialized flat under `<root>`, which is
//! how draw.io expects stack-layout swimlanes. No XML prolog is emitted,
//! the tool does not need one.

use crate::edge::Edge;
use crate::layout::{Cell, Layout, Node};
use crate::style;
use std::fmt::Write;

/// Document-level settings.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub diagram_name: String,
    pub diagram_id: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            diagram_name: "Database Schema".to_string(),
            diagram_id: "db-schema".to_string(),
        }
    }
}

pub struct DrawioRenderer {
    config: PageConfig,
}

impl Default for DrawioRenderer {
    fn default() -> Self {
        Self::new(PageConfig::default())
    }
}

impl DrawioRenderer {
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Render the positioned nodes and resolved edges into a document.
    pub fn render(&self, layout: &Layout, edges: &[Edge]) -> String {
        let mut xml = String::new();

        writeln!(&mut xml, r#"<mxfile host="app.diagrams.net">"#).unwrap();
        writeln!(
            &mut xml,
            r#"  <diagram name="{}" id="{}">"#,
            escape_xml(&self.config.diagram_name),
            escape_xml(&self.config.diagram_id)
        )
        .unwrap();
        writeln!(
            &mut xml,
            r#"    <mxGraphModel dx="2500" dy="1500" grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="0.5" pageWidth="12000" pageHeight="8000" math="0" shadow="0">"#
        )
        .unwrap();
        writeln!(&mut xml, "      <root>").unwrap();
        writeln!(&mut xml, r#"        <mxCell id="0" />"#).unwrap();
        writeln!(&mut xml, r#"        <mxCell id="1" parent="0" />"#).unwrap();

        for node in &layout.nodes {
            self.render_node(&mut xml, node);
        }
        for edge in edges {
            self.render_edge(&mut xml, edge);
        }

        writeln!(&mut xml, "      </root>").unwrap();
        writeln!(&mut xml, "    </mxGraphModel>").unwrap();
        writeln!(&mut xml, "  </diagram>").unwrap();
        writeln!(&mut xml, "</mxfile>").unwrap();

        xml
    }

    fn render_node(&self, xml: &mut String, node: &Node) {
        writeln!(
            xml,
            r#"        <mxCell id="{}" value="{}" style="{}" vertex="1" parent="1">"#,
            escape_xml(&node.id),
            escape_xml(&node.label),
            style::table_style(node.color)
        )
        .unwrap();
        writeln!(
            xml,
            r#"          <mxGeometry x="{}" y="{}" width="{}" height="{}" as="geometry" />"#,
            node.rect.x, node.rect.y, node.rect.width, node.rect.height
        )
        .unwrap();
        writeln!(xml, "        </mxCell>").unwrap();

        for cell in &node.cells {
            self.render_cell(xml, node, cell);
        }
    }

    fn render_cell(&self, xml: &mut String, node: &Node, cell: &Cell) {
        writeln!(
            xml,
            r#"        <mxCell id="{}" value="{}" style="{}" vertex="1" parent="{}">"#,
            escape_xml(&cell.id),
            escape_xml(&cell.label),
            style::column_style(cell.is_primary_key),
            escape_xml(&node.id)
        )
        .unwrap();
        // Cell geometry is relative to the parent swimlane, x is implied.
        writeln!(
            xml,
            r#"          <mxGeometry y="{}" width="{}" height="{}" as="geometry" />"#,
            cell.y, cell.width, cell.height
        )
        .unwrap();
        writeln!(xml, "        </mxCell>").unwrap();
    }

    fn render_edge(&self, xml: &mut String, edge: &Edge) {
        writeln!(
            xml,
            r#"        <mxCell id="{}" value="" style="{}" edge="1" parent="1" source="{}" target="{}">"#,
            escape_xml(&edge.id),
            style::EDGE_STYLE,
            escape_xml(&edge.source_cell),
            escape_xml(&edge.target_cell)
        )
        .unwrap();
        writeln!(xml, r#"          <mxGeometry relative="1" as="geometry">"#).unwrap();
        writeln!(
            xml,
            r#"            <mxPoint x="{}" y="{}" as="sourcePoint" />"#,
            edge.source_point.0, edge.source_point.1
        )
        .unwrap();
        writeln!(
            xml,
            r#"            <mxPoint x="{}" y="{}" as="targetPoint" />"#,
            edge.target_point.0, edge.target_point.1
        )
        .unwrap();
        writeln!(xml, "          </mxGeometry>").unwrap();
        writeln!(xml, "        </mxCell>").unwrap();
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::resolve_edges;
    use crate::layout::GridLayout;
    use crate::schema::tables_from_json;

    fn render(json: &str) -> String {
        let tables = tables_from_json(json).unwrap();
        let layout = GridLayout::default().layout(&tables);
        let edges = resolve_edges(&tables, &layout);
        DrawioRenderer::default().render(&layout, &edges)
    }

    #[test]
    fn test_empty_document_skeleton() {
        let xml = render("[]");

        assert!(xml.starts_with("<mxfile"));
        assert!(!xml.contains("<?xml"));
        assert!(xml.contains(r#"<diagram name="Database Schema" id="db-schema">"#));
        assert!(xml.contains(r#"<mxCell id="0" />"#));
        assert!(xml.contains(r#"<mxCell id="1" parent="0" />"#));
        assert!(xml.trim_end().ends_with("</mxfile>"));
    }

    #[test]
    fn test_table_and_columns_rendered() {
        let xml = render(
            r#"[{"name": "users",
                 "columns": [{"name": "id", "data_type": "uuid"}],
                 "primary_keys": ["id"]}]"#,
        );

        assert!(xml.contains(r#"<mxCell id="users" value="users""#));
        assert!(xml.contains("swimlane;fontStyle=1"));
        assert!(xml.contains(r#"<mxCell id="users-id""#));
        assert!(xml.contains(r#"parent="users""#));
        assert!(xml.contains(r#"x="50" y="50" width="300" height="66""#));
    }

    #[test]
    fn test_edge_rendered_with_routing_points() {
        let xml = render(
            r#"[
                {"name": "users", "columns": [{"name": "id"}]},
                {"name": "requests",
                 "columns": [{"name": "requester_id"}],
                 "foreign_key_constraints": [
                   {"source": "public.requests.requester_id",
                    "target": "public.users.id"}
                 ]}
            ]"#,
        );

        assert!(xml.contains(r#"<mxCell id="edge-10000""#));
        assert!(xml.contains(r#"source="requests-requester_id" target="users-id""#));
        assert!(xml.contains(r#"<mxPoint x="1000" y="80" as="sourcePoint" />"#));
        assert!(xml.contains(r#"<mxPoint x="50" y="80" as="targetPoint" />"#));
    }

    #[test]
    fn test_attribute_values_escaped() {
        let config = PageConfig {
            diagram_name: "a <b> & \"c\"".to_string(),
            diagram_id: "x".to_string(),
        };
        let layout = GridLayout::default().layout(&[]);
        let xml = DrawioRenderer::new(config).render(&layout, &[]);

        assert!(xml.contains("a &lt;b&gt; &amp; &quot;c&quot;"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let json = r#"[
            {"name": "users", "columns": [{"name": "id"}]},
            {"name": "vehicles", "columns": [{"name": "id"}, {"name": "plate"}]}
        ]"#;

        assert_eq!(render(json), render(json));
    }
}
