//! Table color palette and draw.io cell style strings.

/// Fill and stroke colors for a table box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColor {
    pub fill: &'static str,
    pub stroke: &'static str,
}

/// Keyword rules matched against the lower-cased table name, in order.
/// First match wins; tables matching nothing get the default.
const COLOR_RULES: &[(&str, TableColor)] = &[
    ("users", TableColor { fill: "#dae8fc", stroke: "#6c8ebf" }),
    ("departments", TableColor { fill: "#d5e8d4", stroke: "#82b366" }),
    ("requests", TableColor { fill: "#fff2cc", stroke: "#d6b656" }),
    ("vehicles", TableColor { fill: "#f8cecc", stroke: "#b85450" }),
    ("drivers", TableColor { fill: "#e1d5e7", stroke: "#9673a6" }),
];

const DEFAULT_COLOR: TableColor = TableColor {
    fill: "#ffe6cc",
    stroke: "#d79b00",
};

pub fn table_color(table_name: &str) -> TableColor {
    let lower = table_name.to_lowercase();
    COLOR_RULES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

/// Swimlane style for a table box, parameterized by its palette colors.
pub fn table_style(color: TableColor) -> String {
    format!(
        "swimlane;fontStyle=1;childLayout=stackLayout;horizontal=1;startSize=30;\
         horizontalStack=0;resizeParent=1;resizeParentMax=0;resizeLast=0;collapsible=1;\
         marginBottom=0;whiteSpace=wrap;html=1;fillColor={};strokeColor={};",
        color.fill, color.stroke
    )
}

/// Text row style for a column cell. Primary-key rows are rendered bold.
pub fn column_style(is_primary_key: bool) -> String {
    let base = "text;strokeColor=none;fillColor=none;align=left;verticalAlign=middle;\
                spacingLeft=4;spacingRight=4;overflow=hidden;points=[[0,0.5],[1,0.5]];\
                portConstraint=eastwest;rotatable=0;whiteSpace=wrap;html=1";
    if is_primary_key {
        format!("{base};fontStyle=1")
    } else {
        base.to_string()
    }
}

/// Orthogonal connector style for foreign-key edges.
pub const EDGE_STYLE: &str = "edgeStyle=orthogonalEdgeStyle;rounded=0;orthogonalLoop=1;\
                              jettySize=auto;html=1;strokeWidth=2;strokeColor=#666666;\
                              endArrow=ERmany;endFill=0;";
