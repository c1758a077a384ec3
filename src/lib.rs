pub mod drawio;
pub mod edge;
pub mod label;
pub mod layout;
pub mod merge;
pub mod schema;
pub mod style;

use wasm_bindgen::prelude::*;

use drawio::{DrawioRenderer, PageConfig};
use edge::resolve_edges;
use layout::GridLayout;
use schema::Table;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render a schema export JSON string to a draw.io document
#[wasm_bindgen(js_name = "schemaToDrawio")]
pub fn render_schema(json: &str, diagram_name: Option<String>) -> Result<String, String> {
    let tables = schema::tables_from_json(json).map_err(|e| e.to_string())?;

    let mut page = PageConfig::default();
    if let Some(name) = diagram_name {
        page.diagram_name = name;
    }

    Ok(generate_diagram(&tables, page))
}

/// Run the layout, edge resolution, and serialization phases over a loaded
/// table list.
pub fn generate_diagram(tables: &[Table], page: PageConfig) -> String {
    let layout = GridLayout::default().layout(tables);
    let edges = resolve_edges(tables, &layout);
    DrawioRenderer::new(page).render(&layout, &edges)
}
