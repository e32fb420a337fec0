use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use projector_core::BackendKind;

use super::host;

pub fn execute(backend: Option<BackendKind>) {
    let mut controller = host::controller(backend);
    if !controller.initialize() {
        eprintln!(
            "Warning: the {} backend is not available.",
            controller.backend().name()
        );
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Index").set_alignment(CellAlignment::Right),
            Cell::new("Name"),
            Cell::new("X").set_alignment(CellAlignment::Right),
            Cell::new("Y").set_alignment(CellAlignment::Right),
            Cell::new("Width").set_alignment(CellAlignment::Right),
            Cell::new("Height").set_alignment(CellAlignment::Right),
            Cell::new("Scale").set_alignment(CellAlignment::Right),
            Cell::new("Primary"),
        ]);

    let monitors = controller.get_monitors();
    for m in monitors {
        table.add_row(vec![
            Cell::new(m.index).set_alignment(CellAlignment::Right),
            Cell::new(&m.name),
            Cell::new(m.x).set_alignment(CellAlignment::Right),
            Cell::new(m.y).set_alignment(CellAlignment::Right),
            Cell::new(m.width).set_alignment(CellAlignment::Right),
            Cell::new(m.height).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", m.scale_factor)).set_alignment(CellAlignment::Right),
            Cell::new(if m.is_primary { "yes" } else { "" }),
        ]);
    }

    println!("{table}");
    println!("\n{} monitors found", monitors.len());
}
