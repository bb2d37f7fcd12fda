//! Text rendering of the cart panel.

use crate::model::CartLine;

const EMPTY_HINT: &str = "Cart\nNo parts added yet. Pick a hotspot on a diagram to add parts.\n";

/// `"1 item"` / `"3 items"`.
#[must_use]
pub fn item_count_label(total: u64) -> String {
    if total == 1 {
        "1 item".to_string()
    } else {
        format!("{total} items")
    }
}

/// Renders the cart lines with their quantities under a header carrying
/// `total`, the cart's item count.
#[must_use]
pub fn render_cart(lines: &[CartLine], total: u64) -> String {
    if lines.is_empty() {
        return EMPTY_HINT.to_string();
    }

    let labels: Vec<String> = lines.iter().map(CartLine::label).collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = format!("Cart ({})\n", item_count_label(total));
    for (line, label) in lines.iter().zip(&labels) {
        let (quantity, id) = (line.quantity, &line.id);
        out.push_str(&format!("  {label:<label_width$}  x{quantity}  [{id}]\n"));
    }
    out
}
