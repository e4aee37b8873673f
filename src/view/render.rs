use askama::Template;

use crate::domain::cart::{Cart, CartLine};

pub const CURRENCY_PREFIX: &str = "Rp";
pub const EMPTY_CART_HTML: &str = "<p>Keranjang kosong.</p>";

/// Format whole rupiah with `.` thousands separators: `25000` → `Rp25.000`.
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}{}", CURRENCY_PREFIX, sign, grouped)
}

/// Plain text run through the HTML escaper.
#[derive(Template)]
#[template(source = "{{ text }}", ext = "html")]
struct EscapedText<'a> {
    text: &'a str,
}

/// HTML-escape `s` the same way the cart templates escape their fields.
pub fn escape_html(s: &str) -> String {
    // Escaping a plain string has no failure path.
    EscapedText { text: s }.render().unwrap_or_default()
}

/// Display data for one cart row.
pub struct CartItemView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub price: String,
    pub qty: u32,
}

impl<'a> From<&'a CartLine> for CartItemView<'a> {
    fn from(line: &'a CartLine) -> Self {
        Self {
            id: &line.id,
            name: &line.name,
            price: format_rupiah(line.price),
            qty: line.qty,
        }
    }
}

/// Cart rows fragment. Every field is HTML-escaped on output.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% for item in items %}<div class="cart-item"><div class="ci-left"><div class="ci-name">{{ item.name }}</div><div class="ci-price">{{ item.price }} x {{ item.qty }}</div></div><div class="qty-controls"><button class="dec" data-id="{{ item.id }}">-</button><div>{{ item.qty }}</div><button class="inc" data-id="{{ item.id }}">+</button><button class="remove" data-id="{{ item.id }}" title="Hapus">🗑</button></div></div>{% endfor %}"#
)]
pub struct CartItemsTemplate<'a> {
    pub items: Vec<CartItemView<'a>>,
}

/// Rendered contents of the cart modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedList {
    pub items_html: String,
    pub total: i64,
    pub total_text: String,
}

/// Render every line in cart order, or the empty-cart placeholder.
pub fn render_list(cart: &Cart) -> Result<RenderedList, askama::Error> {
    if cart.is_empty() {
        return Ok(RenderedList {
            items_html: EMPTY_CART_HTML.to_string(),
            total: 0,
            total_text: format_rupiah(0),
        });
    }
    let total = cart
        .lines()
        .fold(0i64, |acc, line| acc.saturating_add(line.subtotal()));
    let items_html = CartItemsTemplate {
        items: cart.lines().map(CartItemView::from).collect(),
    }
    .render()?;
    Ok(RenderedList {
        items_html,
        total,
        total_text: format_rupiah(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_groups_thousands_with_dots() {
        assert_eq!(format_rupiah(0), "Rp0");
        assert_eq!(format_rupiah(999), "Rp999");
        assert_eq!(format_rupiah(1000), "Rp1.000");
        assert_eq!(format_rupiah(25000), "Rp25.000");
        assert_eq!(format_rupiah(1_234_567), "Rp1.234.567");
        assert_eq!(format_rupiah(-50000), "Rp-50.000");
    }

    #[test]
    fn escape_neutralizes_markup_characters() {
        let escaped = escape_html(r#"<script>alert("x & y")</script>"#);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains("x & y"));
        assert_eq!(escape_html("Nasi Goreng"), "Nasi Goreng");
    }

    #[test]
    fn empty_cart_renders_placeholder_and_zero_total() {
        let rendered = render_list(&Cart::new()).unwrap();
        assert_eq!(rendered.items_html, EMPTY_CART_HTML);
        assert_eq!(rendered.total_text, "Rp0");
    }

    #[test]
    fn rows_show_unit_price_and_qty_with_controls() {
        let mut cart = Cart::new();
        cart.add("a1", "Nasi Goreng", 25000, 2);
        let rendered = render_list(&cart).unwrap();
        assert!(rendered.items_html.contains(r#"<div class="ci-name">Nasi Goreng</div>"#));
        assert!(rendered.items_html.contains("Rp25.000 x 2"));
        assert!(rendered.items_html.contains("<div>2</div>"));
        for class in ["dec", "inc", "remove"] {
            assert!(rendered
                .items_html
                .contains(&format!(r#"class="{class}" data-id="a1""#)));
        }
        assert_eq!(rendered.total_text, "Rp50.000");
    }

    #[test]
    fn script_names_render_as_text() {
        let mut cart = Cart::new();
        cart.add("x", "<script>alert(1)</script>", 1000, 1);
        let html = render_list(&cart).unwrap().items_html;
        assert!(!html.contains("<script>"));
        assert!(html.contains(&escape_html("<script>alert(1)</script>")));
    }

    #[test]
    fn ids_are_escaped_inside_attributes() {
        let id = r#"a"><b"#;
        let mut cart = Cart::new();
        cart.add(id, "Sate", 1000, 1);
        let html = render_list(&cart).unwrap().items_html;
        assert!(!html.contains(r#"data-id="a">"#));
        assert!(html.contains(&format!(r#"data-id="{}""#, escape_html(id))));
    }

    #[test]
    fn total_sums_subtotals_in_order() {
        let mut cart = Cart::new();
        cart.add("a", "Sate", 30000, 2);
        cart.add("b", "Es Teh", 5000, 3);
        let rendered = render_list(&cart).unwrap();
        assert_eq!(rendered.total, 75000);
        assert_eq!(rendered.total_text, "Rp75.000");
        let sate = rendered.items_html.find("Sate").unwrap();
        let teh = rendered.items_html.find("Es Teh").unwrap();
        assert!(sate < teh);
    }
}
