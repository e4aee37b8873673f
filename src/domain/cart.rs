/// One product entry in the cart.
///
/// `price` is in whole currency units (rupiah carry no decimals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub qty: u32,
}

impl CartLine {
    /// `price * qty`, saturating at the `i64` bounds.
    pub fn subtotal(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.qty))
    }
}

/// Mapping from item id to [`CartLine`], iterated in insertion order.
///
/// Every line held here has `qty >= 1`; operations that would drop a line to
/// zero remove it instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Insert a line, replacing any existing line with the same id in place.
    ///
    /// Lines with `qty == 0` are not stored.
    pub fn insert(&mut self, line: CartLine) {
        match self.lines.iter().position(|l| l.id == line.id) {
            Some(_) if line.qty == 0 => {
                self.remove(&line.id);
            }
            Some(idx) => self.lines[idx] = line,
            None if line.qty == 0 => {}
            None => self.lines.push(line),
        }
    }

    /// Add `qty` units of `id`, creating the line at zero first when absent.
    /// The stored name and price of an existing line are kept.
    pub fn add(&mut self, id: &str, name: &str, price: i64, qty: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.qty = line.qty.saturating_add(qty);
            return;
        }
        self.insert(CartLine {
            id: id.to_string(),
            name: name.to_string(),
            price,
            qty,
        });
    }

    /// Shift the quantity of `id` by `delta`. Returns `false` when the line is
    /// absent. A resulting quantity of zero or less removes the line.
    pub fn change_qty(&mut self, id: &str, delta: i64) -> bool {
        let Some(idx) = self.lines.iter().position(|l| l.id == id) else {
            return false;
        };
        let next = i64::from(self.lines[idx].qty).saturating_add(delta);
        if next <= 0 {
            self.lines.remove(idx);
        } else {
            self.lines[idx].qty = u32::try_from(next).unwrap_or(u32::MAX);
        }
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| l.id == id)?;
        Some(self.lines.remove(idx))
    }

    /// Sum of `price * qty` over every line.
    pub fn total(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.subtotal()))
    }

    /// Number of units across all lines, as shown on the indicator badge.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.qty)).sum()
    }
}
