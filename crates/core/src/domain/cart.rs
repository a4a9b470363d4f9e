use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};

/// Largest quantity a single cart line holds. Larger requests are clamped.
pub const MAX_LINE_QUANTITY: u32 = 9_999;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CartAction {
    Add(Product),
    /// Quantities of zero or below remove the line.
    SetQuantity { product_id: ProductId, quantity: i64 },
    Remove(ProductId),
    Clear,
}

/// Shopping cart state. Every present line has a quantity of at least one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Add(product) => {
                match self.items.iter_mut().find(|item| item.product.id == product.id) {
                    Some(item) => {
                        item.quantity = item.quantity.saturating_add(1).min(MAX_LINE_QUANTITY)
                    }
                    None => self.items.push(CartItem { product, quantity: 1 }),
                }
            }
            CartAction::SetQuantity { product_id, quantity } => {
                if quantity <= 0 {
                    self.items.retain(|item| item.product.id != product_id);
                } else {
                    let quantity =
                        u32::try_from(quantity).unwrap_or(u32::MAX).min(MAX_LINE_QUANTITY);
                    if let Some(item) =
                        self.items.iter_mut().find(|item| item.product.id == product_id)
                    {
                        item.quantity = quantity;
                    }
                }
            }
            CartAction::Remove(product_id) => {
                self.items.retain(|item| item.product.id != product_id);
            }
            CartAction::Clear => self.items.clear(),
        }
        self
    }

    pub fn add(self, product: Product) -> Self {
        self.apply(CartAction::Add(product))
    }

    pub fn update_quantity(self, product_id: &ProductId, quantity: i64) -> Self {
        self.apply(CartAction::SetQuantity { product_id: product_id.clone(), quantity })
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| &item.product.id == product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().fold(0u32, |count, item| count.saturating_add(item.quantity))
    }
}
