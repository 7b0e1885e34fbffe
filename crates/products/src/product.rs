use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use catalog_core::{ProductId, Violations};

const NON_NEGATIVE: &str = "must be greater than or equal to 0";

/// Stock status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    InStock,
    OutOfStock,
    BackOrder,
}

/// Field paths reported in violations (serialized field names).
pub mod fields {
    pub const TITLE: &str = "title";
    pub const PRICE: &str = "price";
    pub const STATUS: &str = "status";
    pub const DATE_ADDED: &str = "dateAdded";
    pub const DESCRIPTION: &str = "description";
    pub const KEYWORDS: &str = "keywords";
    pub const WEIGHT: &str = "weight";
    pub const QUANTITY_IN_STOCK: &str = "quantityInStock";
}

/// Catalog product.
///
/// Every field may be unset so that callers can build partial records and ask
/// [`validate`] what is missing. `id` is assigned by storage.
///
/// Text lengths are counted in characters (Unicode scalar values), not bytes
/// or UTF-16 units: a title of two emoji has length 2.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[validate(
        required(message = "must not be null"),
        length(min = 3, max = 100, message = "size must be between 3 and 100")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "must not be null"),
        custom(function = "non_negative")
    )]
    pub price: Option<Decimal>,
    #[validate(required(message = "must not be null"))]
    pub status: Option<ProductStatus>,
    #[validate(required(message = "must not be null"))]
    pub date_added: Option<DateTime<Utc>>,
    #[validate(length(min = 10, max = 1000, message = "size must be between 10 and 1000"))]
    pub description: Option<String>,
    #[validate(length(min = 0, max = 200, message = "size must be between 0 and 200"))]
    pub keywords: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub weight: Option<f64>,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub quantity_in_stock: Option<i32>,
}

impl Product {
    /// Empty product with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_date_added(mut self, date_added: DateTime<Utc>) -> Self {
        self.date_added = Some(date_added);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_quantity_in_stock(mut self, quantity: i32) -> Self {
        self.quantity_in_stock = Some(quantity);
        self
    }
}

/// Values that can be checked against a lower bound of zero.
trait Signed {
    /// `true` when the value is below zero or not a number.
    fn is_negative_or_nan(&self) -> bool;
}

impl Signed for Decimal {
    fn is_negative_or_nan(&self) -> bool {
        *self < Decimal::ZERO
    }
}

impl Signed for f64 {
    fn is_negative_or_nan(&self) -> bool {
        self.is_nan() || *self < 0.0
    }
}

impl<T: Signed + ?Sized> Signed for &T {
    fn is_negative_or_nan(&self) -> bool {
        (**self).is_negative_or_nan()
    }
}

impl<T: Signed> Signed for Option<T> {
    fn is_negative_or_nan(&self) -> bool {
        self.as_ref().is_some_and(Signed::is_negative_or_nan)
    }
}

/// Lower bound of zero for values `range` cannot check (decimals, NaN floats).
fn non_negative<T: Signed>(value: T) -> Result<(), ValidationError> {
    if value.is_negative_or_nan() {
        let mut err = ValidationError::new("range");
        err.message = Some(NON_NEGATIVE.into());
        return Err(err);
    }
    Ok(())
}

/// Check `product` against its field constraints. Never fails; an empty set
/// means valid.
pub fn validate(product: &Product) -> Violations {
    match product.validate() {
        Ok(()) => Violations::new(),
        Err(errors) => Violations::from(&errors),
    }
}
