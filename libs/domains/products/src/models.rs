use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Largest value a `NUMERIC(10,2)` column holds.
const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Product as stored in the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Unit price with two decimal places, serialized as a string
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub category: Option<String>,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Whether at least `quantity` units are on hand
    pub fn can_fulfil(&self, quantity: i32) -> bool {
        self.stock_quantity >= quantity
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(
        length(min = 1, max = 255),
        custom(function = "not_blank", message = "name must not be blank")
    )]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "valid_price"))]
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub category: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock_quantity: i32,
}

/// DTO for replacing an existing product.
///
/// Every field is written; an omitted `description` or `category` clears it.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(
        length(min = 1, max = 255),
        custom(function = "not_blank", message = "name must not be blank")
    )]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "valid_price"))]
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub category: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock_quantity: i32,
}

impl From<CreateProduct> for UpdateProduct {
    fn from(input: CreateProduct) -> Self {
        Self {
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            stock_quantity: input.stock_quantity,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PriceRangeQuery {
    /// Inclusive lower bound
    #[param(value_type = String, example = "10.00")]
    pub min_price: Decimal,
    /// Inclusive upper bound
    #[param(value_type = String, example = "50.00")]
    pub max_price: Decimal,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MaxPriceQuery {
    #[param(value_type = String, example = "25.00")]
    pub max_price: Decimal,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-sensitive substring matched against name and description
    pub q: String,
}

#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuantityQuery {
    pub quantity: i32,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn valid_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("price must not be negative".into());
        return Err(err);
    }
    if *price > MAX_PRICE {
        let mut err = ValidationError::new("range");
        err.message = Some("price exceeds 99999999.99".into());
        return Err(err);
    }
    Ok(())
}

/// Escape `%`, `_` and `\` so a user term matches literally inside `LIKE`.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: Decimal, stock: i32) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: None,
            price,
            category: None,
            stock_quantity: stock,
        }
    }

    #[test]
    fn test_max_price_constant() {
        assert_eq!(MAX_PRICE.to_string(), "99999999.99");
    }

    #[test]
    fn test_validation() {
        assert!(input("Widget", Decimal::new(999, 2), 10).validate().is_ok());
        assert!(input("Widget", Decimal::ZERO, 0).validate().is_ok());
        assert!(input("", Decimal::ONE, 0).validate().is_err());
        assert!(input("   ", Decimal::ONE, 0).validate().is_err());
        assert!(input("Widget", Decimal::new(-1, 2), 0).validate().is_err());
        assert!(input("Widget", Decimal::new(100_000_000, 0), 0).validate().is_err());
        assert!(input("Widget", Decimal::ONE, -1).validate().is_err());
    }

    #[test]
    fn test_deserialize_camel_case_and_numeric_price() {
        let json = r#"{"name":"Widget","price":9.99,"stockQuantity":3}"#;
        let parsed: CreateProduct = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.price, Decimal::new(999, 2));
        assert_eq!(parsed.stock_quantity, 3);
        assert!(parsed.description.is_none());

        let json = r#"{"name":"Widget","price":"12.50"}"#;
        let parsed: CreateProduct = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.price, Decimal::new(1250, 2));
        assert_eq!(parsed.stock_quantity, 0);
    }

    #[test]
    fn test_price_serializes_as_string() {
        let product = Product {
            id: 1,
            name: "Widget".into(),
            description: None,
            price: Decimal::new(999, 2),
            category: Some("tools".into()),
            stock_quantity: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], "9.99");
        assert_eq!(value["stockQuantity"], 10);
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
