//! 商品数据模型

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub image: Option<String>,
}

/// 数值输入：接受 JSON 数字或数字字符串（如 `"500"`）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// 价格：任意有限数，不限制正负
    pub fn to_price(&self) -> Result<f64, CoreError> {
        self.as_f64()
            .ok_or_else(|| CoreError::bad_request("Invalid price"))
    }

    /// 库存：必须是整数，不限制正负
    pub fn to_stock(&self) -> Result<i64, CoreError> {
        match self.as_f64() {
            Some(v) if v.fract() == 0.0 && v.abs() <= i64::MAX as f64 => Ok(v as i64),
            _ => Err(CoreError::bad_request("Invalid stock")),
        }
    }
}

impl From<f64> for NumberInput {
    fn from(n: f64) -> Self {
        NumberInput::Number(n)
    }
}

impl From<&str> for NumberInput {
    fn from(s: &str) -> Self {
        NumberInput::Text(s.to_string())
    }
}

/// 创建商品请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<NumberInput>,
    pub stock: Option<NumberInput>,
    pub image: Option<String>,
}

/// 更新商品请求，未出现的字段保持不变
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<NumberInput>,
    pub stock: Option<NumberInput>,
    /// `None`: 字段缺失；`Some(None)`: 显式 `null`，清除图片
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// 校验通过的新商品字段
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub image: Option<String>,
}

/// 校验通过的修改集
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub image: Option<Option<String>>,
}

fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn patched_text(value: Option<String>, field: &str) -> Result<Option<String>, CoreError> {
    match value {
        None => Ok(None),
        Some(v) => match required_text(Some(v)) {
            Some(trimmed) => Ok(Some(trimmed)),
            None => Err(CoreError::bad_request(format!("Field '{}' must not be empty", field))),
        },
    }
}

fn image_ref(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProductInput {
    pub fn validate(self) -> Result<NewProduct, CoreError> {
        let missing = || CoreError::bad_request("Missing required fields");

        let name = required_text(self.name).ok_or_else(missing)?;
        let category = required_text(self.category).ok_or_else(missing)?;
        let description = required_text(self.description).ok_or_else(missing)?;
        let price = self.price.ok_or_else(missing)?.to_price()?;
        let stock = self.stock.ok_or_else(missing)?.to_stock()?;

        Ok(NewProduct {
            name,
            category,
            description,
            price,
            stock,
            image: image_ref(self.image),
        })
    }
}

impl ProductPatch {
    pub fn validate(self) -> Result<ProductChanges, CoreError> {
        Ok(ProductChanges {
            name: patched_text(self.name, "name")?,
            category: patched_text(self.category, "category")?,
            description: patched_text(self.description, "description")?,
            price: self.price.map(|p| p.to_price()).transpose()?,
            stock: self.stock.map(|s| s.to_stock()).transpose()?,
            image: self.image.map(image_ref),
        })
    }
}

impl Product {
    pub fn from_new(id: String, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            category: new.category,
            description: new.description,
            price: new.price,
            stock: new.stock,
            image: new.image,
        }
    }

    /// 应用修改集，只覆盖出现的字段
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(stock) = changes.stock {
            self.stock = stock;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
    }
}

impl ProductChanges {
    /// 本次修改是否会替换掉已有图片
    pub fn replaces_image_of<'a>(&self, product: &'a Product) -> Option<&'a str> {
        match (&self.image, &product.image) {
            (Some(new), Some(old)) if new.as_ref() != Some(old) => Some(old.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> ProductInput {
        serde_json::from_value(value).unwrap()
    }

    fn patch(value: serde_json::Value) -> ProductPatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(NumberInput::from(500.0).to_price().unwrap(), 500.0);
        assert_eq!(NumberInput::from(" 12.5 ").to_price().unwrap(), 12.5);
        assert_eq!(NumberInput::from(-3.0).to_price().unwrap(), -3.0);
        assert!(NumberInput::from("abc").to_price().is_err());
        assert!(NumberInput::from("").to_price().is_err());

        assert_eq!(NumberInput::from("7").to_stock().unwrap(), 7);
        assert_eq!(NumberInput::from(-2.0).to_stock().unwrap(), -2);
        assert!(NumberInput::from(2.5).to_stock().is_err());
    }

    #[test]
    fn test_input_trims_and_defaults_image() {
        let new = input(json!({
            "name": "  Кепка ",
            "category": "Аксессуары",
            "description": " Тест",
            "price": "500",
            "stock": 5,
            "image": ""
        }))
        .validate()
        .unwrap();

        assert_eq!(new.name, "Кепка");
        assert_eq!(new.description, "Тест");
        assert_eq!(new.price, 500.0);
        assert_eq!(new.stock, 5);
        assert_eq!(new.image, None);
    }

    #[test]
    fn test_input_missing_fields() {
        let full = json!({
            "name": "a", "category": "b", "description": "c", "price": 1, "stock": 1
        });
        assert!(input(full.clone()).validate().is_ok());

        for field in ["name", "category", "description", "price", "stock"] {
            let mut body = full.clone();
            body.as_object_mut().unwrap().remove(field);
            let err = input(body).validate().unwrap_err();
            assert!(matches!(err, CoreError::BadRequest(ref m) if m == "Missing required fields"));
        }

        let mut blank = full.clone();
        blank["name"] = json!("   ");
        assert!(input(blank).validate().is_err());

        let mut null_price = full;
        null_price["price"] = serde_json::Value::Null;
        assert!(input(null_price).validate().is_err());
    }

    #[test]
    fn test_patch_distinguishes_null_image() {
        assert_eq!(patch(json!({})).image, None);
        assert_eq!(patch(json!({ "image": null })).image, Some(None));
        assert_eq!(
            patch(json!({ "image": "/images/a.png" })).image,
            Some(Some("/images/a.png".to_string()))
        );
    }

    #[test]
    fn test_patch_null_fields_are_ignored() {
        let changes = patch(json!({
            "name": null,
            "category": null,
            "description": null,
            "price": null,
            "stock": null
        }))
        .validate()
        .unwrap();
        assert_eq!(changes, ProductChanges::default());
    }

    #[test]
    fn test_patch_rejects_blank_text() {
        assert!(patch(json!({ "name": " " })).validate().is_err());
        assert!(patch(json!({ "stock": "x" })).validate().is_err());
        assert_eq!(patch(json!({})).validate().unwrap(), ProductChanges::default());
    }

    #[test]
    fn test_apply_detects_replaced_image() {
        let mut product = Product {
            id: "p1".to_string(),
            name: "a".to_string(),
            category: "b".to_string(),
            description: "c".to_string(),
            price: 1.0,
            stock: 1,
            image: Some("/images/old.png".to_string()),
        };

        let same = ProductChanges {
            image: Some(Some("/images/old.png".to_string())),
            ..Default::default()
        };
        assert_eq!(same.replaces_image_of(&product), None);
        product.apply(same);
        assert_eq!(product.image.as_deref(), Some("/images/old.png"));

        let cleared = ProductChanges {
            image: Some(None),
            ..Default::default()
        };
        assert_eq!(cleared.replaces_image_of(&product), Some("/images/old.png"));
        product.apply(cleared);
        assert_eq!(product.image, None);
        assert_eq!(product.name, "a");
    }
}
