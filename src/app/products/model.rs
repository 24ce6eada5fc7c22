//! 商品数据模型

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::common::CoreError;

/// 未提供分类时使用的默认分类
pub const DEFAULT_CATEGORY: &str = "uncategorized";

pub const MISSING_REQUIRED: &str = "name and price are required";
pub const INVALID_PRICE: &str = "price must be a non-negative number";

/// 数量上限 2^53 - 1，超过后 JSON 客户端无法精确表示
pub const MAX_QUANTITY: u64 = (1 << 53) - 1;

/// 商品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "abc123",
    "name": "Enamel stockpot 5l",
    "category": "Pots",
    "description": "Classic enamelled pot",
    "price": 1200,
    "quantity": 30
}))]
pub struct Product {
    /// 创建时生成的 ID，之后不再变化
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    /// 库存数量
    pub quantity: u64,
}

/// 创建与更新接口接收的请求体
///
/// 字段保持原始 JSON 值，按宽松规则解释：字符串形式的数字可以作为价格，
/// `null` 与缺失等价。
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductInput {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Cast iron cauldron 12l")]
    pub name: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub category: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 3500)]
    pub price: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<u64>)]
    pub quantity: Option<Value>,
}

impl ProductInput {
    /// 解析请求体；空请求体视为 `{}`
    pub fn from_body(body: &[u8]) -> Result<Self, CoreError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| CoreError::MalformedBody(format!("invalid JSON body: {e}")))?;
        if !value.is_object() {
            return Err(CoreError::MalformedBody(
                "request body must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| CoreError::MalformedBody(format!("invalid JSON body: {e}")))
    }
}

/// 通过校验、可以直接写入存储的新商品
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: u64,
}

impl NewProduct {
    pub fn from_input(input: ProductInput) -> Result<Self, CoreError> {
        let (name, price) = match (&input.name, &input.price) {
            (Some(name), Some(price)) if is_truthy(name) && is_truthy(price) => (name, price),
            _ => return Err(CoreError::Validation(MISSING_REQUIRED.to_string())),
        };

        Ok(Self {
            name: to_text("name", name)?,
            category: truthy_text("category", input.category.as_ref())?,
            description: truthy_text("description", input.description.as_ref())?,
            price: to_price(price)?,
            quantity: input
                .quantity
                .as_ref()
                .and_then(to_number)
                .map(to_quantity)
                .unwrap_or(0),
        })
    }
}

/// 部分更新：只包含需要覆盖的字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u64>,
}

impl ProductPatch {
    /// 文本字段与价格只在取值为真时覆盖，因此无法通过更新把价格改为 0；
    /// 数量只要出现就覆盖，无效数字按 0 处理。
    pub fn from_input(input: ProductInput) -> Result<Self, CoreError> {
        let price = match input.price.as_ref() {
            Some(price) if is_truthy(price) => Some(to_price(price)?),
            _ => None,
        };

        Ok(Self {
            name: truthy_text("name", input.name.as_ref())?,
            category: truthy_text("category", input.category.as_ref())?,
            description: truthy_text("description", input.description.as_ref())?,
            price,
            quantity: input
                .quantity
                .as_ref()
                .map(|q| to_number(q).map(to_quantity).unwrap_or(0)),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}

/// JSON 值的真值判断：`null`、`false`、`0`、空字符串为假
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0 && f.is_finite()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 数字转换：字符串去除首尾空白后解析，空字符串为 0；无法转换时返回 `None`
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().ok()?
            }
        }
        Value::Array(_) | Value::Object(_) => return None,
    };

    number.is_finite().then_some(number)
}

fn to_text(field: &str, value: &Value) -> Result<String, CoreError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(CoreError::Validation(format!("{field} must be text"))),
    }
}

fn truthy_text(field: &str, value: Option<&Value>) -> Result<Option<String>, CoreError> {
    match value {
        Some(value) if is_truthy(value) => to_text(field, value).map(Some),
        _ => Ok(None),
    }
}

fn to_price(value: &Value) -> Result<f64, CoreError> {
    match to_number(value) {
        Some(price) if price >= 0.0 => Ok(price),
        _ => Err(CoreError::Validation(INVALID_PRICE.to_string())),
    }
}

fn to_quantity(number: f64) -> u64 {
    if number > 0.0 {
        (number.trunc() as u64).min(MAX_QUANTITY)
    } else {
        0
    }
}
