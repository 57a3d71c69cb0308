use serde::{Deserialize, Deserializer, Serialize};

/// Pedido devuelto por la búsqueda. Inmutable para el cliente.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// El backend lo envía como número o como string; siempre se guarda como string
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Order {
    /// Referencia para mostrar, o "#<id>" si el pedido no tiene
    pub fn display_reference(&self) -> String {
        self.reference
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    #[serde(rename = "to-pack")]
    ToPack,
    #[serde(rename = "packed")]
    Packed,
    #[serde(rename = "shipped")]
    Shipped,
    #[serde(untagged)]
    Unknown(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ToPack => "to-pack",
            Self::Packed => "packed",
            Self::Shipped => "shipped",
            Self::Unknown(raw) => raw,
        }
    }
}

/// Envoltorio paginado de /orders/
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersPage {
    pub count: u64,
    #[serde(default)]
    pub results: Vec<Order>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// Cómo continuar tras una búsqueda
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    NoMatch,
    Single(Order),
    Multiple(Vec<Order>),
}

impl SearchOutcome {
    pub fn from_orders(mut orders: Vec<Order>) -> Self {
        match orders.len() {
            0 => Self::NoMatch,
            1 => Self::Single(orders.remove(0)),
            _ => Self::Multiple(orders),
        }
    }

    pub fn orders(&self) -> &[Order] {
        match self {
            Self::NoMatch => &[],
            Self::Single(order) => std::slice::from_ref(order),
            Self::Multiple(orders) => orders,
        }
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}
