use serde::{Deserialize, Serialize};

/// Lifecycle status of a synced marketplace order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    /// Case-insensitive parse, used for pass-through of raw marketplace
    /// values that already spell an enum member.
    pub fn from_str_lenient(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            "refunded" => Some(OrderStatus::Refunded),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parse_accepts_any_case() {
        assert_eq!(
            OrderStatus::from_str_lenient("Shipped"),
            Some(OrderStatus::Shipped)
        );
        assert_eq!(OrderStatus::from_str_lenient("REFUNDED"), Some(OrderStatus::Refunded));
        assert_eq!(OrderStatus::from_str_lenient("IN_TRANSIT"), None);
    }
}
