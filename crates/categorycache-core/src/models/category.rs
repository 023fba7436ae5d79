use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single category record as served by the marketplace API.
///
/// The record is kept verbatim so that the cached copy is exactly what the
/// server returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(Value);

impl Category {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Identifier of the record (`_id`, falling back to `id`).
    pub fn id(&self) -> Option<String> {
        ["_id", "id"].iter().find_map(|key| match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Human-readable name (`nombre`, falling back to `name`).
    pub fn name(&self) -> Option<&str> {
        ["nombre", "name"]
            .iter()
            .find_map(|key| self.0.get(key).and_then(Value::as_str))
    }

    pub fn display_name(&self) -> String {
        match (self.name(), &self.0) {
            (Some(name), _) => name.to_string(),
            (None, Value::String(s)) => s.clone(),
            (None, _) => self.id().unwrap_or_else(|| "(unnamed)".to_string()),
        }
    }

}

impl From<Value> for Category {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Body of `GET /categoria`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categorias: Option<Vec<Category>>,
}

impl CategoriesResponse {
    /// The category list, empty when the field is absent or null.
    pub fn into_categories(self) -> Vec<Category> {
        self.categorias.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_accessors() {
        let cat = Category::new(json!({"_id": "65a1", "nombre": "Electrónica"}));
        assert_eq!(cat.id().as_deref(), Some("65a1"));
        assert_eq!(cat.name(), Some("Electrónica"));
        assert_eq!(cat.display_name(), "Electrónica");

        let english = Category::new(json!({"id": 7, "name": "Books"}));
        assert_eq!(english.id().as_deref(), Some("7"));
        assert_eq!(english.display_name(), "Books");
    }

    #[test]
    fn test_category_display_name_fallbacks() {
        assert_eq!(Category::new(json!("Hogar")).display_name(), "Hogar");
        assert_eq!(Category::new(json!({"_id": "x1"})).display_name(), "x1");
        assert_eq!(Category::new(json!({})).display_name(), "(unnamed)");
    }

    #[test]
    fn test_response_missing_or_null_categorias() {
        let missing: CategoriesResponse = serde_json::from_str(r#"{"ok": true}"#)
            .expect("Failed to parse response without categorias");
        assert!(missing.into_categories().is_empty());

        let null: CategoriesResponse = serde_json::from_str(r#"{"categorias": null}"#)
            .expect("Failed to parse response with null categorias");
        assert!(null.into_categories().is_empty());
    }

    #[test]
    fn test_response_keeps_order_and_fields() {
        let json = r#"{"categorias": [{"nombre": "B", "orden": 2, "_id": "b"}, {"nombre": "A", "_id": "a"}]}"#;
        let resp: CategoriesResponse =
            serde_json::from_str(json).expect("Failed to parse categories response");
        let cats = resp.into_categories();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].name(), Some("B"));
        assert_eq!(cats[1].name(), Some("A"));
        assert_eq!(
            serde_json::to_string(&cats[0]).expect("serialize"),
            r#"{"nombre":"B","orden":2,"_id":"b"}"#
        );
    }
}
