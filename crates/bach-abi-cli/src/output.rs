//! Output formatting

use serde_json::{json, Map, Value};

/// Output builder for formatted CLI output
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    message: Option<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            message: None,
        }
    }

    /// Add a string field to the output
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a u64 field to the output
    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), Value::Number(value.into()));
        self
    }

    /// Add a bool field to the output
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), Value::Bool(value));
        self
    }

    /// Set the human-readable message
    pub fn message(mut self, msg: &str) -> Self {
        self.message = Some(msg.to_string());
        self
    }

    /// Render the output as it would be printed
    pub fn render(&self) -> Option<String> {
        if self.json_mode {
            let mut fields = self.fields.clone();
            fields.insert("success".to_string(), Value::Bool(true));
            Some(serde_json::to_string_pretty(&json!(fields)).unwrap_or_default())
        } else {
            self.message.clone()
        }
    }

    /// Print the output
    pub fn print(self) {
        if let Some(text) = self.render() {
            println!("{}", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_mode_prints_message() {
        let out = Output::new(false).field("encoded", "0x00").message("0x00");
        assert_eq!(out.render().as_deref(), Some("0x00"));
    }

    #[test]
    fn test_json_mode_prints_fields() {
        let out = Output::new(true)
            .field("canonical", "uint256")
            .field_bool("dynamic", false)
            .field_u64("head_len", 32)
            .message("ignored");
        let value: Value = serde_json::from_str(&out.render().unwrap()).unwrap();
        assert_eq!(value["canonical"], "uint256");
        assert_eq!(value["dynamic"], false);
        assert_eq!(value["head_len"], 32);
        assert_eq!(value["success"], true);
    }
}
