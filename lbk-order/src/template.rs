//! `{{name}}` placeholder templates for the messages sent to vendors.
//!
//! A template is parsed once into literal and placeholder segments and every
//! placeholder may occur only once. Rendering takes an ordered list of
//! `(placeholder, value)` bindings and fills all placeholders in a single
//! pass: values are copied verbatim and never scanned again, so a client
//! typing `{{` in their address cannot inject or break a placeholder.

use std::collections::{HashMap, HashSet};

pub const ORDER_TEMPLATE: &str = "🛒 *LB-K SMART ORDER*
Client: {{client_name}}
Phone: {{client_phone}}

📦 *ORDERED PRODUCTS*
{{products_list}}

💰 *PRODUCTS TOTAL*: {{products_total}} $
🚚 *SHIPPING*: {{shipping_cost}} $
💵 *GRAND TOTAL*: {{grand_total}} $

📋 *DELIVERY DETAILS*
Address: {{delivery_address}}
Mode: {{shipping_mode}} ({{delivery_days}})
Payment: {{payment_method}}

✅ Thank you for your order!";

pub const INQUIRY_TEMPLATE: &str = "🔍 *PRODUCT INQUIRY*
Product: {{product_name}}
Reference: {{product_id}}
Client: {{client_name}}
Question: {{client_message}}

📞 Quick callback requested.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut seen = HashSet::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or(TemplateError::Unterminated { offset: offset + start })?;
            let name = &after[..end];

            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(TemplateError::InvalidName(name.to_string()));
            }
            if !seen.insert(name) {
                return Err(TemplateError::DuplicatePlaceholder(name.to_string()));
            }
            segments.push(Segment::Placeholder(name.to_string()));

            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Placeholder names in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder exactly once.
    ///
    /// Fails if a placeholder has no binding, a binding names no placeholder,
    /// or a placeholder is bound twice.
    pub fn render(&self, bindings: &[(&str, String)]) -> Result<String, TemplateError> {
        let mut values: HashMap<&str, &str> = HashMap::with_capacity(bindings.len());
        for (name, value) in bindings {
            if values.insert(*name, value.as_str()).is_some() {
                return Err(TemplateError::DuplicateBinding(name.to_string()));
            }
            if !self.placeholders().any(|p| p == *name) {
                return Err(TemplateError::UnknownBinding(name.to_string()));
            }
        }

        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(name) => {
                    let value = values
                        .get(name.as_str())
                        .ok_or_else(|| TemplateError::Unresolved(name.clone()))?;
                    output.push_str(value);
                }
            }
        }

        Ok(output)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unterminated placeholder at byte {offset}")]
    Unterminated { offset: usize },

    #[error("Invalid placeholder name: {0:?}")]
    InvalidName(String),

    #[error("Placeholder {{{{{0}}}}} appears more than once")]
    DuplicatePlaceholder(String),

    #[error("Placeholder {{{{{0}}}}} has no value")]
    Unresolved(String),

    #[error("No placeholder named {0}")]
    UnknownBinding(String),

    #[error("Placeholder {0} bound more than once")]
    DuplicateBinding(String),
}
