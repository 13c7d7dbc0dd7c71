//! Content plan rendering
//!
//! Turns template ids into Spanish copy and image ids into URLs.

mod templates;

pub use templates::DEFAULT_IMAGE_BASE_URL;

use serde::{Deserialize, Serialize};

use crate::state_machine::{ContentItem, ContentPlan, ContentSource, ImageId};

/// WhatsApp and phone line for the support team
pub const CONTACT_NUMBER: &str = "+52 614 558 7289";

/// Shown for a summary slot the user never filled
pub const NOT_CAPTURED: &str = "No capturado";

/// A message ready for the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderedMessage {
    Text(String),
    Image(String),
}

#[cfg(test)]
impl RenderedMessage {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderedMessage::Text(text) => Some(text),
            RenderedMessage::Image(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    image_base_url: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl Renderer {
    pub fn new(image_base_url: impl Into<String>) -> Self {
        let mut image_base_url = image_base_url.into();
        if !image_base_url.ends_with('/') {
            image_base_url.push('/');
        }
        Self { image_base_url }
    }

    pub fn image_url(&self, id: ImageId) -> String {
        format!("{}{}", self.image_base_url, templates::image_file(id))
    }

    pub fn render(&self, plan: &ContentPlan) -> Vec<RenderedMessage> {
        plan.items().iter().map(|item| self.render_item(item)).collect()
    }

    pub fn render_item(&self, item: &ContentItem) -> RenderedMessage {
        match &item.source {
            ContentSource::TemplateId(id) => {
                RenderedMessage::Text(fill(templates::template(*id), item))
            }
            ContentSource::ImageId(id) => RenderedMessage::Image(self.image_url(*id)),
            ContentSource::Literal(text) => RenderedMessage::Text(text.clone()),
        }
    }
}

/// Replace `{key}` tokens. Unknown keys become [`NOT_CAPTURED`].
fn fill(template: &str, item: &ContentItem) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((before, after)) = rest.split_once('{') {
        out.push_str(before);
        let Some((key, tail)) = after.split_once('}') else {
            out.push('{');
            out.push_str(after);
            return out;
        };

        if key.is_empty() || !key.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
            // Not a placeholder, keep the brace
            out.push('{');
            rest = after;
            continue;
        }

        let value = item
            .substitutions
            .get(key)
            .map(String::as_str)
            .or_else(|| templates::shared_value(key))
            .unwrap_or(NOT_CAPTURED);
        out.push_str(value);
        rest = tail;
    }

    out.push_str(rest);
    out
}
