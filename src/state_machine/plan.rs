//! Content plans produced by transitions
//!
//! A plan says *what* to show, by template id, never the wording. The
//! renderer owns the copy and the image URLs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Text templates the engine can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    // Greeting and main menu
    GreetingGeneric,
    GreetingPersonalized,
    MainMenu,
    InvalidMainOption,

    // Packages
    PackagesCatalog,
    PackagesComingSoon,
    PackagesContact,
    PackagesInvalid,

    // Portability
    PortabilityMenu,
    PortabilityFromPackages,
    PortabilityDocuments,
    PortabilityContact,
    PortabilityInvalid,

    // NIP
    NipInstructions,
    NipMenu,
    NipCaptureRequest,
    NipWhereToType,
    NipContact,
    NipInvalid,
    NipAccepted,
    NipWrongLength,
    NipNoDigits,

    // IMEI
    ImeiSummary,
    ImeiWrongLength,
    ImeiNoDigits,

    // eSIM
    EsimActivateStart,
    EsimPackagesReminder,
    EsimExplainer,
    EsimContact,
    EsimInvalid,

    // Registration
    NameEmpty,
    NameNumericOnly,
    NameNoLetters,
    EmailRequest,
    NumberRequest,
    NumberWrongLength,
    NumberNoDigits,
    RegistrationComplete,

    // Support and advance-with-NIP
    Support,
    AdvanceNipWhatsapp,
    AdvanceNipPhone,
    AdvanceNipInvalid,

    // Global
    Farewell,
    Fallback,
}

/// Images the engine can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageId {
    Welcome,
    PackagesPromo,
    Portability3Steps,
    HowToGetNip,
    HowToGetImei,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Image,
}

/// Where the body of an item comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    TemplateId(TemplateId),
    ImageId(ImageId),
    Literal(String),
}

/// One message in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub kind: ContentKind,
    #[serde(flatten)]
    pub source: ContentSource,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub substitutions: BTreeMap<String, String>,
}

impl ContentItem {
    pub fn text(template: TemplateId) -> Self {
        Self {
            kind: ContentKind::Text,
            source: ContentSource::TemplateId(template),
            substitutions: BTreeMap::new(),
        }
    }

    pub fn image(image: ImageId) -> Self {
        Self {
            kind: ContentKind::Image,
            source: ContentSource::ImageId(image),
            substitutions: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.substitutions.insert(key.to_string(), value.into());
        self
    }

    /// Add a substitution only when the slot has a value
    pub fn with_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

}

/// Ordered messages for one turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentPlan {
    items: Vec<ContentItem>,
}

impl ContentPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }
}

impl FromIterator<ContentItem> for ContentPlan {
    fn from_iter<I: IntoIterator<Item = ContentItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ContentPlan {
    type Item = ContentItem;
    type IntoIter = std::vec::IntoIter<ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Write-only destination for plan items
pub trait OutboundContentSink {
    fn push(&mut self, item: ContentItem);
}

impl OutboundContentSink for ContentPlan {
    fn push(&mut self, item: ContentItem) {
        self.items.push(item);
    }
}

impl OutboundContentSink for Vec<ContentItem> {
    fn push(&mut self, item: ContentItem) {
        Vec::push(self, item);
    }
}

#[cfg(test)]
impl ContentItem {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            source: ContentSource::Literal(text.into()),
            substitutions: BTreeMap::new(),
        }
    }

    pub fn template_id(&self) -> Option<TemplateId> {
        match self.source {
            ContentSource::TemplateId(id) => Some(id),
            _ => None,
        }
    }

    pub fn image_id(&self) -> Option<ImageId> {
        match self.source {
            ContentSource::ImageId(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
impl ContentPlan {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn templates(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.items.iter().filter_map(ContentItem::template_id)
    }

    pub fn images(&self) -> impl Iterator<Item = ImageId> + '_ {
        self.items.iter().filter_map(ContentItem::image_id)
    }

    pub fn contains_template(&self, template: TemplateId) -> bool {
        self.templates().any(|t| t == template)
    }

    pub fn contains_image(&self, image: ImageId) -> bool {
        self.images().any(|i| i == image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_wire_shape() {
        let item = ContentItem::text(TemplateId::NipAccepted).with("nip", "1234");
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"kind": "text", "template_id": "nip_accepted", "substitutions": {"nip": "1234"}})
        );

        let image = ContentItem::image(ImageId::Portability3Steps);
        assert_eq!(
            serde_json::to_value(&image).unwrap(),
            json!({"kind": "image", "image_id": "portability3_steps"})
        );
    }

    #[test]
    fn test_with_opt_skips_missing() {
        let item = ContentItem::text(TemplateId::ImeiSummary)
            .with_opt("carrier", None)
            .with_opt("nip", Some("1234"));
        assert_eq!(item.substitutions.len(), 1);
    }

    #[test]
    fn test_sink_preserves_order() {
        let mut plan = ContentPlan::new();
        plan.push(ContentItem::image(ImageId::PackagesPromo));
        plan.push(ContentItem::text(TemplateId::PackagesCatalog));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.items()[0].kind, ContentKind::Image);
        assert!(plan.contains_template(TemplateId::PackagesCatalog));
    }
}
