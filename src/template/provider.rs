use ahash::AHashMap;

/// Source of document templates, owned by the host application.
///
/// The core only reads from it: template text feeds variable extraction,
/// the short name feeds auto-configuration subjects.
pub trait TemplateDirectory {
    /// Raw template body for `template_id`, when known.
    fn template_text(&self, template_id: &str) -> Option<String>;

    /// Human short name for `template_id`, e.g. "NDA".
    fn short_name(&self, template_id: &str) -> Option<String>;
}

#[derive(Debug, Clone)]
struct TemplateEntry {
    short_name: String,
    text: String,
}

/// Map-backed directory for hosts that preload their template catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplates {
    entries: AHashMap<String, TemplateEntry>,
}

impl StaticTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(
        mut self,
        template_id: impl Into<String>,
        short_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            template_id.into(),
            TemplateEntry {
                short_name: short_name.into(),
                text: text.into(),
            },
        );
        self
    }
}

impl TemplateDirectory for StaticTemplates {
    fn template_text(&self, template_id: &str) -> Option<String> {
        self.entries.get(template_id).map(|entry| entry.text.clone())
    }

    fn short_name(&self, template_id: &str) -> Option<String> {
        self.entries
            .get(template_id)
            .map(|entry| entry.short_name.clone())
    }
}
