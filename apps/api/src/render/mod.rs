//! Template rendering and document export.
//!
//! Templates are data, not code: each visual layout is a `TemplateSpec`
//! (layout family, accent, type stack) driving one parameterized HTML
//! renderer. Rendering is pure and stateless; every template extracts the
//! sections it understands by type and falls back to defaults for missing
//! ones.

pub mod docx;
pub mod handlers;
pub mod html;
pub mod pdf;

use crate::models::resume::{JdAnalysis, JdTone, DEFAULT_TEMPLATE_ID};

/// Page structure shared by groups of templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFamily {
    /// One full-width flow, sections stacked.
    SingleColumn,
    /// Main flow plus a narrow right column for skills/education.
    TwoColumn,
    /// Colored left sidebar carrying contact and skills.
    Sidebar,
    /// Single column, tightened spacing and smaller type.
    Compact,
    /// Full-width accent banner header above a single column.
    Banner,
}

/// One visual template. Purely presentational configuration.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub family: LayoutFamily,
    /// Accent color for headings and rules, as a CSS hex value.
    pub accent: &'static str,
    pub font_stack: &'static str,
}

const SERIF: &str = "Georgia, 'Times New Roman', serif";
const SANS: &str = "'Helvetica Neue', Arial, sans-serif";
const MONO: &str = "'SF Mono', Consolas, monospace";

/// The full template catalog. `DEFAULT_TEMPLATE_ID` must stay present.
pub const TEMPLATES: &[TemplateSpec] = &[
    TemplateSpec { id: "classic", name: "Classic", family: LayoutFamily::SingleColumn, accent: "#1a1a2e", font_stack: SERIF },
    TemplateSpec { id: "modern", name: "Modern", family: LayoutFamily::TwoColumn, accent: "#0f4c81", font_stack: SANS },
    TemplateSpec { id: "minimal", name: "Minimal", family: LayoutFamily::SingleColumn, accent: "#444444", font_stack: SANS },
    TemplateSpec { id: "executive", name: "Executive", family: LayoutFamily::Banner, accent: "#2c3539", font_stack: SERIF },
    TemplateSpec { id: "creative", name: "Creative", family: LayoutFamily::Sidebar, accent: "#c0392b", font_stack: SANS },
    TemplateSpec { id: "technical", name: "Technical", family: LayoutFamily::TwoColumn, accent: "#14532d", font_stack: MONO },
    TemplateSpec { id: "compact", name: "Compact", family: LayoutFamily::Compact, accent: "#1f2937", font_stack: SANS },
    TemplateSpec { id: "elegant", name: "Elegant", family: LayoutFamily::SingleColumn, accent: "#5b21b6", font_stack: SERIF },
    TemplateSpec { id: "bold", name: "Bold", family: LayoutFamily::Banner, accent: "#b91c1c", font_stack: SANS },
    TemplateSpec { id: "slate", name: "Slate", family: LayoutFamily::Sidebar, accent: "#334155", font_stack: SANS },
    TemplateSpec { id: "ivory", name: "Ivory", family: LayoutFamily::SingleColumn, accent: "#78716c", font_stack: SERIF },
    TemplateSpec { id: "onyx", name: "Onyx", family: LayoutFamily::Banner, accent: "#111111", font_stack: SANS },
    TemplateSpec { id: "azure", name: "Azure", family: LayoutFamily::TwoColumn, accent: "#1d4ed8", font_stack: SANS },
    TemplateSpec { id: "crimson", name: "Crimson", family: LayoutFamily::SingleColumn, accent: "#9f1239", font_stack: SERIF },
    TemplateSpec { id: "forest", name: "Forest", family: LayoutFamily::Sidebar, accent: "#166534", font_stack: SANS },
    TemplateSpec { id: "harbor", name: "Harbor", family: LayoutFamily::TwoColumn, accent: "#0e7490", font_stack: SANS },
    TemplateSpec { id: "metro", name: "Metro", family: LayoutFamily::Compact, accent: "#374151", font_stack: SANS },
    TemplateSpec { id: "studio", name: "Studio", family: LayoutFamily::Sidebar, accent: "#7c2d12", font_stack: SANS },
    TemplateSpec { id: "ledger", name: "Ledger", family: LayoutFamily::SingleColumn, accent: "#1e3a5f", font_stack: SERIF },
    TemplateSpec { id: "summit", name: "Summit", family: LayoutFamily::Banner, accent: "#0f766e", font_stack: SANS },
    TemplateSpec { id: "atlas", name: "Atlas", family: LayoutFamily::TwoColumn, accent: "#3730a3", font_stack: SANS },
    TemplateSpec { id: "prism", name: "Prism", family: LayoutFamily::Compact, accent: "#6d28d9", font_stack: SANS },
    TemplateSpec { id: "quill", name: "Quill", family: LayoutFamily::SingleColumn, accent: "#713f12", font_stack: SERIF },
    TemplateSpec { id: "beacon", name: "Beacon", family: LayoutFamily::Banner, accent: "#c2410c", font_stack: SANS },
    TemplateSpec { id: "foundry", name: "Foundry", family: LayoutFamily::Compact, accent: "#27272a", font_stack: MONO },
];

/// Looks up a template, falling back to the default for unknown ids so a
/// stale `templateId` in storage can never break rendering.
pub fn template_by_id(id: &str) -> &'static TemplateSpec {
    TEMPLATES
        .iter()
        .find(|t| t.id == id)
        .or_else(|| TEMPLATES.iter().find(|t| t.id == DEFAULT_TEMPLATE_ID))
        .expect("default template must exist in the catalog")
}

/// Auto-selects a template id from a JD analysis. Tone drives the family;
/// a few industries override it where convention is strong.
pub fn suggest_template(analysis: &JdAnalysis) -> &'static str {
    if let Some(industry) = analysis.industry.as_deref() {
        let industry = industry.to_lowercase();
        if industry.contains("design") || industry.contains("media") || industry.contains("marketing")
        {
            return "creative";
        }
        if industry.contains("finance") || industry.contains("legal") || industry.contains("banking")
        {
            return "ledger";
        }
    }

    match analysis.tone {
        JdTone::Technical => "technical",
        JdTone::Creative => "creative",
        JdTone::Executive => "executive",
        JdTone::Corporate => "modern",
    }
}
