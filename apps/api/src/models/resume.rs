#![allow(dead_code)]

//! Domain model: resumes, typed sections, and the AI-derived value objects
//! (JD analysis, ATS score, generated drafts).
//!
//! Section content is a proper tagged union per section kind, so handlers
//! and renderers get exhaustive matching instead of runtime shape checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Template applied when storage has no template recorded for a resume.
pub const DEFAULT_TEMPLATE_ID: &str = "classic";

/// Owner placeholder for rows persisted without an owner reference.
pub const ANONYMOUS_OWNER: &str = "anonymous";

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// One work-history item. Dates are free-form display strings: they come
/// from user input or LLM extraction, never from a date picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub honors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub credential_id: Option<String>,
}

/// Type-specific content of a resume section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionContent {
    Contact(ContactInfo),
    Summary { text: String },
    Skills { items: Vec<String> },
    Experience { entries: Vec<ExperienceEntry> },
    Projects { entries: Vec<ProjectEntry> },
    Education { entries: Vec<EducationEntry> },
    Certifications { entries: Vec<CertificationEntry> },
}

/// Section kind without payload, used for focus tracking and enhancement hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    Certifications,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::Summary => "summary",
            SectionKind::Skills => "skills",
            SectionKind::Experience => "experience",
            SectionKind::Projects => "projects",
            SectionKind::Education => "education",
            SectionKind::Certifications => "certifications",
        }
    }
}

impl SectionContent {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionContent::Contact(_) => SectionKind::Contact,
            SectionContent::Summary { .. } => SectionKind::Summary,
            SectionContent::Skills { .. } => SectionKind::Skills,
            SectionContent::Experience { .. } => SectionKind::Experience,
            SectionContent::Projects { .. } => SectionKind::Projects,
            SectionContent::Education { .. } => SectionKind::Education,
            SectionContent::Certifications { .. } => SectionKind::Certifications,
        }
    }
}

/// One ordered block of resume content. `order` drives display position;
/// reorders rewrite it for every section at once (see `normalize_orders`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub order: i32,
    pub content: SectionContent,
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        self.content.kind()
    }
}

/// Sorts sections by their current `order` (stable) and reassigns 0..n.
pub fn normalize_orders(sections: &mut [Section]) {
    sections.sort_by_key(|s| s.order);
    for (i, section) in sections.iter_mut().enumerate() {
        section.order = i as i32;
    }
}

/// Moves the section at `from` to position `to` and renumbers every section.
/// Out-of-range indices are a no-op; the UI may race a stale drop.
pub fn move_section(sections: &mut Vec<Section>, from: usize, to: usize) {
    normalize_orders(sections);
    if from >= sections.len() || to >= sections.len() {
        return;
    }
    let section = sections.remove(from);
    sections.insert(to, section);
    for (i, section) in sections.iter_mut().enumerate() {
        section.order = i as i32;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub template_id: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub ats_score: Option<AtsScore>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resume {
    /// Creates a fresh resume. A supplied contact becomes the single contact
    /// section at order 0; otherwise the section list starts empty.
    pub fn new(
        owner_id: String,
        title: String,
        template_id: String,
        contact: Option<ContactInfo>,
        job_description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let sections = match contact {
            Some(info) if !info.full_name.trim().is_empty() => vec![Section {
                order: 0,
                content: SectionContent::Contact(info),
            }],
            _ => Vec::new(),
        };
        Resume {
            id: Uuid::new_v4(),
            owner_id,
            title,
            template_id,
            sections,
            job_description,
            ats_score: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The contact section's content, if present. At most one exists.
    pub fn contact(&self) -> Option<&ContactInfo> {
        self.sections.iter().find_map(|s| match &s.content {
            SectionContent::Contact(info) => Some(info),
            _ => None,
        })
    }

    /// Sections in display order.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JD analysis (derived, not persisted independently)
// ────────────────────────────────────────────────────────────────────────────

/// Detected register of a job description. Drives template auto-selection
/// and tailoring hints in the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JdTone {
    #[default]
    Corporate,
    Creative,
    Technical,
    Executive,
}

/// Structured extraction from a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdAnalysis {
    pub role: String,
    pub seniority: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub ats_keywords: Vec<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub tone: JdTone,
}

// ────────────────────────────────────────────────────────────────────────────
// ATS score
// ────────────────────────────────────────────────────────────────────────────

/// Heuristic ATS compatibility rating. Sub-scores are each 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScore {
    pub overall: u8,
    pub keyword_match: u8,
    pub formatting: u8,
    pub section_completeness: u8,
    pub readability: u8,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

impl AtsScore {
    /// Fixed neutral score returned when AI scoring is unavailable.
    /// The scoring endpoint must never fail the user flow (it returns this
    /// with HTTP 200 instead of a 500).
    pub fn fallback_default() -> Self {
        AtsScore {
            overall: 70,
            keyword_match: 65,
            formatting: 75,
            section_completeness: 70,
            readability: 72,
            missing_keywords: vec![],
            suggestions: vec![
                "Automated scoring was unavailable; this is a neutral baseline. \
                 Re-run the check for a tailored score."
                    .to_string(),
            ],
            red_flags: vec![],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generated drafts
// ────────────────────────────────────────────────────────────────────────────

/// Structured resume draft produced by the generation endpoint or by
/// structuring an uploaded PDF. Converted to ordered sections before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResume {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
}

impl GeneratedResume {
    /// Converts the draft into ordered sections. Contact (when supplied)
    /// lands at order 0; empty groups produce no section.
    pub fn into_sections(self, contact: Option<ContactInfo>) -> Vec<Section> {
        let mut contents: Vec<SectionContent> = Vec::new();

        if let Some(info) = contact {
            if !info.full_name.trim().is_empty() {
                contents.push(SectionContent::Contact(info));
            }
        }
        if let Some(text) = self.summary.filter(|t| !t.trim().is_empty()) {
            contents.push(SectionContent::Summary { text });
        }
        if !self.skills.is_empty() {
            contents.push(SectionContent::Skills { items: self.skills });
        }
        if !self.experience.is_empty() {
            contents.push(SectionContent::Experience {
                entries: self.experience,
            });
        }
        if !self.projects.is_empty() {
            contents.push(SectionContent::Projects {
                entries: self.projects,
            });
        }
        if !self.education.is_empty() {
            contents.push(SectionContent::Education {
                entries: self.education,
            });
        }
        if !self.certifications.is_empty() {
            contents.push(SectionContent::Certifications {
                entries: self.certifications,
            });
        }

        contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| Section {
                order: i as i32,
                content,
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> ContactInfo {
        ContactInfo {
            full_name: name.to_string(),
            email: Some("a@b.c".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_section_content_serde_tag_is_snake_case() {
        let section = Section {
            order: 1,
            content: SectionContent::Skills {
                items: vec!["Rust".to_string()],
            },
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["content"]["type"], "skills");
        assert_eq!(json["order"], 1);

        let back: Section = serde_json::from_value(json).unwrap();
        assert_eq!(back, section);
    }

    #[test]
    fn test_new_resume_without_contact_has_no_sections() {
        let resume = Resume::new(
            "user-1".to_string(),
            "My Resume".to_string(),
            DEFAULT_TEMPLATE_ID.to_string(),
            None,
            None,
        );
        assert!(resume.sections.is_empty());
    }

    #[test]
    fn test_new_resume_with_contact_pins_it_to_order_zero() {
        let resume = Resume::new(
            "user-1".to_string(),
            "My Resume".to_string(),
            DEFAULT_TEMPLATE_ID.to_string(),
            Some(contact("Ada Lovelace")),
            None,
        );
        assert_eq!(resume.sections.len(), 1);
        assert_eq!(resume.sections[0].order, 0);
        assert_eq!(resume.sections[0].kind(), SectionKind::Contact);
        assert_eq!(resume.contact().unwrap().full_name, "Ada Lovelace");
    }

    #[test]
    fn test_new_resume_ignores_blank_contact_name() {
        let resume = Resume::new(
            "user-1".to_string(),
            "My Resume".to_string(),
            DEFAULT_TEMPLATE_ID.to_string(),
            Some(contact("   ")),
            None,
        );
        assert!(resume.sections.is_empty());
    }

    #[test]
    fn test_move_section_swaps_orders() {
        // [contact(0), experience(1)] → drag experience before contact
        let mut sections = vec![
            Section {
                order: 0,
                content: SectionContent::Contact(contact("Ada")),
            },
            Section {
                order: 1,
                content: SectionContent::Experience { entries: vec![] },
            },
        ];
        move_section(&mut sections, 1, 0);
        assert_eq!(sections[0].kind(), SectionKind::Experience);
        assert_eq!(sections[0].order, 0);
        assert_eq!(sections[1].kind(), SectionKind::Contact);
        assert_eq!(sections[1].order, 1);
    }

    #[test]
    fn test_move_section_out_of_range_is_noop() {
        let mut sections = vec![Section {
            order: 0,
            content: SectionContent::Summary {
                text: "hi".to_string(),
            },
        }];
        let before = sections.clone();
        move_section(&mut sections, 0, 5);
        assert_eq!(sections, before);
    }

    #[test]
    fn test_normalize_orders_closes_gaps() {
        let mut sections = vec![
            Section {
                order: 7,
                content: SectionContent::Summary {
                    text: "b".to_string(),
                },
            },
            Section {
                order: 2,
                content: SectionContent::Contact(contact("Ada")),
            },
        ];
        normalize_orders(&mut sections);
        assert_eq!(sections[0].order, 0);
        assert_eq!(sections[0].kind(), SectionKind::Contact);
        assert_eq!(sections[1].order, 1);
    }

    #[test]
    fn test_ats_fallback_default_overall_is_70() {
        let score = AtsScore::fallback_default();
        assert_eq!(score.overall, 70);
        assert!(!score.suggestions.is_empty());
        assert!(score.missing_keywords.is_empty());
    }

    #[test]
    fn test_jd_tone_default_is_corporate() {
        assert_eq!(JdTone::default(), JdTone::Corporate);
    }

    #[test]
    fn test_jd_analysis_tolerates_missing_lists() {
        let json = r#"{"role": "Backend Engineer", "seniority": "senior"}"#;
        let analysis: JdAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.required_skills.is_empty());
        assert_eq!(analysis.tone, JdTone::Corporate);
    }

    #[test]
    fn test_generated_resume_into_sections_orders_contact_first() {
        let draft = GeneratedResume {
            title: Some("Engineer".to_string()),
            summary: Some("Builds things.".to_string()),
            skills: vec!["Rust".to_string()],
            experience: vec![],
            projects: vec![],
            education: vec![],
            certifications: vec![],
        };
        let sections = draft.into_sections(Some(contact("Ada")));
        assert_eq!(sections[0].kind(), SectionKind::Contact);
        assert_eq!(sections[0].order, 0);
        assert_eq!(sections[1].kind(), SectionKind::Summary);
        assert_eq!(sections[2].kind(), SectionKind::Skills);
        assert_eq!(sections[2].order, 2);
    }

    #[test]
    fn test_generated_resume_skips_empty_groups() {
        let draft = GeneratedResume {
            title: None,
            summary: None,
            skills: vec![],
            experience: vec![],
            projects: vec![],
            education: vec![],
            certifications: vec![],
        };
        assert!(draft.into_sections(None).is_empty());
    }
}
