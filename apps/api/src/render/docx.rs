//! DOCX export: assembles a Word document directly from section data.
//! Layout is deliberately simple (headings, bullet paragraphs, a contact
//! line) so the output survives downstream ATS parsers.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use crate::errors::AppError;
use crate::models::resume::{ContactInfo, Resume, SectionContent};

const NAME_SIZE: usize = 48; // half-points: 24pt
const HEADING_SIZE: usize = 26; // 13pt
const BODY_SIZE: usize = 22; // 11pt

/// Builds the resume as DOCX bytes.
pub fn build_docx(resume: &Resume) -> Result<Vec<u8>, AppError> {
    let mut docx = Docx::new();

    // Header: name plus one contact line.
    match resume.contact() {
        Some(info) => {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(info.full_name.as_str()).bold().size(NAME_SIZE)),
            );
            let line = contact_line_plain(info);
            if !line.is_empty() {
                docx = docx
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_text(line).size(BODY_SIZE)));
            }
        }
        None => {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_text("Your Name").bold().size(NAME_SIZE)),
            );
        }
    }

    for section in resume.ordered_sections() {
        match &section.content {
            SectionContent::Contact(_) => {} // already in the header
            SectionContent::Summary { text } => {
                docx = heading(docx, "Summary");
                docx = body_paragraph(docx, text);
            }
            SectionContent::Skills { items } => {
                docx = heading(docx, "Skills");
                docx = body_paragraph(docx, &items.join(" \u{2022} "));
            }
            SectionContent::Experience { entries } => {
                docx = heading(docx, "Experience");
                for entry in entries {
                    let head = format!("{} — {}", entry.role, entry.company);
                    docx = bold_paragraph(docx, &head);
                    if let Some(dates) = dates_line(
                        entry.start_date.as_deref(),
                        entry.end_date.as_deref(),
                        entry.location.as_deref(),
                    ) {
                        docx = body_paragraph(docx, &dates);
                    }
                    docx = bullet_paragraphs(docx, &entry.bullets);
                }
            }
            SectionContent::Projects { entries } => {
                docx = heading(docx, "Projects");
                for entry in entries {
                    docx = bold_paragraph(docx, &entry.name);
                    if let Some(description) =
                        entry.description.as_deref().filter(|d| !d.is_empty())
                    {
                        docx = body_paragraph(docx, description);
                    }
                    docx = bullet_paragraphs(docx, &entry.bullets);
                }
            }
            SectionContent::Education { entries } => {
                docx = heading(docx, "Education");
                for entry in entries {
                    docx = bold_paragraph(docx, &entry.institution);
                    let degree = match entry.field.as_deref().filter(|f| !f.is_empty()) {
                        Some(field) => format!("{}, {}", entry.degree, field),
                        None => entry.degree.clone(),
                    };
                    docx = body_paragraph(docx, &degree);
                    if let Some(dates) = dates_line(
                        entry.start_date.as_deref(),
                        entry.end_date.as_deref(),
                        None,
                    ) {
                        docx = body_paragraph(docx, &dates);
                    }
                }
            }
            SectionContent::Certifications { entries } => {
                docx = heading(docx, "Certifications");
                for entry in entries {
                    let mut line = entry.name.clone();
                    if let Some(issuer) = entry.issuer.as_deref().filter(|i| !i.is_empty()) {
                        line = format!("{line} ({issuer})");
                    }
                    docx = bullet_paragraphs(docx, std::slice::from_ref(&line));
                }
            }
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::Export(format!("DOCX assembly failed: {e}")))?;
    Ok(cursor.into_inner())
}

fn heading(docx: Docx, text: &str) -> Docx {
    docx.add_paragraph(
        Paragraph::new().add_run(
            Run::new()
                .add_text(text.to_uppercase())
                .bold()
                .size(HEADING_SIZE),
        ),
    )
}

fn bold_paragraph(docx: Docx, text: &str) -> Docx {
    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).bold().size(BODY_SIZE)))
}

fn body_paragraph(docx: Docx, text: &str) -> Docx {
    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).size(BODY_SIZE)))
}

fn bullet_paragraphs(mut docx: Docx, bullets: &[String]) -> Docx {
    for bullet in bullets {
        docx = docx.add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text(format!("\u{2022} {bullet}"))
                    .size(BODY_SIZE),
            ),
        );
    }
    docx
}

fn contact_line_plain(info: &ContactInfo) -> String {
    [
        info.email.as_deref(),
        info.phone.as_deref(),
        info.location.as_deref(),
        info.linkedin.as_deref(),
        info.website.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|v| !v.trim().is_empty())
    .collect::<Vec<_>>()
    .join(" | ")
}

fn dates_line(start: Option<&str>, end: Option<&str>, location: Option<&str>) -> Option<String> {
    let range = match (
        start.filter(|s| !s.is_empty()),
        end.filter(|e| !e.is_empty()),
    ) {
        (Some(start), Some(end)) => Some(format!("{start} – {end}")),
        (Some(start), None) => Some(format!("{start} – Present")),
        (None, Some(end)) => Some(end.to_string()),
        (None, None) => None,
    };
    match (range, location.filter(|l| !l.is_empty())) {
        (Some(range), Some(location)) => Some(format!("{range} | {location}")),
        (Some(range), None) => Some(range),
        (None, Some(location)) => Some(location.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        ContactInfo, ExperienceEntry, Resume, Section, DEFAULT_TEMPLATE_ID,
    };

    fn sample_resume() -> Resume {
        let mut resume = Resume::new(
            "user-1".to_string(),
            "Docx Test".to_string(),
            DEFAULT_TEMPLATE_ID.to_string(),
            Some(ContactInfo {
                full_name: "Ada Lovelace".to_string(),
                email: Some("ada@example.com".to_string()),
                ..Default::default()
            }),
            None,
        );
        resume.sections.push(Section {
            order: 1,
            content: SectionContent::Experience {
                entries: vec![ExperienceEntry {
                    company: "Analytical Engines Ltd".to_string(),
                    role: "Programmer".to_string(),
                    start_date: Some("1842".to_string()),
                    end_date: None,
                    location: None,
                    bullets: vec!["Wrote the first published algorithm".to_string()],
                }],
            },
        });
        resume
    }

    #[test]
    fn test_build_docx_produces_zip_container() {
        let bytes = build_docx(&sample_resume()).unwrap();
        // A .docx file is a ZIP archive; check the local-file magic.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_build_docx_without_contact_still_succeeds() {
        let resume = Resume::new(
            "user-1".to_string(),
            "Bare".to_string(),
            DEFAULT_TEMPLATE_ID.to_string(),
            None,
            None,
        );
        assert!(build_docx(&resume).is_ok());
    }

    #[test]
    fn test_dates_line_variants() {
        assert_eq!(
            dates_line(Some("2020"), None, Some("Remote")).as_deref(),
            Some("2020 – Present | Remote")
        );
        assert_eq!(dates_line(None, None, None), None);
        assert_eq!(dates_line(None, Some("2021"), None).as_deref(), Some("2021"));
    }
}
