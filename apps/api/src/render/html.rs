//! Pure HTML rendering of a resume through a template spec. The output is
//! a self-contained print view consumed by the PDF exporter and by the
//! client's preview iframe.

use std::fmt::Write as _;

use crate::models::resume::{
    CertificationEntry, ContactInfo, EducationEntry, ExperienceEntry, ProjectEntry, Resume,
    Section, SectionContent,
};
use crate::render::{template_by_id, LayoutFamily, TemplateSpec};

/// Renders a complete standalone HTML document for the resume's template.
pub fn render_html(resume: &Resume) -> String {
    let spec = template_by_id(&resume.template_id);
    let sections = resume.ordered_sections();

    let header = header_html(resume.contact(), spec);
    let (main, aside) = body_html(&sections, spec);

    let body = match spec.family {
        LayoutFamily::SingleColumn | LayoutFamily::Compact | LayoutFamily::Banner => {
            format!("{header}<main>{main}{aside}</main>")
        }
        LayoutFamily::TwoColumn | LayoutFamily::Sidebar => {
            format!("{header}<div class=\"columns\"><main>{main}</main><aside>{aside}</aside></div>")
        }
    };

    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{css}</style></head>\
         <body class=\"{family}\">{body}</body></html>",
        title = escape(&resume.title),
        css = stylesheet(spec),
        family = family_class(spec.family),
    )
}

fn family_class(family: LayoutFamily) -> &'static str {
    match family {
        LayoutFamily::SingleColumn => "single",
        LayoutFamily::TwoColumn => "two-column",
        LayoutFamily::Sidebar => "sidebar",
        LayoutFamily::Compact => "compact",
        LayoutFamily::Banner => "banner",
    }
}

fn stylesheet(spec: &TemplateSpec) -> String {
    let base_size = if spec.family == LayoutFamily::Compact {
        "10pt"
    } else {
        "11pt"
    };
    format!(
        "@page {{ size: letter; margin: 0.75in; }}\
         body {{ font-family: {font}; font-size: {base_size}; color: #222; margin: 0; }}\
         h1 {{ font-size: 1.9em; margin: 0; color: {accent}; }}\
         h2 {{ font-size: 1.1em; text-transform: uppercase; letter-spacing: 0.06em; \
               color: {accent}; border-bottom: 1px solid {accent}; padding-bottom: 2px; }}\
         ul {{ margin: 4px 0; padding-left: 18px; }}\
         li {{ margin-bottom: 2px; }}\
         .meta {{ color: #555; font-size: 0.92em; }}\
         .entry {{ margin-bottom: 8px; }}\
         .entry-head {{ display: flex; justify-content: space-between; font-weight: bold; }}\
         .columns {{ display: flex; gap: 24px; }}\
         .columns main {{ flex: 2; }}\
         .columns aside {{ flex: 1; }}\
         body.sidebar .columns aside {{ background: {accent}14; padding: 12px; }}\
         body.banner header {{ background: {accent}; color: #fff; padding: 16px 20px; }}\
         body.banner header h1 {{ color: #fff; }}\
         header {{ margin-bottom: 12px; }}",
        font = spec.font_stack,
        accent = spec.accent,
    )
}

fn header_html(contact: Option<&ContactInfo>, _spec: &TemplateSpec) -> String {
    // A missing contact section still renders a header, with placeholders.
    let (name, line) = match contact {
        Some(info) => (escape(&info.full_name), contact_line(info)),
        None => ("Your Name".to_string(), String::new()),
    };
    format!("<header><h1>{name}</h1><div class=\"meta\">{line}</div></header>")
}

/// Joins the populated contact fields with separators.
pub fn contact_line(info: &ContactInfo) -> String {
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
    .map(escape)
    .collect::<Vec<_>>()
    .join(" &middot; ")
}

/// Splits rendered sections into main-flow and aside fragments. Single
/// column families concatenate the two.
fn body_html(sections: &[&Section], spec: &TemplateSpec) -> (String, String) {
    let split = matches!(
        spec.family,
        LayoutFamily::TwoColumn | LayoutFamily::Sidebar
    );

    let mut main = String::new();
    let mut aside = String::new();

    for section in sections {
        let (target, fragment) = match &section.content {
            // Contact is rendered in the header, not as a body section.
            SectionContent::Contact(_) => continue,
            SectionContent::Summary { text } => (
                &mut main,
                format!("<section><h2>Summary</h2><p>{}</p></section>", escape(text)),
            ),
            SectionContent::Skills { items } => (
                if split { &mut aside } else { &mut main },
                skills_html(items),
            ),
            SectionContent::Experience { entries } => (&mut main, experience_html(entries)),
            SectionContent::Projects { entries } => (&mut main, projects_html(entries)),
            SectionContent::Education { entries } => (
                if split { &mut aside } else { &mut main },
                education_html(entries),
            ),
            SectionContent::Certifications { entries } => (
                if split { &mut aside } else { &mut main },
                certifications_html(entries),
            ),
        };
        target.push_str(&fragment);
    }

    (main, aside)
}

fn skills_html(items: &[String]) -> String {
    let list = items
        .iter()
        .map(|s| escape(s))
        .collect::<Vec<_>>()
        .join(" &middot; ");
    format!("<section><h2>Skills</h2><p>{list}</p></section>")
}

fn experience_html(entries: &[ExperienceEntry]) -> String {
    let mut out = String::from("<section><h2>Experience</h2>");
    for entry in entries {
        let _ = write!(
            out,
            "<div class=\"entry\"><div class=\"entry-head\"><span>{role} &mdash; {company}</span>\
             <span class=\"meta\">{dates}</span></div>",
            role = escape(&entry.role),
            company = escape(&entry.company),
            dates = date_range(entry.start_date.as_deref(), entry.end_date.as_deref()),
        );
        if let Some(location) = entry.location.as_deref().filter(|l| !l.is_empty()) {
            let _ = write!(out, "<div class=\"meta\">{}</div>", escape(location));
        }
        out.push_str(&bullets_html(&entry.bullets));
        out.push_str("</div>");
    }
    out.push_str("</section>");
    out
}

fn projects_html(entries: &[ProjectEntry]) -> String {
    let mut out = String::from("<section><h2>Projects</h2>");
    for entry in entries {
        let _ = write!(
            out,
            "<div class=\"entry\"><div class=\"entry-head\"><span>{}</span></div>",
            escape(&entry.name)
        );
        if let Some(description) = entry.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(out, "<p>{}</p>", escape(description));
        }
        if !entry.tech.is_empty() {
            let tech = entry.tech.iter().map(|t| escape(t)).collect::<Vec<_>>().join(", ");
            let _ = write!(out, "<div class=\"meta\">{tech}</div>");
        }
        out.push_str(&bullets_html(&entry.bullets));
        out.push_str("</div>");
    }
    out.push_str("</section>");
    out
}

fn education_html(entries: &[EducationEntry]) -> String {
    let mut out = String::from("<section><h2>Education</h2>");
    for entry in entries {
        let degree = match entry.field.as_deref().filter(|f| !f.is_empty()) {
            Some(field) => format!("{}, {}", escape(&entry.degree), escape(field)),
            None => escape(&entry.degree),
        };
        let _ = write!(
            out,
            "<div class=\"entry\"><div class=\"entry-head\"><span>{institution}</span>\
             <span class=\"meta\">{dates}</span></div><div>{degree}</div>",
            institution = escape(&entry.institution),
            dates = date_range(entry.start_date.as_deref(), entry.end_date.as_deref()),
        );
        if !entry.honors.is_empty() {
            let honors = entry.honors.iter().map(|h| escape(h)).collect::<Vec<_>>().join(", ");
            let _ = write!(out, "<div class=\"meta\">{honors}</div>");
        }
        out.push_str("</div>");
    }
    out.push_str("</section>");
    out
}

fn certifications_html(entries: &[CertificationEntry]) -> String {
    let mut out = String::from("<section><h2>Certifications</h2><ul>");
    for entry in entries {
        let mut line = escape(&entry.name);
        if let Some(issuer) = entry.issuer.as_deref().filter(|i| !i.is_empty()) {
            line = format!("{line} ({})", escape(issuer));
        }
        if let Some(date) = entry.date.as_deref().filter(|d| !d.is_empty()) {
            line = format!("{line}, {}", escape(date));
        }
        let _ = write!(out, "<li>{line}</li>");
    }
    out.push_str("</ul></section>");
    out
}

fn bullets_html(bullets: &[String]) -> String {
    if bullets.is_empty() {
        return String::new();
    }
    let items = bullets
        .iter()
        .map(|b| format!("<li>{}</li>", escape(b)))
        .collect::<String>();
    format!("<ul>{items}</ul>")
}

fn date_range(start: Option<&str>, end: Option<&str>) -> String {
    match (
        start.filter(|s| !s.is_empty()),
        end.filter(|e| !e.is_empty()),
    ) {
        (Some(start), Some(end)) => format!("{} &ndash; {}", escape(start), escape(end)),
        (Some(start), None) => format!("{} &ndash; Present", escape(start)),
        (None, Some(end)) => escape(end),
        (None, None) => String::new(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
