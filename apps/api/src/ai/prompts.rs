// Prompt catalog: one instruction string per AI task, parameterized only by
// inline `{placeholder}` replacement. Each prompt encodes its own output
// contract; the JSON/prose framing is added by the generation client's
// OutputMode fragment.

/// System prompt for JD analysis.
pub const ANALYZE_JD_SYSTEM: &str =
    "You are an expert job description analyst and resume strategist. \
    Extract structured hiring signals from a job description.";

/// JD analysis prompt. Replace `{jd_text}` before sending.
pub const ANALYZE_JD_TEMPLATE: &str = r#"Analyze the following job description and extract structured information.

Return a JSON object with this EXACT schema (no extra fields):
{
  "role": "Backend Engineer",
  "seniority": "senior",
  "requiredSkills": ["Rust", "PostgreSQL"],
  "preferredSkills": ["Kubernetes"],
  "atsKeywords": ["distributed systems", "REST APIs"],
  "industry": "fintech",
  "tone": "corporate"
}

Rules:
- "seniority": one of "junior", "mid", "senior", "staff", "principal", "director", or "unknown".
- "requiredSkills": explicit must-haves ("required", "must have", minimum years).
- "preferredSkills": nice-to-haves ("preferred", "bonus", "a plus").
- "atsKeywords": ALL meaningful technical and domain keywords an applicant
  tracking system would match on, most important first.
- "industry": one short lowercase label, or null if unclear.
- "tone" (pick exactly one):
  - "corporate": conventional business language, process-oriented
  - "creative": informal, brand-forward, design or media flavored
  - "technical": engineering-heavy, tool and architecture focused
  - "executive": leadership scope, strategy and P&L language

JOB DESCRIPTION:
{jd_text}"#;

/// System prompt for ATS compatibility scoring.
pub const ATS_SCORE_SYSTEM: &str =
    "You are an applicant tracking system auditor. \
    Score how well a resume will survive automated screening.";

/// ATS scoring prompt. Replace `{sections_json}` and `{jd_block}`.
pub const ATS_SCORE_TEMPLATE: &str = r#"Score the resume below for ATS compatibility.

Return a JSON object with this EXACT schema (all scores are integers 0-100):
{
  "overall": 82,
  "keywordMatch": 78,
  "formatting": 90,
  "sectionCompleteness": 85,
  "readability": 80,
  "missingKeywords": ["terraform"],
  "suggestions": ["Quantify the impact of the migration project"],
  "redFlags": ["Employment gap between 2021 and 2023 is unexplained"]
}

- "keywordMatch": overlap with the target job description keywords. When no
  job description is provided, judge against typical postings for the role.
- "formatting": parseability of the structure (standard headings, no tables).
- "sectionCompleteness": presence of contact, summary, skills, experience, education.
- "readability": bullet length, active verbs, concrete outcomes.
- "overall": weighted judgment, not a mean of the sub-scores.

RESUME SECTIONS:
{sections_json}

{jd_block}"#;

/// System prompt for single-field text enhancement.
pub const ENHANCE_SYSTEM: &str =
    "You are a professional resume editor. \
    Rewrite the given text to be tighter and more impactful while preserving \
    every fact. Return ONLY the rewritten text, nothing else.";

/// Enhancement prompt. Replace `{section_type}`, `{action}`, `{text}`.
pub const ENHANCE_TEMPLATE: &str = r#"Rewrite this resume {section_type} text. Goal: {action}.

Rules:
- Keep every fact, number, and name. Never invent achievements.
- Prefer strong active verbs; cut filler words.
- Stay close to the original length unless the goal says otherwise.
- Return only the rewritten text with no quotes around it.

TEXT:
{text}"#;

/// System prompt for cover letter writing.
pub const COVER_LETTER_SYSTEM: &str =
    "You are an experienced career coach writing on behalf of a candidate. \
    Write naturally and specifically; never use placeholder brackets.";

/// Cover letter prompt. Replace `{resume_json}`, `{jd_text}`,
/// `{candidate_line}`, `{company_line}`, `{role_line}`.
pub const COVER_LETTER_TEMPLATE: &str = r#"Write a cover letter for the candidate below.

{candidate_line}
{company_line}
{role_line}

Requirements:
- Three or four short paragraphs, under 350 words total.
- Open with genuine interest in the role, not a resume recap.
- Pick the two strongest matches between the resume and the job description
  and develop them concretely.
- Close with a confident, low-pressure call to action.
- Use only facts present in the resume sections.

RESUME SECTIONS:
{resume_json}

JOB DESCRIPTION:
{jd_text}"#;

/// System prompt for resume generation from a user's free-form description.
pub const GENERATE_SYSTEM: &str =
    "You are an expert resume writer. \
    Turn a candidate's rough description of their background into polished, \
    structured resume content. Use only facts the candidate stated; \
    you may rephrase but never invent employers, dates, or credentials.";

/// Generation prompt. Replace `{background}` and `{jd_block}`.
pub const GENERATE_TEMPLATE: &str = r#"Create structured resume content from the candidate's description.

Return a JSON object with this EXACT schema:
{
  "title": "Senior Backend Engineer Resume",
  "summary": "Two or three sentence professional summary.",
  "skills": ["Rust", "PostgreSQL", "AWS"],
  "experience": [
    {
      "company": "Acme Corp",
      "role": "Backend Engineer",
      "startDate": "Jan 2020",
      "endDate": "Present",
      "location": "Remote",
      "bullets": ["Reduced p99 latency 40% by introducing a caching tier"]
    }
  ],
  "projects": [
    {
      "name": "Side Project",
      "description": "One line on what it is",
      "tech": ["Rust"],
      "url": null,
      "bullets": []
    }
  ],
  "education": [
    {
      "institution": "State University",
      "degree": "B.S.",
      "field": "Computer Science",
      "startDate": "2014",
      "endDate": "2018",
      "gpa": null,
      "honors": []
    }
  ],
  "certifications": []
}

- Omit nothing the candidate stated; leave arrays empty when nothing fits.
- Bullets lead with a strong verb and include concrete outcomes where stated.
- When a target job description is provided, order and phrase content to
  match its priorities without fabricating anything.

CANDIDATE DESCRIPTION:
{background}

{jd_block}"#;

/// System prompt for structuring text extracted from an uploaded resume PDF.
pub const PARSE_RESUME_SYSTEM: &str =
    "You are a resume parser. \
    Convert raw text extracted from a resume PDF into structured data. \
    Preserve the candidate's wording; fix only extraction artifacts such as \
    broken lines and duplicated headers.";

/// Resume structuring prompt. Replace `{resume_text}`.
pub const PARSE_RESUME_TEMPLATE: &str = r#"Structure the following extracted resume text.

Return a JSON object with this EXACT schema:
{
  "title": "Imported Resume",
  "summary": "...",
  "skills": ["..."],
  "experience": [{"company": "...", "role": "...", "startDate": "...", "endDate": "...", "location": null, "bullets": ["..."]}],
  "projects": [],
  "education": [{"institution": "...", "degree": "...", "field": null, "startDate": null, "endDate": null, "gpa": null, "honors": []}],
  "certifications": []
}

- Keep bullets as they appear, minus line-break artifacts.
- Put anything that is clearly a skills list into "skills".
- Leave arrays empty rather than guessing.

EXTRACTED TEXT:
{resume_text}"#;
