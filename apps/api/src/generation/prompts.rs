// LLM prompt templates for CV and cover-letter generation.
// Placeholders are `{name}`; any other brace is literal text.

use crate::llm_client::prompts::{EXPERT_PERSONA, JSON_ONLY_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};
use crate::models::cv::CvRequest;
use crate::models::letter::LetterRequest;

/// CV prompt. Replace: {persona}, {full_name}, {email}, {phone}, {address},
/// {target_job}, {template_style}, {experience}, {education}, {skills},
/// {json_only}
pub const CV_PROMPT_TEMPLATE: &str = r#"{persona} Create an exceptional, high-impact CV for {full_name}.

TARGET POSITION: {target_job}
LAYOUT STYLE: {template_style}

CONTACT:
- Email: {email}
- Phone: {phone}
- Address: {address}

STRICT RULES:
- Use strong action verbs (Led, Optimised, Developed, Drove...)
- Quantify results (figures, percentages, measurable impact)
- Be concise: the CV must fit on ONE A4 page at most
- Match the tone to the seniority of the role (junior: learning, senior: leadership)
- Highlight transferable skills

JSON FORMAT ONLY (no markdown, no text before or after):
{
  "summary": "Catchy 2-3 line professional summary that positions the candidate",
  "experience": [
    {
      "title": "Job title",
      "company": "Company name",
      "dates": "MM/YYYY - MM/YYYY",
      "points": [
        "Concrete achievement with measurable impact",
        "Demonstrated technical or domain expertise",
        "Quantified accomplishment where possible"
      ]
    }
  ],
  "education": [
    {
      "degree": "Degree obtained",
      "school": "Institution",
      "year": "Year"
    }
  ],
  "skills": ["Skill 1", "Skill 2", "Skill 3", "Skill 4", "Skill 5"]
}

PROVIDED DATA:
- Experience: {experience}
- Education: {education}
- Skills: {skills}

{json_only}"#;

/// Cover-letter prompt. Replace: {full_name}, {email}, {phone}, {address},
/// {company_name}, {target_job}, {template_style}, {background},
/// {motivation}, {plain_text}
pub const LETTER_PROMPT_TEMPLATE: &str = r#"Write an EXCEPTIONAL, PERSONALISED cover letter for {full_name}.

TARGET COMPANY: {company_name}
POSITION: {target_job}
LETTER STYLE: {template_style}

CONTACT:
- Email: {email}
- Phone: {phone}
- Address: {address}

MANDATORY STRUCTURE (YOU-ME-US method):

1. YOU (the company) - 1 paragraph:
   - Why this company in particular?
   - Which value, mission or project attracts the candidate?
   - Show knowledge of the company

2. ME (the candidate) - 1-2 paragraphs:
   - Relevant background: {background}
   - Key skills for this position
   - One concrete achievement that proves the candidate's value

3. US (the synergy) - 1 paragraph:
   - How the candidate will contribute concretely
   - The added value of the profile
   - Motivation: {motivation}

STYLE:
- Professional yet human and authentic tone
- Avoid cliches ("I am writing to apply...", "I am currently looking for...")
- Be DIRECT and IMPACTFUL from the very first sentence
- 280 words maximum (1 A4 page)
- No corporate jargon

{plain_text}"#;

/// Single-pass `{key}` substitution. Values are inserted verbatim and never
/// re-scanned, so user text containing braces cannot trigger a second
/// substitution.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let var = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close, *value))
        });

        match var {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn build_cv_prompt(request: &CvRequest) -> String {
    render(
        CV_PROMPT_TEMPLATE,
        &[
            ("persona", EXPERT_PERSONA),
            ("full_name", request.full_name.as_str()),
            ("email", request.email.as_str()),
            ("phone", request.phone.as_str()),
            ("address", request.address.as_str()),
            ("target_job", request.target_job.as_str()),
            ("template_style", request.template_style()),
            ("experience", request.experience.as_str()),
            ("education", request.education.as_str()),
            ("skills", request.skills.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub fn build_letter_prompt(request: &LetterRequest) -> String {
    render(
        LETTER_PROMPT_TEMPLATE,
        &[
            ("full_name", request.full_name.as_str()),
            ("email", request.email.as_str()),
            ("phone", request.phone.as_str()),
            ("address", request.address.as_str()),
            ("company_name", request.company_name.as_str()),
            ("target_job", request.target_job.as_str()),
            ("template_style", request.template_style()),
            ("background", request.background.as_str()),
            ("motivation", request.motivation.as_str()),
            ("plain_text", PLAIN_TEXT_INSTRUCTION),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv_request() -> CvRequest {
        CvRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 0000 0000".to_string(),
            address: "London".to_string(),
            target_job: "Staff Engineer".to_string(),
            experience: "10 years building {distributed} systems".to_string(),
            education: "BSc Mathematics".to_string(),
            skills: "Rust, Go".to_string(),
            template_style: None,
        }
    }

    fn letter_request() -> LetterRequest {
        LetterRequest {
            full_name: "Grace Hopper".to_string(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            target_job: "Compiler Engineer".to_string(),
            company_name: "Remington Rand".to_string(),
            motivation: "Make programming accessible".to_string(),
            background: "Navy reserve, Harvard Mark I".to_string(),
            template_style: Some("bold".to_string()),
        }
    }

    #[test]
    fn test_render_replaces_known_keys_only() {
        let out = render("{a} {unknown} {\"json\": 1} {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x {unknown} {\"json\": 1} y");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = render("{a}|{b}", &[("a", "{b}"), ("b", "B")]);
        assert_eq!(out, "{b}|B");
    }

    #[test]
    fn test_render_handles_unclosed_brace() {
        assert_eq!(render("tail {a", &[("a", "x")]), "tail {a");
    }

    #[test]
    fn test_cv_prompt_embeds_every_field() {
        let request = cv_request();
        let prompt = build_cv_prompt(&request);

        for field in [
            &request.full_name,
            &request.email,
            &request.phone,
            &request.address,
            &request.target_job,
            &request.experience,
            &request.education,
            &request.skills,
        ] {
            assert!(prompt.contains(field.as_str()), "missing {field:?}");
        }
        assert!(prompt.contains("LAYOUT STYLE: modern"));
        assert!(prompt.contains("\"summary\""));
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
        assert!(!prompt.contains("{persona}"));
    }

    #[test]
    fn test_letter_prompt_embeds_structure_and_fields() {
        let request = letter_request();
        let prompt = build_letter_prompt(&request);

        assert!(prompt.contains("Grace Hopper"));
        assert!(prompt.contains("TARGET COMPANY: Remington Rand"));
        assert!(prompt.contains("POSITION: Compiler Engineer"));
        assert!(prompt.contains("Relevant background: Navy reserve, Harvard Mark I"));
        assert!(prompt.contains("Motivation: Make programming accessible"));
        assert!(prompt.contains("LETTER STYLE: bold"));
        assert!(prompt.contains("1. YOU"));
        assert!(prompt.contains("2. ME"));
        assert!(prompt.contains("3. US"));
        assert!(prompt.contains("280 words maximum"));
    }
}
