//! Resume renderer.
//!
//! Block order is fixed: header, summary, skills, experience, education,
//! projects, certifications, languages, hobbies. A section with no entries is
//! left out entirely.

use url::Url;

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
    ResumeDocument,
};
use crate::render::markup::Markup;
use crate::render::themes::DEFAULT_THEME;

/// Renders with the default theme.
pub fn render(doc: &ResumeDocument) -> String {
    render_themed(doc, DEFAULT_THEME)
}

/// Renders the resume fragment. The theme id only selects the root CSS class.
pub fn render_themed(doc: &ResumeDocument, theme: &str) -> String {
    let mut m = Markup::new();
    write_resume(&mut m, doc, theme);
    m.into_string()
}

/// Complete HTML document around the fragment, used for print and export.
pub fn render_page(doc: &ResumeDocument, theme: &str) -> String {
    let title = match doc.personal.full_name.trim() {
        "" => "Resume".to_string(),
        name => format!("{name} - Resume"),
    };

    let mut m = Markup::new();
    m.raw_doctype()
        .open("html", &[("lang", "en")])
        .open("head", &[])
        .void("meta", &[("charset", "utf-8")])
        .element("title", &[], &title)
        .close("head")
        .open("body", &[]);
    write_resume(&mut m, doc, theme);
    m.close("body").close("html");
    m.into_string()
}

fn write_resume(m: &mut Markup, doc: &ResumeDocument, theme: &str) {
    let root_class = format!("resume-theme-{theme}");
    m.open("div", &[("class", root_class.as_str())]);

    write_header(m, doc);

    let p = &doc.personal;
    if !p.profile_summary.is_empty() {
        open_section(m, "Professional Summary");
        m.element("p", &[], &p.profile_summary);
        m.close("div");
    }

    if !doc.skills.is_empty() {
        write_tags(m, "Skills", doc.skills.iter().map(|s| s.name.clone()));
    }

    if !doc.experience.is_empty() {
        open_section(m, "Work Experience");
        for exp in &doc.experience {
            write_experience(m, exp);
        }
        m.close("div");
    }

    if !doc.education.is_empty() {
        open_section(m, "Education");
        for edu in &doc.education {
            write_education(m, edu);
        }
        m.close("div");
    }

    if !doc.projects.is_empty() {
        open_section(m, "Projects");
        for proj in &doc.projects {
            write_project(m, proj);
        }
        m.close("div");
    }

    if !doc.certifications.is_empty() {
        open_section(m, "Certifications");
        for cert in &doc.certifications {
            write_certification(m, cert);
        }
        m.close("div");
    }

    if !doc.languages.is_empty() {
        write_tags(
            m,
            "Languages",
            doc.languages
                .iter()
                .map(|l| format!("{} ({})", l.name, l.level.as_str())),
        );
    }

    if !doc.hobbies.is_empty() {
        write_tags(m, "Interests", doc.hobbies.iter().map(|h| h.name.clone()));
    }

    m.close("div");
}

fn write_header(m: &mut Markup, doc: &ResumeDocument) {
    let mut class = String::from("resume-header");
    if doc.photo.is_some() {
        class.push_str(" with-photo");
    }
    if doc.logo.is_some() {
        class.push_str(" with-logo");
    }
    m.open("div", &[("class", class.as_str())]);

    if let Some(photo) = &doc.photo {
        m.void(
            "img",
            &[
                ("src", photo.as_str()),
                ("alt", "Profile Photo"),
                ("class", "resume-photo"),
            ],
        );
    }
    if let Some(logo) = &doc.logo {
        m.void(
            "img",
            &[
                ("src", logo.as_str()),
                ("alt", "Company Logo"),
                ("class", "resume-logo"),
            ],
        );
    }

    let p = &doc.personal;
    m.open("div", &[("class", "resume-header-content")]);
    m.element("h1", &[], or_placeholder(&p.full_name, "Your Name"));
    m.element("h2", &[], or_placeholder(&p.job_title, "Your Job Title"));
    write_contact_line(m, p);
    m.close("div").close("div");
}

fn write_contact_line(m: &mut Markup, p: &PersonalInfo) {
    m.open("div", &[("class", "contact-info")]);
    if !p.phone.is_empty() {
        contact(m, "fas fa-phone", |m| {
            m.text(&p.phone);
        });
    }
    if !p.email.is_empty() {
        contact(m, "fas fa-envelope", |m| {
            m.text(&p.email);
        });
    }
    if !p.linkedin.is_empty() {
        contact(m, "fab fa-linkedin", |m| link_or_text(m, &p.linkedin, "LinkedIn"));
    }
    if !p.website.is_empty() {
        contact(m, "fas fa-globe", |m| link_or_text(m, &p.website, "Portfolio"));
    }
    if !p.address.is_empty() {
        contact(m, "fas fa-map-marker-alt", |m| {
            m.text(&p.address);
        });
    }
    m.close("div");
}

fn contact(m: &mut Markup, icon: &str, body: impl FnOnce(&mut Markup)) {
    m.open("span", &[]).element("i", &[("class", icon)], "").text(" ");
    body(m);
    m.close("span");
}

fn write_experience(m: &mut Markup, exp: &ExperienceEntry) {
    m.open("div", &[("class", "resume-item")]);
    m.element("h4", &[], &join_present(&[exp.role.as_str(), exp.company.as_str()], " - "));
    meta_line(m, &exp.duration);
    if !exp.description.is_empty() {
        m.element("p", &[], &exp.description);
    }
    m.close("div");
}

fn write_education(m: &mut Markup, edu: &EducationEntry) {
    m.open("div", &[("class", "resume-item")]);
    if edu.degree.is_empty() {
        m.element("h4", &[], &edu.school);
        meta_line(m, &edu.year);
    } else {
        m.element("h4", &[], &edu.degree);
        meta_line(m, &join_present(&[edu.school.as_str(), edu.year.as_str()], " | "));
    }
    if !edu.description.is_empty() {
        m.element("p", &[], &edu.description);
    }
    m.close("div");
}

fn write_project(m: &mut Markup, proj: &ProjectEntry) {
    m.open("div", &[("class", "resume-item")]);
    m.element("h4", &[], &proj.title);
    if !proj.description.is_empty() {
        m.element("p", &[], &proj.description);
    }
    if !proj.link.is_empty() {
        m.open("p", &[("class", "resume-item-meta")]);
        link_or_text(m, &proj.link, &proj.link);
        m.close("p");
    }
    m.close("div");
}

fn write_certification(m: &mut Markup, cert: &CertificationEntry) {
    m.open("div", &[("class", "resume-item")]);
    m.element("h4", &[], &cert.name);
    meta_line(m, &join_present(&[cert.issuer.as_str(), cert.year.as_str()], " | "));
    m.close("div");
}

fn open_section(m: &mut Markup, title: &str) {
    m.open("div", &[("class", "resume-section")])
        .element("h3", &[("class", "resume-section-title")], title);
}

fn write_tags(m: &mut Markup, title: &str, tags: impl Iterator<Item = String>) {
    open_section(m, title);
    m.open("div", &[("class", "skills-list")]);
    for tag in tags {
        m.element("span", &[("class", "skill-tag")], &tag);
    }
    m.close("div").close("div");
}

fn meta_line(m: &mut Markup, text: &str) {
    if !text.is_empty() {
        m.element("p", &[("class", "resume-item-meta")], text);
    }
}

/// Anchor for http(s) URLs; any other scheme is shown as plain text so a
/// stored `javascript:` link never becomes clickable.
fn link_or_text(m: &mut Markup, raw: &str, label: &str) {
    match safe_href(raw) {
        Some(href) => {
            m.element(
                "a",
                &[("href", href.as_str()), ("target", "_blank"), ("rel", "noopener")],
                label,
            );
        }
        None => {
            m.text(label);
        }
    }
}

fn safe_href(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn join_present(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::image::{encode_upload, ImageKind};
    use crate::models::resume::{HobbyEntry, LanguageEntry, LanguageLevel, SkillEntry};

    fn ada() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.personal.full_name = "Ada Lovelace".to_string();
        doc.skills.push(SkillEntry {
            name: "Mathematics".to_string(),
        });
        doc
    }

    #[test]
    fn test_render_is_pure() {
        let doc = ada();
        assert_eq!(render(&doc), render(&doc));
    }

    #[test]
    fn test_ada_scenario() {
        let html = render(&ada());
        assert!(html.contains("<h1>Ada Lovelace</h1>"));
        assert!(html.contains("<span class=\"skill-tag\">Mathematics</span>"));
        assert_eq!(html.matches("skill-tag").count(), 1);
        assert!(!html.contains("Work Experience"));
    }

    #[test]
    fn test_empty_document_uses_placeholders_and_no_sections() {
        let html = render(&ResumeDocument::default());
        assert!(html.contains("<h1>Your Name</h1>"));
        assert!(html.contains("<h2>Your Job Title</h2>"));
        assert!(!html.contains("resume-section"));
    }

    #[test]
    fn test_sections_render_in_fixed_order() {
        let mut doc = ada();
        doc.personal.profile_summary = "Pioneer".to_string();
        doc.hobbies.push(HobbyEntry {
            name: "Poetry".to_string(),
        });
        doc.experience.push(ExperienceEntry {
            role: "Analyst".to_string(),
            ..Default::default()
        });
        doc.languages.push(LanguageEntry {
            name: "French".to_string(),
            level: LanguageLevel::Advanced,
        });
        let html = render(&doc);

        let order = [
            "Professional Summary",
            "Skills",
            "Work Experience",
            "Languages",
            "Interests",
        ];
        let positions: Vec<_> = order.iter().map(|t| html.find(t).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("French (Advanced)"));
    }

    #[test]
    fn test_one_sub_block_per_entry_in_order() {
        let mut doc = ResumeDocument::default();
        for company in ["First", "Second", "Third"] {
            doc.experience.push(ExperienceEntry {
                company: company.to_string(),
                role: "Dev".to_string(),
                duration: "2020".to_string(),
                description: String::new(),
            });
        }
        let html = render(&doc);
        assert_eq!(html.matches("class=\"resume-item\"").count(), 3);
        assert!(html.find("Dev - First").unwrap() < html.find("Dev - Second").unwrap());
        assert!(html.find("Dev - Second").unwrap() < html.find("Dev - Third").unwrap());
    }

    #[test]
    fn test_role_only_experience_title_has_no_dangling_separator() {
        let mut doc = ResumeDocument::default();
        doc.experience.push(ExperienceEntry {
            role: "Engineer".to_string(),
            ..Default::default()
        });
        assert!(render(&doc).contains("<h4>Engineer</h4>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut doc = ResumeDocument::default();
        doc.personal.full_name = "<script>alert(1)</script>".to_string();
        doc.skills.push(SkillEntry {
            name: "\"><img src=x onerror=alert(1)>".to_string(),
        });
        let html = render(&doc);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_project_link_only_for_http_schemes() {
        let mut doc = ResumeDocument::default();
        doc.projects.push(ProjectEntry {
            title: "Safe".to_string(),
            description: String::new(),
            link: "https://example.org/engine".to_string(),
        });
        doc.projects.push(ProjectEntry {
            title: "Unsafe".to_string(),
            description: String::new(),
            link: "javascript:alert(1)".to_string(),
        });
        let html = render(&doc);
        assert!(html.contains("href=\"https://example.org/engine\""));
        assert!(!html.contains("href=\"javascript"));
        assert!(html.contains("javascript:alert(1)"));
    }

    #[test]
    fn test_contact_line_lists_only_present_fields() {
        let mut doc = ResumeDocument::default();
        doc.personal.email = "ada@example.org".to_string();
        let html = render(&doc);
        assert!(html.contains("fa-envelope"));
        assert!(!html.contains("fa-phone"));
        assert!(!html.contains("fa-linkedin"));
    }

    #[test]
    fn test_images_render_in_header() {
        let mut doc = ResumeDocument::default();
        doc.photo = Some(encode_upload(ImageKind::Photo, "image/png", &[1, 2, 3]).unwrap());
        let html = render(&doc);
        assert!(html.contains("resume-header with-photo"));
        assert!(html.contains("src=\"data:image/png;base64,AQID\""));
        assert!(!html.contains("resume-logo"));
    }

    #[test]
    fn test_certification_and_education_meta_lines() {
        let mut doc = ResumeDocument::default();
        doc.certifications.push(CertificationEntry {
            name: "AWS Developer".to_string(),
            issuer: "Amazon".to_string(),
            year: "2023".to_string(),
        });
        doc.education.push(EducationEntry {
            school: "MIT".to_string(),
            degree: "BSc".to_string(),
            year: "2020".to_string(),
            description: String::new(),
        });
        let html = render(&doc);
        assert!(html.contains("<p class=\"resume-item-meta\">Amazon | 2023</p>"));
        assert!(html.contains("<h4>BSc</h4><p class=\"resume-item-meta\">MIT | 2020</p>"));
    }

    #[test]
    fn test_theme_selects_root_class() {
        let html = render_themed(&ada(), "tech-savvy");
        assert!(html.starts_with("<div class=\"resume-theme-tech-savvy\">"));
    }

    #[test]
    fn test_page_wraps_fragment() {
        let page = render_page(&ada(), DEFAULT_THEME);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Ada Lovelace - Resume</title>"));
        assert!(page.contains(&render(&ada())));
    }
}
