//! Field registry: static descriptors for the seven repeatable sections.
//!
//! Each descriptor lists `(selector, attribute)` pairs in form order. The same
//! list drives both `collect` and `populate`, which is what makes the two
//! directions inverse for every row that survives collection.

use serde::{Deserialize, Serialize};

/// A repeatable section of the document, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Skills,
    Experience,
    Education,
    Projects,
    Certifications,
    Languages,
    Hobbies,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Skills,
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Certifications,
        Section::Languages,
        Section::Hobbies,
    ];

    pub fn descriptor(&self) -> &'static SectionDescriptor {
        match self {
            Section::Skills => &SKILLS,
            Section::Experience => &EXPERIENCE,
            Section::Education => &EDUCATION,
            Section::Projects => &PROJECTS,
            Section::Certifications => &CERTIFICATIONS,
            Section::Languages => &LANGUAGES,
            Section::Hobbies => &HOBBIES,
        }
    }
}

/// One input of a row: the form selector key and the model attribute it maps to.
#[derive(Debug)]
pub struct FieldDescriptor {
    pub selector: &'static str,
    pub attribute: &'static str,
    /// Value used when the input is unset (or outside `choices`).
    pub default: &'static str,
    /// Allowed values for enum-valued attributes. Empty means free text.
    pub choices: &'static [&'static str],
}

impl FieldDescriptor {
    const fn text(selector: &'static str, attribute: &'static str) -> Self {
        FieldDescriptor {
            selector,
            attribute,
            default: "",
            choices: &[],
        }
    }

    /// Normalises a raw input value: unset or unknown enum values fall back
    /// to the default, free text is kept verbatim.
    pub fn resolve(&self, raw: Option<&str>) -> String {
        match raw {
            Some(v) if self.choices.is_empty() => v.to_string(),
            Some(v) if self.choices.contains(&v) => v.to_string(),
            _ => self.default.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct SectionDescriptor {
    pub section: Section,
    pub fields: &'static [FieldDescriptor],
    /// Presence predicate: a row yields an entry if ANY of these attributes
    /// is non-empty.
    pub identifying: &'static [&'static str],
}

impl SectionDescriptor {
    pub fn field(&self, attribute: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.attribute == attribute)
    }

    /// Evaluates the presence predicate against an attribute lookup.
    pub fn is_present<'a>(&self, value_of: impl Fn(&str) -> Option<&'a str>) -> bool {
        self.identifying
            .iter()
            .any(|attr| value_of(attr).is_some_and(|v| !v.is_empty()))
    }
}

const LANGUAGE_LEVELS: &[&str] = &["Native", "Fluent", "Advanced", "Intermediate", "Basic"];

static SKILLS: SectionDescriptor = SectionDescriptor {
    section: Section::Skills,
    fields: &[FieldDescriptor::text("skill-name", "name")],
    identifying: &["name"],
};

static EXPERIENCE: SectionDescriptor = SectionDescriptor {
    section: Section::Experience,
    fields: &[
        FieldDescriptor::text("exp-company", "company"),
        FieldDescriptor::text("exp-role", "role"),
        FieldDescriptor::text("exp-duration", "duration"),
        FieldDescriptor::text("exp-description", "description"),
    ],
    identifying: &["company", "role"],
};

static EDUCATION: SectionDescriptor = SectionDescriptor {
    section: Section::Education,
    fields: &[
        FieldDescriptor::text("edu-school", "school"),
        FieldDescriptor::text("edu-degree", "degree"),
        FieldDescriptor::text("edu-year", "year"),
        FieldDescriptor::text("edu-description", "description"),
    ],
    identifying: &["school", "degree"],
};

static PROJECTS: SectionDescriptor = SectionDescriptor {
    section: Section::Projects,
    fields: &[
        FieldDescriptor::text("proj-title", "title"),
        FieldDescriptor::text("proj-description", "description"),
        FieldDescriptor::text("proj-link", "link"),
    ],
    identifying: &["title"],
};

static CERTIFICATIONS: SectionDescriptor = SectionDescriptor {
    section: Section::Certifications,
    fields: &[
        FieldDescriptor::text("cert-name", "name"),
        FieldDescriptor::text("cert-issuer", "issuer"),
        FieldDescriptor::text("cert-year", "year"),
    ],
    identifying: &["name"],
};

static LANGUAGES: SectionDescriptor = SectionDescriptor {
    section: Section::Languages,
    fields: &[
        FieldDescriptor::text("lang-name", "name"),
        FieldDescriptor {
            selector: "lang-level",
            attribute: "level",
            default: "Fluent",
            choices: LANGUAGE_LEVELS,
        },
    ],
    identifying: &["name"],
};

static HOBBIES: SectionDescriptor = SectionDescriptor {
    section: Section::Hobbies,
    fields: &[FieldDescriptor::text("hobby-name", "name")],
    identifying: &["name"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<&'a str> + 'a {
        move |attr| pairs.iter().find(|(k, _)| *k == attr).map(|(_, v)| *v)
    }

    #[test]
    fn test_every_section_has_a_descriptor() {
        for section in Section::ALL {
            assert_eq!(section.descriptor().section, section);
        }
    }

    #[test]
    fn test_selectors_are_unique_across_registry() {
        let mut seen = HashSet::new();
        for section in Section::ALL {
            for field in section.descriptor().fields {
                assert!(seen.insert(field.selector), "duplicate selector {}", field.selector);
            }
        }
    }

    #[test]
    fn test_identifying_attributes_are_declared_fields() {
        for section in Section::ALL {
            let desc = section.descriptor();
            for attr in desc.identifying {
                assert!(desc.field(attr).is_some(), "{attr} missing in {:?}", section);
            }
        }
    }

    #[test]
    fn test_experience_accepts_company_or_role() {
        let desc = Section::Experience.descriptor();
        assert!(desc.is_present(lookup(&[("role", "Engineer")])));
        assert!(desc.is_present(lookup(&[("company", "Acme")])));
        assert!(!desc.is_present(lookup(&[("duration", "2020"), ("description", "x")])));
    }

    #[test]
    fn test_projects_require_title() {
        let desc = Section::Projects.descriptor();
        assert!(!desc.is_present(lookup(&[("description", "A tool"), ("link", "https://x.dev")])));
        assert!(desc.is_present(lookup(&[("title", "Engine")])));
    }

    #[test]
    fn test_whitespace_only_value_counts_as_present() {
        let desc = Section::Skills.descriptor();
        assert!(desc.is_present(lookup(&[("name", "   ")])));
        assert!(!desc.is_present(lookup(&[("name", "")])));
    }

    #[test]
    fn test_language_level_resolves_to_default() {
        let level = Section::Languages.descriptor().field("level").unwrap();
        assert_eq!(level.resolve(None), "Fluent");
        assert_eq!(level.resolve(Some("")), "Fluent");
        assert_eq!(level.resolve(Some("Klingon")), "Fluent");
        assert_eq!(level.resolve(Some("Native")), "Native");
    }

    #[test]
    fn test_text_fields_keep_value_verbatim() {
        let name = Section::Skills.descriptor().field("name").unwrap();
        assert_eq!(name.resolve(Some("  Rust ")), "  Rust ");
        assert_eq!(name.resolve(None), "");
    }
}
