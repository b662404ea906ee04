//! Form <-> document synchronisation.
//!
//! `collect` rebuilds every section of the document from the rendered rows;
//! `populate` emits the rows the form should render for a document. Both
//! walk the same registry descriptors, so seven sections share one algorithm.

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::form::registry::{Section, SectionDescriptor};
use crate::models::image::ImageRef;
use crate::models::resume::{PersonalInfo, ResumeDocument};

/// Values of one rendered row, keyed by input selector (`exp-company`, ...).
pub type FormRow = BTreeMap<String, String>;

/// Everything the form currently shows: the personal fields plus the rows of
/// each repeatable section in render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub personal: PersonalInfo,
    pub sections: BTreeMap<Section, Vec<FormRow>>,
}

impl FormState {
    pub fn rows(&self, section: Section) -> &[FormRow] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Result of `populate`: the form state to render plus the single-valued
/// image slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulatedForm {
    pub form: FormState,
    pub photo: Option<ImageRef>,
    pub logo: Option<ImageRef>,
}

/// Form -> document. Each section is replaced wholesale; rows failing the
/// section's presence predicate are dropped. Images are left alone.
pub fn collect(form: &FormState, doc: &mut ResumeDocument) {
    doc.personal = form.personal.clone();
    for section in Section::ALL {
        let desc = section.descriptor();
        let rows = form.rows(section);
        match section {
            Section::Skills => doc.skills = collect_section(desc, rows),
            Section::Experience => doc.experience = collect_section(desc, rows),
            Section::Education => doc.education = collect_section(desc, rows),
            Section::Projects => doc.projects = collect_section(desc, rows),
            Section::Certifications => doc.certifications = collect_section(desc, rows),
            Section::Languages => doc.languages = collect_section(desc, rows),
            Section::Hobbies => doc.hobbies = collect_section(desc, rows),
        }
    }
}

/// Document -> form. One row per entry in order; an empty section gets a
/// single blank row so the form always has something to edit.
pub fn populate(doc: &ResumeDocument) -> PopulatedForm {
    let sections = Section::ALL
        .into_iter()
        .map(|section| {
            let desc = section.descriptor();
            let rows = match section {
                Section::Skills => populate_section(desc, &doc.skills),
                Section::Experience => populate_section(desc, &doc.experience),
                Section::Education => populate_section(desc, &doc.education),
                Section::Projects => populate_section(desc, &doc.projects),
                Section::Certifications => populate_section(desc, &doc.certifications),
                Section::Languages => populate_section(desc, &doc.languages),
                Section::Hobbies => populate_section(desc, &doc.hobbies),
            };
            (section, rows)
        })
        .collect();

    PopulatedForm {
        form: FormState {
            personal: doc.personal.clone(),
            sections,
        },
        photo: doc.photo.clone(),
        logo: doc.logo.clone(),
    }
}

fn collect_section<T: DeserializeOwned>(desc: &SectionDescriptor, rows: &[FormRow]) -> Vec<T> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let entry = extract_entry(desc, row);
            if entry.is_none() {
                debug!("Skipping blank {:?} row {index}", desc.section);
            }
            entry
        })
        .filter_map(|entry| match serde_json::from_value(Value::Object(entry)) {
            Ok(typed) => Some(typed),
            Err(e) => {
                warn!("Dropping malformed {:?} entry: {e}", desc.section);
                None
            }
        })
        .collect()
}

fn extract_entry(desc: &SectionDescriptor, row: &FormRow) -> Option<Map<String, Value>> {
    let value_of = |attribute: &str| {
        desc.field(attribute)
            .and_then(|f| row.get(f.selector))
            .map(String::as_str)
    };
    if !desc.is_present(value_of) {
        return None;
    }

    Some(
        desc.fields
            .iter()
            .map(|f| {
                let value = f.resolve(row.get(f.selector).map(String::as_str));
                (f.attribute.to_string(), Value::String(value))
            })
            .collect(),
    )
}

fn populate_section<T: Serialize>(desc: &SectionDescriptor, entries: &[T]) -> Vec<FormRow> {
    if entries.is_empty() {
        return vec![blank_row(desc)];
    }

    entries
        .iter()
        .map(|entry| {
            let value = serde_json::to_value(entry).unwrap_or(Value::Null);
            desc.fields
                .iter()
                .map(|f| {
                    let raw = value.get(f.attribute).and_then(Value::as_str);
                    (f.selector.to_string(), f.resolve(raw))
                })
                .collect()
        })
        .collect()
}

fn blank_row(desc: &SectionDescriptor) -> FormRow {
    desc.fields
        .iter()
        .map(|f| (f.selector.to_string(), f.resolve(None)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ExperienceEntry, LanguageLevel, SkillEntry};

    fn row(pairs: &[(&str, &str)]) -> FormRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn form_with(section: Section, rows: Vec<FormRow>) -> FormState {
        let mut form = FormState::default();
        form.sections.insert(section, rows);
        form
    }

    #[test]
    fn test_experience_without_company_or_role_is_dropped() {
        let form = form_with(
            Section::Experience,
            vec![
                row(&[("exp-duration", "2020"), ("exp-description", "stuff")]),
                row(&[("exp-role", "Engineer")]),
            ],
        );
        let mut doc = ResumeDocument::default();
        collect(&form, &mut doc);

        assert_eq!(
            doc.experience,
            vec![ExperienceEntry {
                company: String::new(),
                role: "Engineer".to_string(),
                duration: String::new(),
                description: String::new(),
            }]
        );
    }

    #[test]
    fn test_collect_replaces_previous_sequence() {
        let mut doc = ResumeDocument::default();
        doc.skills = vec![SkillEntry {
            name: "Old".to_string(),
        }];
        let form = form_with(Section::Skills, vec![row(&[("skill-name", "New")])]);
        collect(&form, &mut doc);
        assert_eq!(doc.skills.len(), 1);
        assert_eq!(doc.skills[0].name, "New");
    }

    #[test]
    fn test_whitespace_only_name_keeps_row() {
        let form = form_with(Section::Skills, vec![row(&[("skill-name", " ")])]);
        let mut doc = ResumeDocument::default();
        collect(&form, &mut doc);
        assert_eq!(doc.skills.len(), 1);
        assert_eq!(doc.skills[0].name, " ");
    }

    #[test]
    fn test_collect_keeps_render_order() {
        let form = form_with(
            Section::Hobbies,
            vec![
                row(&[("hobby-name", "Chess")]),
                row(&[("hobby-name", "")]),
                row(&[("hobby-name", "Rowing")]),
            ],
        );
        let mut doc = ResumeDocument::default();
        collect(&form, &mut doc);
        let names: Vec<_> = doc.hobbies.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Chess", "Rowing"]);
    }

    #[test]
    fn test_empty_section_collects_to_empty_sequence() {
        let mut doc = ResumeDocument::default();
        collect(&FormState::default(), &mut doc);
        assert!(doc.skills.is_empty());
        assert!(doc.certifications.is_empty());
    }

    #[test]
    fn test_language_without_level_defaults_to_fluent() {
        let form = form_with(Section::Languages, vec![row(&[("lang-name", "French")])]);
        let mut doc = ResumeDocument::default();
        collect(&form, &mut doc);
        assert_eq!(doc.languages.len(), 1);
        assert_eq!(doc.languages[0].name, "French");
        assert_eq!(doc.languages[0].level, LanguageLevel::Fluent);
    }

    #[test]
    fn test_unknown_language_level_falls_back() {
        let form = form_with(
            Section::Languages,
            vec![row(&[("lang-name", "Latin"), ("lang-level", "Ancient")])],
        );
        let mut doc = ResumeDocument::default();
        collect(&form, &mut doc);
        assert_eq!(doc.languages[0].level, LanguageLevel::Fluent);
    }

    #[test]
    fn test_collect_leaves_images_untouched() {
        let mut doc = ResumeDocument::default();
        doc.photo = Some(
            crate::models::image::encode_upload(
                crate::models::image::ImageKind::Photo,
                "image/png",
                &[7],
            )
            .unwrap(),
        );
        collect(&FormState::default(), &mut doc);
        assert!(doc.photo.is_some());
    }

    #[test]
    fn test_personal_is_copied_field_by_field() {
        let mut form = FormState::default();
        form.personal.full_name = "Ada Lovelace".to_string();
        let mut doc = ResumeDocument::default();
        doc.personal.email = "stale@example.com".to_string();
        collect(&form, &mut doc);
        assert_eq!(doc.personal.full_name, "Ada Lovelace");
        assert_eq!(doc.personal.email, "");
    }

    #[test]
    fn test_populate_empty_section_emits_one_blank_row() {
        let populated = populate(&ResumeDocument::default());
        for section in Section::ALL {
            let rows = populated.form.rows(section);
            assert_eq!(rows.len(), 1, "{:?}", section);
        }
        let lang = &populated.form.rows(Section::Languages)[0];
        assert_eq!(lang["lang-name"], "");
        assert_eq!(lang["lang-level"], "Fluent");
    }

    #[test]
    fn test_populate_then_collect_round_trips_surviving_rows() {
        let original = form_with(
            Section::Experience,
            vec![
                row(&[
                    ("exp-company", "Analytical Engines Ltd"),
                    ("exp-role", "Programmer"),
                    ("exp-duration", "1842 - 1843"),
                    ("exp-description", "Notes on the engine"),
                ]),
                row(&[
                    ("exp-company", ""),
                    ("exp-role", "Consultant"),
                    ("exp-duration", ""),
                    ("exp-description", ""),
                ]),
            ],
        );
        let mut doc = ResumeDocument::default();
        collect(&original, &mut doc);

        let populated = populate(&doc);
        assert_eq!(
            populated.form.rows(Section::Experience),
            original.rows(Section::Experience)
        );

        let mut again = ResumeDocument::default();
        collect(&populated.form, &mut again);
        assert_eq!(again, doc);
    }

    #[test]
    fn test_round_trip_over_every_section() {
        let mut form = FormState::default();
        form.sections.insert(Section::Skills, vec![row(&[("skill-name", "Rust")])]);
        form.sections.insert(
            Section::Education,
            vec![row(&[
                ("edu-school", "University of London"),
                ("edu-degree", "Mathematics"),
                ("edu-year", "1840"),
                ("edu-description", ""),
            ])],
        );
        form.sections.insert(
            Section::Projects,
            vec![row(&[
                ("proj-title", "Note G"),
                ("proj-description", "Bernoulli numbers"),
                ("proj-link", "https://example.org/note-g"),
            ])],
        );
        form.sections.insert(
            Section::Certifications,
            vec![row(&[
                ("cert-name", "Fellow"),
                ("cert-issuer", "Society"),
                ("cert-year", "1843"),
            ])],
        );
        form.sections.insert(
            Section::Languages,
            vec![row(&[("lang-name", "French"), ("lang-level", "Advanced")])],
        );
        form.sections.insert(Section::Hobbies, vec![row(&[("hobby-name", "Poetry")])]);

        let mut doc = ResumeDocument::default();
        collect(&form, &mut doc);
        let populated = populate(&doc);
        for section in [
            Section::Skills,
            Section::Education,
            Section::Projects,
            Section::Certifications,
            Section::Languages,
            Section::Hobbies,
        ] {
            assert_eq!(populated.form.rows(section), form.rows(section), "{:?}", section);
        }
    }

    #[test]
    fn test_form_state_decodes_section_keys() {
        let raw = r#"{"personal": {"fullName": "Ada"}, "sections": {"skills": [{"skill-name": "Rust"}]}}"#;
        let form: FormState = serde_json::from_str(raw).unwrap();
        assert_eq!(form.rows(Section::Skills)[0]["skill-name"], "Rust");
        assert!(form.rows(Section::Hobbies).is_empty());
    }
}
