use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::mapper::{assign, FieldMapping, MappedRecord};

/// A person returned either from people search or from the profile service.
///
/// Some properties only exist in one of the two sources: `office` and
/// `last_modified` are only filled from search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    /// About me text on the user profile
    pub about_me: Option<String>,
    pub department: Option<String>,
    pub display_name: Option<String>,
    /// Work email address
    pub email_address: Option<String>,
    /// User defined interests (multi-value)
    pub interests: Option<Vec<String>>,
    /// When the search index last saw a change to this entry
    pub last_modified: Option<DateTime<Utc>>,
    pub office: Option<String>,
    /// User defined past projects (multi-value)
    pub past_projects: Option<Vec<String>>,
    /// User defined responsibilities (multi-value)
    pub responsibilities: Option<Vec<String>>,
    /// User defined skills (multi-value)
    pub skills: Option<Vec<String>>,
    /// Job title
    pub title: Option<String>,
    /// Account name; can be passed to a profile lookup
    pub username: Option<String>,
}

type PersonField = FieldMapping<Person>;

static PERSON_MAPPINGS: Lazy<Vec<PersonField>> = Lazy::new(|| {
    vec![
        PersonField::new("AboutMe", |p, v| assign(&mut p.about_me, v))
            .search("AboutMe")
            .profile("AboutMe"),
        PersonField::new("Department", |p, v| assign(&mut p.department, v))
            .search("Department")
            .profile("Department"),
        PersonField::new("DisplayName", |p, v| assign(&mut p.display_name, v))
            .search("PreferredName")
            .profile("DisplayName"),
        PersonField::new("EmailAddress", |p, v| assign(&mut p.email_address, v))
            .search("WorkEmail")
            .profile("WorkEmail"),
        PersonField::new("Interests", |p, v| assign(&mut p.interests, v))
            .search_split("Interests")
            .profile_split("SPS-Interests"),
        PersonField::new("LastModified", |p, v| assign(&mut p.last_modified, v))
            .search("LastModifiedTime"),
        PersonField::new("Office", |p, v| assign(&mut p.office, v)).search("OfficeNumber"),
        PersonField::new("PastProjects", |p, v| assign(&mut p.past_projects, v))
            .search_split("PastProjects")
            .profile_split("SPS-PastProjects"),
        PersonField::new("Responsibilities", |p, v| assign(&mut p.responsibilities, v))
            .search_split("Responsibilities")
            .profile_split("SPS-Responsibility"),
        PersonField::new("Skills", |p, v| assign(&mut p.skills, v))
            .search_split("Skills")
            .profile_split("SPS-Skills"),
        PersonField::new("Title", |p, v| assign(&mut p.title, v))
            .search("JobTitle")
            .profile("Title"),
        PersonField::new("Username", |p, v| assign(&mut p.username, v))
            .search("AccountName")
            .profile("UserName"),
    ]
});

impl MappedRecord for Person {
    fn create() -> Self {
        Self::default()
    }

    fn field_mappings() -> &'static [FieldMapping<Self>] {
        &PERSON_MAPPINGS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{map_from_bag, select_properties, PropertyBag, Shape};
    use chrono::TimeZone;
    use serde_json::json;

    fn bag(entries: &[(&str, serde_json::Value)]) -> PropertyBag {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_person_from_search_row() {
        let row = bag(&[
            ("PreferredName", json!("Ada Lovelace")),
            ("WorkEmail", json!("ada@example.com")),
            ("JobTitle", json!("Analyst")),
            ("AccountName", json!("i:0#.f|membership|ada@example.com")),
            ("Skills", json!("math;poetry;")),
            ("OfficeNumber", json!("B-12")),
            ("LastModifiedTime", json!("2024-03-01T09:30:00Z")),
            ("Rank", json!(16.5)),
        ]);

        let person: Person = map_from_bag(&row, Shape::Search).unwrap();
        assert_eq!(person.display_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(person.email_address.as_deref(), Some("ada@example.com"));
        assert_eq!(person.title.as_deref(), Some("Analyst"));
        assert_eq!(person.office.as_deref(), Some("B-12"));
        assert_eq!(
            person.skills,
            Some(vec!["math".to_string(), "poetry".to_string()])
        );
        assert_eq!(
            person.last_modified,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
        );
        assert_eq!(person.interests, None);
    }

    #[test]
    fn test_person_from_profile_properties() {
        let props = bag(&[
            ("DisplayName", json!("Grace Hopper")),
            ("UserName", json!("grace")),
            ("Title", json!("Rear Admiral")),
            ("SPS-Interests", json!("cooking|reading|")),
            ("SPS-PastProjects", json!("")),
            ("OfficeNumber", json!("ignored for profiles")),
        ]);

        let person: Person = map_from_bag(&props, Shape::Profile).unwrap();
        assert_eq!(person.display_name.as_deref(), Some("Grace Hopper"));
        assert_eq!(person.username.as_deref(), Some("grace"));
        assert_eq!(person.title.as_deref(), Some("Rear Admiral"));
        assert_eq!(
            person.interests,
            Some(vec!["cooking".to_string(), "reading".to_string()])
        );
        assert_eq!(person.past_projects, None);
        assert_eq!(person.office, None);
    }

    #[test]
    fn test_search_select_properties() {
        let keys = select_properties::<Person>(Shape::Search);
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[0], "AboutMe");
        assert!(keys.contains(&"LastModifiedTime".to_string()));

        let keys = select_properties::<Person>(Shape::Profile);
        assert_eq!(keys.len(), 10);
        assert!(!keys.contains(&"OfficeNumber".to_string()));
    }

    #[test]
    fn test_person_serializes_with_published_names() {
        let person = Person {
            display_name: Some("Ada".to_string()),
            ..Person::default()
        };
        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(value["DisplayName"], json!("Ada"));
        assert_eq!(value["Skills"], json!(null));
    }
}
