use bon::bon;
use library_macros::entity;
use serde::{Deserialize, Serialize};

use super::{BirthDate, PhoneNumber, ReaderNumber};
use crate::book::Genre;
use crate::entity::{EntityWithPhoto, Patchable};
use crate::error::{DomainError, DomainResult};
use crate::patch::Patch;
use crate::shared::{Name, Photo};
use crate::value_object::Version;

/// 读者聚合
///
/// 必须同意 GDPR 条款才能注册；营销与第三方共享授权可随时变更。
#[entity(id = ReaderNumber)]
pub struct Reader {
    name: Name,
    birth_date: BirthDate,
    phone_number: PhoneNumber,
    gdpr_consent: bool,
    marketing_consent: bool,
    third_party_sharing_consent: bool,
    photo: Option<Photo>,
    interests: Vec<Genre>,
}

/// 读者部分更新请求
///
/// `interests` 显式为 null 时清空兴趣列表。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderPatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub phone_number: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub marketing_consent: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub third_party_sharing_consent: Patch<bool>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub photo: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub interests: Patch<Vec<String>>,
}

#[bon]
impl Reader {
    #[builder]
    pub fn new(
        number: ReaderNumber,
        #[builder(into)] name: String,
        birth_date: BirthDate,
        #[builder(into)] phone_number: String,
        gdpr_consent: bool,
        #[builder(default)] marketing_consent: bool,
        #[builder(default)] third_party_sharing_consent: bool,
        #[builder(into)] photo: Option<String>,
        #[builder(default)] interests: Vec<Genre>,
    ) -> DomainResult<Self> {
        if !gdpr_consent {
            return Err(DomainError::invalid_argument(
                "gdpr_consent",
                "Readers must agree with the GDPR rules",
            ));
        }

        Ok(Self {
            id: number,
            version: Version::new(),
            name: Name::new(name)?,
            birth_date,
            phone_number: PhoneNumber::new(phone_number)?,
            gdpr_consent,
            marketing_consent,
            third_party_sharing_consent,
            photo: photo.map(Photo::new).transpose()?,
            interests: dedup_interests(interests),
        })
    }
}

impl Reader {
    pub fn number(&self) -> ReaderNumber {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn gdpr_consent(&self) -> bool {
        self.gdpr_consent
    }

    pub fn marketing_consent(&self) -> bool {
        self.marketing_consent
    }

    pub fn third_party_sharing_consent(&self) -> bool {
        self.third_party_sharing_consent
    }

    pub fn interests(&self) -> &[Genre] {
        &self.interests
    }
}

impl Patchable for Reader {
    type Patch = ReaderPatch;

    fn apply_patch(&mut self, expected: Version, patch: ReaderPatch) -> DomainResult<()> {
        self.guard_version(expected)?;

        let name = patch.name.required("name")?.map(Name::new).transpose()?;
        let phone_number = patch
            .phone_number
            .required("phone_number")?
            .map(PhoneNumber::new)
            .transpose()?;
        let marketing = patch.marketing_consent.required("marketing_consent")?;
        let third_party = patch
            .third_party_sharing_consent
            .required("third_party_sharing_consent")?;
        let photo = patch.photo.try_map(Photo::new)?;
        let interests = match patch.interests {
            Patch::Keep => None,
            Patch::Clear => Some(Vec::new()),
            Patch::Set(raw) => Some(
                raw.into_iter()
                    .map(Genre::new)
                    .collect::<DomainResult<Vec<_>>>()?,
            ),
        };

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(phone_number) = phone_number {
            self.phone_number = phone_number;
        }
        if let Some(marketing) = marketing {
            self.marketing_consent = marketing;
        }
        if let Some(third_party) = third_party {
            self.third_party_sharing_consent = third_party;
        }
        photo.apply_to(&mut self.photo);
        if let Some(interests) = interests {
            self.interests = dedup_interests(interests);
        }

        self.advance_version();
        Ok(())
    }
}

impl EntityWithPhoto for Reader {
    fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    fn remove_photo(&mut self, expected: Version) -> DomainResult<()> {
        self.guard_version(expected)?;
        self.photo = None;
        self.advance_version();
        Ok(())
    }
}

fn dedup_interests(interests: Vec<Genre>) -> Vec<Genre> {
    let mut unique = Vec::with_capacity(interests.len());
    for genre in interests {
        if !unique.contains(&genre) {
            unique.push(genre);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entity::Entity;
    use crate::reader::AgePolicy;

    fn birth_date() -> BirthDate {
        BirthDate::with_policy(
            NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
            &AgePolicy::default(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    fn reader() -> Reader {
        Reader::builder()
            .number(ReaderNumber::new(2024, 1))
            .name("Maria José")
            .birth_date(birth_date())
            .phone_number("912345678")
            .gdpr_consent(true)
            .photo("photos/maria.png")
            .interests(vec![Genre::new("Fantasy").unwrap()])
            .build()
            .unwrap()
    }

    #[test]
    fn registration_requires_gdpr_consent() {
        let err = Reader::builder()
            .number(ReaderNumber::new(2024, 2))
            .name("Alex")
            .birth_date(birth_date())
            .phone_number("912345678")
            .gdpr_consent(false)
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { field: "gdpr_consent", .. }));
    }

    #[test]
    fn defaults_optional_consents_to_false() {
        let reader = reader();
        assert!(reader.gdpr_consent());
        assert!(!reader.marketing_consent());
        assert!(!reader.third_party_sharing_consent());
        assert_eq!(reader.number().to_string(), "2024/1");
        assert!(reader.version().is_initial());
    }

    #[test]
    fn patch_replaces_interests_and_consents() {
        let mut reader = reader();
        reader
            .apply_patch(
                Version::new(),
                ReaderPatch {
                    marketing_consent: Patch::Set(true),
                    interests: Patch::Set(vec![
                        "Thriller".into(),
                        "Romance".into(),
                        "Thriller".into(),
                    ]),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(reader.marketing_consent());
        let interests: Vec<_> = reader.interests().iter().map(Genre::as_str).collect();
        assert_eq!(interests, ["Thriller", "Romance"]);
        assert_eq!(reader.version(), Version::from_value(1));

        reader
            .apply_patch(
                Version::from_value(1),
                ReaderPatch {
                    interests: Patch::Clear,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(reader.interests().is_empty());
    }

    #[test]
    fn invalid_phone_rejects_whole_patch() {
        let mut reader = reader();
        let err = reader
            .apply_patch(
                Version::new(),
                ReaderPatch {
                    name: Patch::Set("New Name".into()),
                    phone_number: Patch::Set("312345678".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert_eq!(err.reason(), "Phone number is not valid: 312345678");
        assert_eq!(reader.name().as_str(), "Maria José");
        assert!(reader.version().is_initial());
    }

    #[test]
    fn consents_cannot_be_cleared() {
        let mut reader = reader();
        let err = reader
            .apply_patch(
                Version::new(),
                ReaderPatch {
                    third_party_sharing_consent: Patch::Clear,
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.reason(), "third_party_sharing_consent cannot be cleared");
    }

    #[test]
    fn remove_photo_follows_version_protocol() {
        let mut reader = reader();
        reader.remove_photo(Version::new()).unwrap();
        assert!(reader.photo().is_none());

        let err = reader.remove_photo(Version::new()).unwrap_err();
        assert!(err.is_stale());
        assert_eq!(reader.version(), Version::from_value(1));
    }
}
