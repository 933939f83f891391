use library_macros::{entity, entity_id};
use serde::{Deserialize, Serialize};

use super::Bio;
use crate::entity::{EntityWithPhoto, Patchable};
use crate::error::DomainResult;
use crate::patch::Patch;
use crate::shared::{Name, Photo};
use crate::value_object::Version;

/// 作者编号（代理键），由外部分配
#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct AuthorNumber(u64);

#[entity(id = AuthorNumber)]
pub struct Author {
    name: Name,
    bio: Bio,
    photo: Option<Photo>,
}

/// 作者部分更新请求；照片可显式清空，姓名与简介不可
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorPatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub bio: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub photo: Patch<String>,
}

impl Author {
    pub fn new(
        number: AuthorNumber,
        name: impl Into<String>,
        bio: impl Into<String>,
        photo: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: number,
            version: Version::new(),
            name: Name::new(name)?,
            bio: Bio::new(bio)?,
            photo: photo.map(Photo::new).transpose()?,
        })
    }

    pub fn number(&self) -> AuthorNumber {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn bio(&self) -> &Bio {
        &self.bio
    }
}

impl Patchable for Author {
    type Patch = AuthorPatch;

    fn apply_patch(&mut self, expected: Version, patch: AuthorPatch) -> DomainResult<()> {
        self.guard_version(expected)?;

        let name = patch.name.required("name")?.map(Name::new).transpose()?;
        let bio = patch.bio.required("bio")?.map(Bio::new).transpose()?;
        let photo = patch.photo.try_map(Photo::new)?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(bio) = bio {
            self.bio = bio;
        }
        photo.apply_to(&mut self.photo);

        self.advance_version();
        Ok(())
    }
}

impl EntityWithPhoto for Author {
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
