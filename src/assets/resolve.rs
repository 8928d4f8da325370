use std::path::{Path, PathBuf};

use crate::{
    assets::decode::{PortraitImage, load_image},
    foundation::error::{GalleryError, GalleryResult},
    gallery::{model::Person, paginate::Page},
};

/// A [`Person`] paired with the image to draw for it.
///
/// Owns only the transient render state; the source record is borrowed, never mutated.
#[derive(Clone, Debug)]
pub struct ResolvedPerson<'a> {
    /// Source entry.
    pub person: &'a Person,
    /// Decoded portrait, or the default portrait.
    pub image: PortraitImage,
    /// Whether `image` is the configured default portrait.
    pub used_fallback: bool,
}

/// A page whose every member has a loadable image.
#[derive(Clone, Debug)]
pub struct ResolvedPage<'a> {
    /// 0-based render index.
    pub index: usize,
    /// Members in display order.
    pub members: Vec<ResolvedPerson<'a>>,
}

#[derive(Clone, Debug)]
enum DefaultPortrait {
    Unconfigured,
    Pending(PathBuf),
    Loaded(PathBuf, PortraitImage),
    Failed(PathBuf),
}

/// Maps portrait references to decoded images, substituting a default portrait when configured.
///
/// The default portrait is decoded at most once per resolver and shared afterwards.
#[derive(Clone, Debug)]
pub struct AssetResolver {
    default: DefaultPortrait,
    default_decodes: usize,
}

impl AssetResolver {
    /// Create a resolver; `default_portrait` is the substitute for unloadable portraits.
    pub fn new(default_portrait: Option<PathBuf>) -> Self {
        let default = match default_portrait {
            Some(path) => DefaultPortrait::Pending(path),
            None => DefaultPortrait::Unconfigured,
        };
        Self {
            default,
            default_decodes: 0,
        }
    }

    /// How many times the default portrait was decoded.
    pub fn default_decodes(&self) -> usize {
        self.default_decodes
    }

    /// Load `person`'s portrait, falling back to the default portrait if one is configured.
    pub fn resolve<'a>(&mut self, person: &'a Person) -> GalleryResult<ResolvedPerson<'a>> {
        match load_image(&person.portrait) {
            Ok(image) => Ok(ResolvedPerson {
                person,
                image,
                used_fallback: false,
            }),
            Err(primary_err) => {
                tracing::debug!(
                    path = %person.portrait.display(),
                    error = %primary_err,
                    "portrait load failed"
                );
                let Some(image) = self.default_image() else {
                    return Err(GalleryError::asset_unavailable(
                        person.diagnostic_name(),
                        &person.portrait,
                    ));
                };
                tracing::warn!(
                    person = %person.diagnostic_name(),
                    path = %person.portrait.display(),
                    "using default portrait"
                );
                Ok(ResolvedPerson {
                    person,
                    image,
                    used_fallback: true,
                })
            }
        }
    }

    /// Resolve every member of `page` before anything is drawn.
    ///
    /// The first unresolvable member aborts the whole page.
    #[tracing::instrument(
        skip(self, page),
        fields(page = page.index, members = page.members.len())
    )]
    pub fn resolve_page<'a>(&mut self, page: Page<'a>) -> GalleryResult<ResolvedPage<'a>> {
        if page.members.is_empty() {
            return Err(GalleryError::empty_input(format!(
                "page {} has no members",
                page.index
            )));
        }
        let members = page
            .members
            .iter()
            .map(|p| self.resolve(p))
            .collect::<GalleryResult<Vec<_>>>()?;
        Ok(ResolvedPage {
            index: page.index,
            members,
        })
    }

    fn default_image(&mut self) -> Option<PortraitImage> {
        let path = match &self.default {
            DefaultPortrait::Unconfigured | DefaultPortrait::Failed(_) => return None,
            DefaultPortrait::Loaded(_, image) => return Some(image.clone()),
            DefaultPortrait::Pending(path) => path.clone(),
        };

        self.default_decodes += 1;
        match load_image(&path) {
            Ok(image) => {
                self.default = DefaultPortrait::Loaded(path, image.clone());
                Some(image)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "default portrait unusable");
                self.default = DefaultPortrait::Failed(path);
                None
            }
        }
    }

    /// Configured default portrait path, if any.
    pub fn default_portrait(&self) -> Option<&Path> {
        match &self.default {
            DefaultPortrait::Unconfigured => None,
            DefaultPortrait::Pending(p)
            | DefaultPortrait::Loaded(p, _)
            | DefaultPortrait::Failed(p) => Some(p),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
