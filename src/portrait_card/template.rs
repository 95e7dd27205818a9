use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use image::Rgba;
use imageproc::definitions::Image;

use crate::config::TemplateConfig;
use crate::error::CardError;
use crate::portrait_card::ensure_alpha::EnsureAlphaExt;
use crate::portrait_card::selector::BackgroundSelector;

type SharedTemplate = Arc<Image<Rgba<u8>>>;

/// Ordered, read-only set of card backgrounds.
///
/// Templates backed by files are decoded on first use and cached for the
/// lifetime of the set. The set is `Send + Sync` and can be shared between
/// concurrent renders; a slot may be decoded twice under contention, but
/// only one result is ever kept.
#[derive(Debug)]
pub struct TemplateSet {
    directory: PathBuf,
    names: Vec<String>,
    slots: Vec<OnceLock<SharedTemplate>>,
}

impl TemplateSet {
    /// Creates a set that lazily loads `config.names` from `config.directory`.
    pub fn from_config(config: &TemplateConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            names: config.names.clone(),
            slots: config.names.iter().map(|_| OnceLock::new()).collect(),
        }
    }

    /// Creates a fully populated set from decoded images.
    pub fn from_images<N, I>(templates: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Image<Rgba<u8>>)>,
    {
        let (names, slots) = templates
            .into_iter()
            .map(|(name, image)| (name.into(), OnceLock::from(Arc::new(image))))
            .unzip();
        Self {
            directory: PathBuf::new(),
            names,
            slots,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Selector over this set's names, in order.
    pub fn selector(&self) -> BackgroundSelector {
        BackgroundSelector::new(self.names.iter().cloned())
    }

    /// Returns the template at `index`, loading it on first use.
    ///
    /// # Errors
    ///
    /// * `CardError::TemplateLoad` - `index` is out of range, or the file
    ///   cannot be opened or decoded
    pub fn get(&self, index: usize) -> Result<SharedTemplate, CardError> {
        let (Some(name), Some(slot)) = (self.names.get(index), self.slots.get(index)) else {
            return Err(CardError::TemplateLoad {
                name: format!("#{index}"),
                path: self.directory.clone(),
                reason: format!("index out of range for {} templates", self.names.len()),
            });
        };

        if let Some(template) = slot.get() {
            return Ok(Arc::clone(template));
        }

        let loaded = Arc::new(self.load(name)?);
        Ok(Arc::clone(slot.get_or_init(|| loaded)))
    }

    fn load(&self, name: &str) -> Result<Image<Rgba<u8>>, CardError> {
        let path = self.directory.join(name);
        let failure = |reason: String| CardError::TemplateLoad {
            name: name.to_owned(),
            path: path.clone(),
            reason,
        };

        let template = image::open(&path)
            .map_err(|err| failure(err.to_string()))?
            .ensure_alpha();
        if template.width() == 0 || template.height() == 0 {
            return Err(failure("template has zero area".to_owned()));
        }

        tracing::debug!(
            template = name,
            width = template.width(),
            height = template.height(),
            "loaded template"
        );
        Ok(template)
    }
}
