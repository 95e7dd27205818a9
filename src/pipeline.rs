use std::sync::Arc;

use image::Rgba;
use imageproc::definitions::Image;
use tracing::{debug, info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::{CardError, HaloSynthesisError, Result};
use crate::portrait_card::codec::{decode_image, encode_png};
use crate::portrait_card::compositor::Compositor;
use crate::portrait_card::feather::FeatherBottomEdgeExt;
use crate::portrait_card::greyscale::GreyscaleExt;
use crate::portrait_card::placement::PlacementRect;
use crate::portrait_card::segment::RemoveBackgroundExt;
use crate::portrait_card::selector::select_template_index;
use crate::portrait_card::template::TemplateSet;
use crate::portrait_card::trim::TrimAlphaExt;

/// A rendered card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardOutput {
    /// PNG-encoded card.
    pub png: Vec<u8>,
    pub template_index: usize,
    pub template_name: String,
    /// Where the subject was drawn on the template.
    pub placement: PlacementRect,
    /// Set when the card was composited without a halo.
    pub glow: Option<HaloSynthesisError>,
}

/// End-to-end portrait-to-card renderer.
///
/// A pipeline is immutable after construction and can be shared across
/// threads; concurrent renders only share the template cache.
#[derive(Debug)]
pub struct CardPipeline {
    config: PipelineConfig,
    templates: TemplateSet,
    compositor: Compositor,
}

impl CardPipeline {
    /// Builds a pipeline that loads templates from `config.templates`.
    ///
    /// # Errors
    ///
    /// * `CardError::Config` - The configuration does not validate
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let templates = TemplateSet::from_config(&config.templates);
        Self::with_templates(config, templates)
    }

    /// Builds a pipeline over an explicit template set.
    ///
    /// The template names in `config` are ignored in favour of the set's.
    ///
    /// # Errors
    ///
    /// * `CardError::Config` - The configuration does not validate, or the
    ///   set is empty
    pub fn with_templates(config: PipelineConfig, templates: TemplateSet) -> Result<Self> {
        config.validate()?;
        if templates.is_empty() {
            return Err(CardError::Config("template set is empty".to_owned()));
        }
        let compositor = Compositor::new(config.layout, config.glow);
        Ok(Self {
            config,
            templates,
            compositor,
        })
    }

    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub const fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Index and name of the template `identifier` maps to.
    pub fn select_template(&self, identifier: Option<&str>) -> (usize, &str) {
        let index = select_template_index(identifier, self.templates.len());
        (index, self.templates.name(index).unwrap_or_default())
    }

    /// Decodes `bytes` and renders them onto the template chosen by `identifier`.
    ///
    /// # Errors
    ///
    /// * `CardError::Decode` - `bytes` is not a supported raster
    /// * `CardError::InvalidDimensions` - The decoded image has zero area
    /// * `CardError::TemplateLoad` - The selected template cannot be loaded
    /// * `CardError::Encode` - The card cannot be encoded
    #[instrument(skip(self, bytes), fields(input_len = bytes.len()))]
    pub fn render(&self, bytes: &[u8], identifier: Option<&str>) -> Result<CardOutput> {
        let subject = decode_image(bytes)?;
        debug!(width = subject.width(), height = subject.height(), "decoded input");
        self.render_image(subject, identifier)
    }

    /// Renders an already decoded subject.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render); decoding errors cannot occur here.
    #[instrument(
        skip(self, subject),
        fields(width = subject.width(), height = subject.height())
    )]
    pub fn render_image(
        &self,
        subject: Image<Rgba<u8>>,
        identifier: Option<&str>,
    ) -> Result<CardOutput> {
        let subject = self.prepare_subject(subject)?;

        let (template_index, template_name) = self.select_template(identifier);
        info!(template_index, template = template_name, "selected template");
        let template: Arc<Image<Rgba<u8>>> = self.templates.get(template_index)?;

        let composition = self.compositor.compose(subject, &template)?;
        if let Some(reason) = &composition.glow_degradation {
            warn!(%reason, "composited without halo");
        }
        debug!(
            left = composition.placement.left,
            top = composition.placement.top,
            width = composition.placement.width,
            height = composition.placement.height,
            "composited subject"
        );

        let png = encode_png(&composition.card)?;
        debug!(bytes = png.len(), "encoded card");

        Ok(CardOutput {
            png,
            template_index,
            template_name: template_name.to_owned(),
            placement: composition.placement,
            glow: composition.glow_degradation,
        })
    }

    /// Runs the subject-only stages: background removal, trim, feather and
    /// greyscale.
    ///
    /// # Errors
    ///
    /// * `CardError::InvalidDimensions` - The subject has zero area
    pub fn prepare_subject(&self, subject: Image<Rgba<u8>>) -> Result<Image<Rgba<u8>>> {
        let subject = subject.remove_background(&self.config.segmentation)?;
        debug!(width = subject.width(), height = subject.height(), "removed background");

        let subject = subject.trim_alpha(self.config.trim.alpha_threshold);
        debug!(width = subject.width(), height = subject.height(), "trimmed subject");

        let mut subject = subject.feather_bottom_edge(&self.config.feather)?;
        debug!("feathered bottom edge");

        if self.config.greyscale.enabled {
            subject.greyscale_mut();
            debug!("converted to greyscale");
        }
        Ok(subject)
    }
}
