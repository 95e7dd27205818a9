pub mod blend;
pub mod blur;
pub mod codec;
pub mod compositor;
pub mod ensure_alpha;
pub mod feather;
pub mod glow;
pub mod greyscale;
pub mod placement;
pub mod premultiply;
pub mod resize;
pub mod segment;
pub mod selector;
pub mod template;
pub mod trim;
