//! Style registry.
//!
//! Maps style identifiers to their palettes. The builtin registry is built
//! once, on first access, and is read-only afterwards, so it can be shared
//! freely across threads.
//!
//! # Example
//!
//! ```
//! use retro_avatar::registry::StyleRegistry;
//!
//! let palette = StyleRegistry::builtin()?.get("8bit")?;
//! assert_eq!(palette.len(), 64);
//! # Ok::<(), retro_avatar::AvatarError>(())
//! ```

pub mod builtin;

use std::sync::OnceLock;

use crate::error::{AvatarError, Result};
use crate::types::Palette;

/// The style used when a request names none.
pub const DEFAULT_STYLE: &str = "8bit";

static BUILTIN: OnceLock<Result<StyleRegistry>> = OnceLock::new();

/// Read-only lookup from style identifier to palette.
#[derive(Debug)]
pub struct StyleRegistry {
    palettes: Vec<Palette>,
}

impl StyleRegistry {
    /// Create a registry from palettes, in listing order.
    ///
    /// Later palettes with a duplicate identifier are unreachable.
    pub fn new(palettes: Vec<Palette>) -> Self {
        Self { palettes }
    }

    /// The process-wide builtin registry.
    ///
    /// The tables are validated on first access; a table that fails
    /// validation makes every later call fail too.
    pub fn builtin() -> Result<&'static StyleRegistry> {
        match BUILTIN.get_or_init(|| builtin::all().map(Self::new)) {
            Ok(registry) => Ok(registry),
            Err(e) => Err(AvatarError::InvalidParameter {
                message: format!("Builtin palettes are invalid: {}", e),
                help: None,
            }),
        }
    }

    /// Get a palette by style identifier.
    pub fn get(&self, style: &str) -> Result<&Palette> {
        self.find(style).ok_or_else(|| AvatarError::InvalidStyle {
            style: style.to_string(),
            help: Some(format!("Available styles: {}", self.ids().collect::<Vec<_>>().join(", "))),
        })
    }

    /// Get a palette by style identifier, if registered.
    pub fn find(&self, style: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.id == style)
    }

    /// Check if a style is registered.
    pub fn contains(&self, style: &str) -> bool {
        self.find(style).is_some()
    }

    /// All style identifiers, in listing order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(|p| p.id.as_str())
    }

    /// All palettes, in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    /// Get the number of styles.
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

/// Look up a builtin style.
pub fn style(id: &str) -> Result<&'static Palette> {
    StyleRegistry::builtin()?.get(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, QuantizeMode, UpscaleMode};

    #[test]
    fn test_builtin_palettes_are_valid() {
        let palettes = builtin::all().unwrap();
        assert_eq!(palettes.len(), 7);

        let registry = StyleRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_builtin_listing_order() {
        let ids: Vec<&str> = StyleRegistry::builtin().unwrap().ids().collect();
        assert_eq!(ids, vec!["1bit", "2bit", "4bit", "8bit", "16bit", "retro", "notion"]);
    }

    #[test]
    fn test_default_style_is_registered() {
        assert!(StyleRegistry::builtin().unwrap().contains(DEFAULT_STYLE));
    }

    #[test]
    fn test_unknown_style() {
        let err = style("32bit").unwrap_err();
        assert!(matches!(err, AvatarError::InvalidStyle { ref style, .. } if style == "32bit"));
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_style_lookup_is_exact() {
        assert!(style("8BIT").is_err());
        assert!(style(" 8bit").is_err());
    }

    #[test]
    fn test_1bit() {
        let p = style("1bit").unwrap();
        assert_eq!(p.colours(), &[Colour::BLACK, Colour::WHITE]);
        assert_eq!(p.quantize, QuantizeMode::Threshold2);
        assert_eq!(p.upscale, UpscaleMode::Hard);
    }

    #[test]
    fn test_2bit_is_green_dark_to_light() {
        let p = style("2bit").unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(p.quantize, QuantizeMode::Threshold4);
        for c in p.colours() {
            assert!(c.g > c.r && c.g > c.b, "{} is not green", c);
        }
        assert!(p
            .colours()
            .windows(2)
            .all(|w| w[0].luma_milli() < w[1].luma_milli()));
    }

    #[test]
    fn test_4bit() {
        let p = style("4bit").unwrap();
        assert_eq!(p.len(), 16);
        assert_eq!(p.quantize, QuantizeMode::Nearest);
        assert_eq!(p.get(6), Some(Colour::rgb(170, 85, 0)));
    }

    #[test]
    fn test_8bit_cube() {
        let p = style("8bit").unwrap();
        assert_eq!(p.len(), 64);
        for c in p.colours() {
            for v in c.to_rgb() {
                assert!(builtin::NES_LEVELS.contains(&v), "{} off the 4-level grid", c);
            }
        }
        assert!(p.contains(Colour::BLACK));
        assert!(p.contains(Colour::WHITE));
        assert_eq!(p.get(0), Some(Colour::BLACK));
        assert_eq!(p.get(1), Some(Colour::rgb(0, 0, 85)));
        assert_eq!(p.get(4), Some(Colour::rgb(0, 85, 0)));
        assert_eq!(p.get(16), Some(Colour::rgb(85, 0, 0)));
        assert_eq!(p.get(63), Some(Colour::WHITE));
    }

    #[test]
    fn test_16bit_cube() {
        let p = style("16bit").unwrap();
        assert_eq!(p.len(), 216);
        for c in p.colours() {
            for v in c.to_rgb() {
                assert!(builtin::SNES_LEVELS.contains(&v));
            }
        }
    }

    #[test]
    fn test_hand_picked_palettes() {
        let retro = style("retro").unwrap();
        assert_eq!(retro.len(), 40);
        assert_eq!(retro.upscale, UpscaleMode::Hard);

        let notion = style("notion").unwrap();
        assert_eq!(notion.len(), 36);
        assert_eq!(notion.quantize, QuantizeMode::Nearest);
    }

    #[test]
    fn test_only_notion_is_smooth() {
        let smooth: Vec<&str> = StyleRegistry::builtin()
            .unwrap()
            .iter()
            .filter(|p| p.upscale == UpscaleMode::Smooth)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(smooth, vec!["notion"]);
    }

    #[test]
    fn test_custom_registry() {
        let palette = Palette::new(
            "duo",
            "Duo",
            "",
            vec![Colour::BLACK, Colour::rgb(255, 0, 0)],
            QuantizeMode::Nearest,
            UpscaleMode::Hard,
        )
        .unwrap();
        let registry = StyleRegistry::new(vec![palette]);

        assert_eq!(registry.len(), 1);
        assert!(registry.get("duo").is_ok());
        assert!(registry.get("8bit").is_err());
    }
}
