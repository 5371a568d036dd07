//! Engine configuration
//!
//! Every field has a default (see [`crate::layout::defaults`]) and can be
//! overridden either through struct-update syntax on the nested structs or
//! by dotted key with [`PedigreeConfig::set`].

use crate::errors::ConfigError;
use crate::layout::defaults;
use crate::types::Length;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub width: Length,
    pub height: Length,
    pub padding: Length,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: defaults::CANVAS_WIDTH,
            height: defaults::CANVAS_HEIGHT,
            padding: defaults::CANVAS_PADDING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolConfig {
    /// Edge length of squares, diameter of circles
    pub size: Length,
    pub stroke_width: Length,
    /// Minimum gap between neighbouring symbols
    pub spacing: Length,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            size: defaults::SYMBOL_SIZE,
            stroke_width: defaults::SYMBOL_STROKE_WIDTH,
            spacing: defaults::SYMBOL_SPACING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub vertical_spacing: Length,
    pub horizontal_spacing: Length,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            vertical_spacing: defaults::VERTICAL_SPACING,
            horizontal_spacing: defaults::HORIZONTAL_SPACING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionConfig {
    pub stroke_width: Length,
    pub marriage_line_length: Length,
    pub child_connection_offset: Length,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            stroke_width: defaults::CONNECTION_STROKE_WIDTH,
            marriage_line_length: defaults::MARRIAGE_LINE_LENGTH,
            child_connection_offset: defaults::CHILD_CONNECTION_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PedigreeConfig {
    pub canvas: CanvasConfig,
    pub symbols: SymbolConfig,
    pub generations: GenerationConfig,
    pub connections: ConnectionConfig,
}

/// How strictly a field is checked
#[derive(Clone, Copy)]
enum Bound {
    Positive,
    NonNegative,
}

impl Bound {
    fn check(self, field: &'static str, value: f64) -> Result<Length, ConfigError> {
        let checked = match self {
            Bound::Positive => Length::try_positive(value),
            Bound::NonNegative => Length::try_non_negative(value),
        };
        checked.map_err(|reason| ConfigError::InvalidValue { field, reason })
    }
}

// Single table of every configurable field: key, accessor, bound.
macro_rules! config_fields {
    ($m:ident) => {
        $m! {
            "canvas.width" => canvas.width, Bound::Positive;
            "canvas.height" => canvas.height, Bound::Positive;
            "canvas.padding" => canvas.padding, Bound::NonNegative;
            "symbols.size" => symbols.size, Bound::Positive;
            "symbols.strokeWidth" => symbols.stroke_width, Bound::Positive;
            "symbols.spacing" => symbols.spacing, Bound::NonNegative;
            "generations.verticalSpacing" => generations.vertical_spacing, Bound::Positive;
            "generations.horizontalSpacing" => generations.horizontal_spacing, Bound::NonNegative;
            "connections.strokeWidth" => connections.stroke_width, Bound::Positive;
            "connections.marriageLineLength" => connections.marriage_line_length, Bound::NonNegative;
            "connections.childConnectionOffset" => connections.child_connection_offset, Bound::NonNegative;
        }
    };
}

impl PedigreeConfig {
    /// Override one field by dotted key, e.g. `symbols.size`
    pub fn set(&mut self, key: &str, value: f64) -> Result<(), ConfigError> {
        macro_rules! assign {
            ($($name:literal => $section:ident . $field:ident, $bound:expr;)*) => {
                match key {
                    $(
                        $name => {
                            self.$section.$field = $bound.check($name, value)?;
                            Ok(())
                        }
                    )*
                    _ => Err(ConfigError::UnknownKey { key: key.to_string() }),
                }
            };
        }
        config_fields!(assign)
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, key: &str, value: f64) -> Result<Self, ConfigError> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Look a field up by dotted key
    pub fn get(&self, key: &str) -> Option<Length> {
        macro_rules! read {
            ($($name:literal => $section:ident . $field:ident, $bound:expr;)*) => {
                match key {
                    $($name => Some(self.$section.$field),)*
                    _ => None,
                }
            };
        }
        config_fields!(read)
    }

    /// Check every field; fields set directly on the structs bypass `set`
    pub fn validate(&self) -> Result<(), ConfigError> {
        macro_rules! check_all {
            ($($name:literal => $section:ident . $field:ident, $bound:expr;)*) => {
                $( $bound.check($name, self.$section.$field.raw())?; )*
            };
        }
        config_fields!(check_all);
        Ok(())
    }

    /// Every dotted key understood by [`set`](Self::set)
    pub fn keys() -> &'static [&'static str] {
        macro_rules! names {
            ($($name:literal => $section:ident . $field:ident, $bound:expr;)*) => {
                &[$($name),*]
            };
        }
        config_fields!(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = PedigreeConfig::default();
        assert_eq!(cfg.canvas.width, Length(1200.0));
        assert_eq!(cfg.canvas.height, Length(800.0));
        assert_eq!(cfg.canvas.padding, Length(50.0));
        assert_eq!(cfg.symbols.size, Length(40.0));
        assert_eq!(cfg.symbols.stroke_width, Length(2.0));
        assert_eq!(cfg.symbols.spacing, Length(80.0));
        assert_eq!(cfg.generations.vertical_spacing, Length(120.0));
        assert_eq!(cfg.generations.horizontal_spacing, Length(100.0));
        assert_eq!(cfg.connections.stroke_width, Length(2.0));
        assert_eq!(cfg.connections.marriage_line_length, Length(60.0));
        assert_eq!(cfg.connections.child_connection_offset, Length(20.0));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn set_overrides_single_field() {
        let cfg = PedigreeConfig::default()
            .with("symbols.size", 30.0)
            .and_then(|c| c.with("connections.marriageLineLength", 90.0))
            .unwrap();
        assert_eq!(cfg.symbols.size, Length(30.0));
        assert_eq!(cfg.connections.marriage_line_length, Length(90.0));
        assert_eq!(cfg.symbols.spacing, Length(80.0));
        assert_eq!(cfg.get("symbols.size"), Some(Length(30.0)));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = PedigreeConfig::default();
        let err = cfg.set("symbols.colour", 1.0).unwrap_err();
        assert_eq!(err, ConfigError::UnknownKey { key: "symbols.colour".into() });
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut cfg = PedigreeConfig::default();
        assert_eq!(
            cfg.set("symbols.size", 0.0),
            Err(ConfigError::InvalidValue { field: "symbols.size", reason: NumericError::Zero })
        );
        assert_eq!(
            cfg.set("canvas.padding", f64::NAN),
            Err(ConfigError::InvalidValue { field: "canvas.padding", reason: NumericError::NaN })
        );
        assert!(cfg.set("canvas.padding", 0.0).is_ok());
        assert_eq!(cfg.symbols.size, Length(40.0));
    }

    #[test]
    fn validate_catches_direct_field_edits() {
        let cfg = PedigreeConfig {
            generations: GenerationConfig {
                vertical_spacing: Length(-10.0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidValue {
                field: "generations.verticalSpacing",
                reason: NumericError::Negative,
            })
        );
    }

    #[test]
    fn keys_cover_every_field() {
        let cfg = PedigreeConfig::default();
        assert_eq!(PedigreeConfig::keys().len(), 11);
        for key in PedigreeConfig::keys() {
            assert!(cfg.get(key).is_some(), "{key} not readable");
        }
    }
}
