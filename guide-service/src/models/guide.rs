//! The design guide returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Primary color used by the fallback guide when the caller sent none.
pub const DEFAULT_PRIMARY_COLOR: &str = "#6666ff";

/// JSON pointers every generated guide must carry, each a string or number.
const REQUIRED_FIELDS: &[&str] = &[
    "/colorSystem/primary/main",
    "/colorSystem/primary/light",
    "/colorSystem/primary/dark",
    "/colorSystem/secondary/main",
    "/colorSystem/secondary/light",
    "/colorSystem/secondary/dark",
    "/typography/bodySize",
    "/typography/headlineSize",
    "/typography/lineHeight",
    "/accessibility/textColorOnPrimary",
    "/accessibility/contrastRatio",
];

/// Color palette, typography and accessibility metrics for one design context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignGuide {
    pub color_system: ColorSystem,
    pub typography: Typography,
    pub accessibility: Accessibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSystem {
    pub primary: ColorScale,
    pub secondary: ColorScale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    pub main: String,
    pub light: String,
    pub dark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub body_size: String,
    pub headline_size: String,
    pub line_height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessibility {
    pub text_color_on_primary: String,
    pub contrast_ratio: String,
}

impl DesignGuide {
    /// The fixed guide served whenever generation fails.
    ///
    /// An empty `primary_color` counts as absent.
    pub fn fallback(primary_color: Option<&str>) -> Self {
        let main = primary_color
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_PRIMARY_COLOR);

        Self {
            color_system: ColorSystem {
                primary: ColorScale {
                    main: main.to_string(),
                    light: "#9999ff".to_string(),
                    dark: "#3333cc".to_string(),
                },
                secondary: ColorScale {
                    main: "#ffb000".to_string(),
                    light: "#ffe0a0".to_string(),
                    dark: "#c78300".to_string(),
                },
            },
            typography: Typography {
                body_size: "17pt".to_string(),
                headline_size: "34pt".to_string(),
                line_height: "1.6".to_string(),
            },
            accessibility: Accessibility {
                text_color_on_primary: "#ffffff".to_string(),
                contrast_ratio: "12.36:1".to_string(),
            },
        }
    }

    /// Check that a model-produced document has the design guide shape.
    ///
    /// Extra keys are allowed. Leaf values may be strings or numbers, since
    /// models often emit `lineHeight: 1.6`. Returns the first offending
    /// pointer on failure.
    pub fn check_shape(value: &Value) -> Result<(), String> {
        for pointer in REQUIRED_FIELDS {
            match value.pointer(pointer) {
                Some(Value::String(_)) | Some(Value::Number(_)) => {}
                Some(other) => {
                    return Err(format!("{} has unexpected type: {}", pointer, other));
                }
                None => return Err(format!("{} is missing", pointer)),
            }
        }
        Ok(())
    }
}

impl From<&DesignGuide> for Value {
    fn from(guide: &DesignGuide) -> Self {
        let scale = |s: &ColorScale| json!({ "main": s.main, "light": s.light, "dark": s.dark });

        json!({
            "colorSystem": {
                "primary": scale(&guide.color_system.primary),
                "secondary": scale(&guide.color_system.secondary),
            },
            "typography": {
                "bodySize": guide.typography.body_size,
                "headlineSize": guide.typography.headline_size,
                "lineHeight": guide.typography.line_height,
            },
            "accessibility": {
                "textColorOnPrimary": guide.accessibility.text_color_on_primary,
                "contrastRatio": guide.accessibility.contrast_ratio,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_uses_caller_primary_color() {
        let guide = DesignGuide::fallback(Some("#112233"));
        assert_eq!(guide.color_system.primary.main, "#112233");
        assert_eq!(guide.color_system.secondary.main, "#ffb000");
        assert_eq!(guide.typography.body_size, "17pt");
    }

    #[test]
    fn fallback_defaults_missing_or_empty_primary() {
        assert_eq!(
            DesignGuide::fallback(None).color_system.primary.main,
            DEFAULT_PRIMARY_COLOR
        );
        assert_eq!(
            DesignGuide::fallback(Some("")).color_system.primary.main,
            DEFAULT_PRIMARY_COLOR
        );
    }

    #[test]
    fn value_conversion_matches_serde_wire_format() {
        let guide = DesignGuide::fallback(Some("#abcdef"));
        let via_from = Value::from(&guide);
        let via_serde = serde_json::to_value(&guide).unwrap();
        assert_eq!(via_from, via_serde);
        assert_eq!(via_from["accessibility"]["contrastRatio"], "12.36:1");
    }

    #[test]
    fn fallback_has_guide_shape() {
        let value = Value::from(&DesignGuide::fallback(None));
        assert!(DesignGuide::check_shape(&value).is_ok());
    }

    #[test]
    fn shape_check_accepts_numbers_and_extra_keys() {
        let mut value = Value::from(&DesignGuide::fallback(None));
        value["typography"]["lineHeight"] = json!(1.6);
        value["notes"] = json!("extra commentary");
        assert!(DesignGuide::check_shape(&value).is_ok());
    }

    #[test]
    fn shape_check_names_missing_field() {
        let mut value = Value::from(&DesignGuide::fallback(None));
        value["accessibility"]
            .as_object_mut()
            .unwrap()
            .remove("contrastRatio");

        let err = DesignGuide::check_shape(&value).unwrap_err();
        assert!(err.contains("/accessibility/contrastRatio"));
    }

    #[test]
    fn shape_check_rejects_nested_objects_as_leaves() {
        let mut value = Value::from(&DesignGuide::fallback(None));
        value["colorSystem"]["primary"]["main"] = json!({ "hex": "#000" });
        assert!(DesignGuide::check_shape(&value).is_err());
    }
}
