use loginshield_common::{sanitize_key, ShieldConfig, DEFAULT_FIELD_LABEL};
use serde::Serialize;

/// Field name used when the configured one is empty or sanitises to nothing.
pub const DEFAULT_FIELD_NAME: &str = "ninja_hp_field";

/// Class carried by the element wrapping the honeypot input.
pub const CONTAINER_CLASS: &str = "ninja-hp-field-container";

/// Styles for [`CONTAINER_CLASS`]: off-screen, 1px, clipped. The input stays
/// in the markup so naive form-fillers still see it.
pub const HIDDEN_FIELD_CSS: &str = ".ninja-hp-field-container{\
position:absolute !important;\
left:-9999px !important;\
top:auto !important;\
width:1px !important;\
height:1px !important;\
overflow:hidden !important;\
white-space:nowrap !important}";

/// Description of the honeypot input the host must render.
///
/// The host is responsible for escaping `name` and `label` and for wrapping
/// the input in an element with `container_class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub container_class: &'static str,
    pub tab_index: i32,
    pub autocomplete: &'static str,
}

/// Resolve the field name used both for rendering and for validation.
pub fn resolve_field_name(config: &ShieldConfig) -> String {
    let name = sanitize_key(&config.honeypot.field_name);
    if name.is_empty() {
        DEFAULT_FIELD_NAME.to_string()
    } else {
        name
    }
}

/// Describe the honeypot field, or `None` when the honeypot is disabled.
pub fn render_field(config: &ShieldConfig) -> Option<FieldSpec> {
    if !config.honeypot.enabled {
        return None;
    }

    let label = if config.honeypot.field_label.is_empty() {
        DEFAULT_FIELD_LABEL.to_string()
    } else {
        config.honeypot.field_label.clone()
    };

    Some(FieldSpec {
        name: resolve_field_name(config),
        label,
        container_class: CONTAINER_CLASS,
        tab_index: -1,
        autocomplete: "off",
    })
}

/// CSS the host emits in the login page head while the honeypot is active.
pub fn hiding_css(config: &ShieldConfig) -> Option<&'static str> {
    config.honeypot.enabled.then_some(HIDDEN_FIELD_CSS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_name(name: &str) -> ShieldConfig {
        let mut config = ShieldConfig::default();
        config.honeypot.field_name = name.to_string();
        config
    }

    #[test]
    fn test_render_field_enabled() {
        let mut config = config_with_name("hp_trap");
        config.honeypot.field_label = "Leave blank".into();
        let field = render_field(&config).unwrap();
        assert_eq!(field.name, "hp_trap");
        assert_eq!(field.label, "Leave blank");
        assert_eq!(field.container_class, CONTAINER_CLASS);
        assert_eq!(field.tab_index, -1);
        assert_eq!(field.autocomplete, "off");
    }

    #[test]
    fn test_render_field_disabled() {
        let mut config = config_with_name("hp_trap");
        config.honeypot.enabled = false;
        assert!(render_field(&config).is_none());
    }

    #[test]
    fn test_render_field_default_label() {
        let mut config = config_with_name("hp_trap");
        config.honeypot.field_label.clear();
        assert_eq!(render_field(&config).unwrap().label, DEFAULT_FIELD_LABEL);
    }

    #[test]
    fn test_resolve_empty_name_falls_back() {
        assert_eq!(resolve_field_name(&config_with_name("")), DEFAULT_FIELD_NAME);
        assert_eq!(resolve_field_name(&config_with_name("???")), DEFAULT_FIELD_NAME);
    }

    #[test]
    fn test_resolve_sanitizes_name() {
        assert_eq!(resolve_field_name(&config_with_name("HP Trap")), "hptrap");
    }

    #[test]
    fn test_hiding_css() {
        let mut config = ShieldConfig::default();
        let css = hiding_css(&config).unwrap();
        assert!(css.starts_with(".ninja-hp-field-container"));
        assert!(css.contains("left:-9999px"));
        assert!(css.contains("overflow:hidden"));

        config.honeypot.enabled = false;
        assert!(hiding_css(&config).is_none());
    }
}
