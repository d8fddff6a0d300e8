//! Stylesheet injected into the page for markers and the affordance

use super::settings::Settings;
use crate::annotate::marker::{MarkerKind, AFFORDANCE_CLASS};

/// Generate the page stylesheet from the user's colors.
///
/// Injected once as a `<style>` element after the session data arrives.
pub fn generate_stylesheet(settings: &Settings) -> String {
    let selected = MarkerKind::Selected.class_name();
    let unknown = MarkerKind::Unknown.class_name();
    let selected_color = &settings.selected_color;
    let unknown_color = &settings.unknown_color;
    let button = AFFORDANCE_CLASS;

    format!(
        r#"
.{selected} {{
    display: inline-flex;
    align-items: center;
    background-color: {selected_color};
    border-radius: 30px;
    padding: 5px 10px;
    margin: 0 5px;
    cursor: default;
}}
.{unknown} {{
    display: inline-flex;
    align-items: center;
    background-color: {unknown_color};
    border-radius: 10px;
    padding: 5px 10px;
    margin: 0 5px;
    border: solid 1px #f9f781;
}}
.{button} {{
    background-color: #007BFF;
    color: white;
    padding: 10px 20px;
    border: none;
    border-radius: 5px;
    cursor: pointer;
    font-size: 16px;
    font-weight: bold;
    box-shadow: 0 2px 4px rgba(0, 0, 0, 0.2);
    transition: background-color 0.3s, box-shadow 0.3s;
}}
.{button}:hover {{
    background-color: #0056b3;
    box-shadow: 0 4px 8px rgba(0, 0, 0, 0.3);
}}
.{button}:active {{
    background-color: #004494;
    box-shadow: 0 2px 4px rgba(0, 0, 0, 0.2);
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_injected() {
        let css = generate_stylesheet(&Settings::default());
        assert!(css.contains(".easyWord_selectedWord {"));
        assert!(css.contains("background-color: #acf7c1;"));
        assert!(css.contains(".easyWord_unknownWord {"));
        assert!(css.contains("background-color: #FF0000;"));
        assert!(css.contains(".easyWord_addToList:hover"));
    }

    #[test]
    fn test_custom_colors() {
        let settings = Settings {
            selected_color: "rebeccapurple".to_string(),
            ..Settings::default()
        };
        assert!(generate_stylesheet(&settings).contains("background-color: rebeccapurple;"));
    }
}
