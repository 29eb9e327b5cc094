//! Custom Template Rendering
//!
//! Server-side HTML for user-built templates: one render function per
//! component type in the fixed vocabulary, with custom media inserted at
//! its named anchor. Output matches the built-in templates' 600px
//! inline-styled texture.

use mailgen_models::{
    CustomComponent, CustomComponentType, CustomMedia, MediaAlignment, MediaAnchor,
    PlaceholderBindings,
};

/// Render an ordered component list into a complete email document.
///
/// Media anchored at `start`/`end` wraps the document; media anchored at a
/// component tag renders after the first component of that type; media
/// anchored at `paragraph-N` renders after the Nth paragraph component.
pub fn render_custom_template(
    components: &[CustomComponent],
    media: &[CustomMedia],
    bindings: &PlaceholderBindings,
) -> String {
    let mut out = String::from(
        "<div style=\"font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; max-width: 600px; margin: 0 auto; background: white;\">",
    );

    for m in media_at(media, MediaAnchor::Start) {
        out.push_str(&render_media(m));
    }

    let mut paragraph_count = 0usize;
    let mut seen_types: Vec<CustomComponentType> = Vec::new();

    for component in components {
        out.push_str(&render_component(component, bindings));

        if component.component_type == CustomComponentType::Paragraph {
            paragraph_count += 1;
            for m in media.iter().filter(|m| {
                m.insert_after.paragraph_index() == Some(paragraph_count)
            }) {
                out.push_str(&render_media(m));
            }
        } else if !seen_types.contains(&component.component_type) {
            // Component-tag anchors bind to the first occurrence of a type.
            seen_types.push(component.component_type);
            if let Some(anchor) = component_anchor(component.component_type) {
                for m in media_at(media, anchor) {
                    out.push_str(&render_media(m));
                }
            }
        }
    }

    for m in media_at(media, MediaAnchor::End) {
        out.push_str(&render_media(m));
    }

    out.push_str("</div>");
    out
}

fn component_anchor(component_type: CustomComponentType) -> Option<MediaAnchor> {
    match component_type {
        CustomComponentType::Logo => Some(MediaAnchor::Logo),
        CustomComponentType::Greeting => Some(MediaAnchor::Greeting),
        CustomComponentType::Cta => Some(MediaAnchor::Cta),
        CustomComponentType::Testimonial => Some(MediaAnchor::Testimonial),
        _ => None,
    }
}

fn media_at<'a>(media: &'a [CustomMedia], anchor: MediaAnchor) -> impl Iterator<Item = &'a CustomMedia> {
    media.iter().filter(move |m| m.insert_after == anchor)
}

fn render_media(media: &CustomMedia) -> String {
    let width = media.width.as_deref().unwrap_or("400px");
    let margin = match media.alignment {
        MediaAlignment::Center => "0 auto",
        MediaAlignment::Right => "0 0 0 auto",
        MediaAlignment::Left => "0",
    };
    let align = match media.alignment {
        MediaAlignment::Center => "center",
        MediaAlignment::Right => "right",
        MediaAlignment::Left => "left",
    };

    format!(
        "<div style=\"margin: 20px 0; text-align: {align};\">\
         <img src=\"{url}\" alt=\"Custom media\" style=\"width: {width}; max-width: 100%; display: block; margin: {margin};\">\
         </div>",
        align = align,
        url = media.url,
        width = width,
        margin = margin,
    )
}

/// Render one component. Text-bearing properties pass through placeholder
/// substitution.
pub fn render_component(component: &CustomComponent, bindings: &PlaceholderBindings) -> String {
    let text = |key: &str, fallback: &str| {
        bindings.substitute(component.prop(key).unwrap_or(fallback))
    };

    match component.component_type {
        CustomComponentType::Logo => {
            let mut out = String::from("<div style=\"text-align: center; padding: 30px 40px;\">");
            if let Some(url) = component.prop("logoUrl") {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"Logo\" style=\"max-width: 200px; margin-bottom: 10px;\">",
                    url
                ));
            }
            if let Some(subtitle) = component.prop("subtitle") {
                out.push_str(&format!(
                    "<p style=\"margin: 0; color: #6c757d; font-size: 14px;\">{}</p>",
                    bindings.substitute(subtitle)
                ));
            }
            out.push_str("</div>");
            out
        }

        CustomComponentType::Greeting => format!(
            "<div style=\"padding: 0 40px; margin-bottom: 20px;\">\
             <p style=\"margin: 0; font-size: 16px; color: #000;\">{}</p></div>",
            text("text", "Hi {name},"),
        ),

        CustomComponentType::Paragraph => {
            let alignment = component.prop("alignment").unwrap_or("left");
            format!(
                "<div style=\"padding: 0 40px; margin-bottom: 20px;\">\
                 <p style=\"margin: 0; font-size: 16px; color: #333; text-align: {}; white-space: pre-wrap;\">{}</p></div>",
                alignment,
                text("text", ""),
            )
        }

        CustomComponentType::Cta => format!(
            "<div style=\"text-align: center; padding: 30px 40px;\">\
             <a href=\"{}\" style=\"display: inline-block; padding: 14px 32px; background: {}; color: white; text-decoration: none; border-radius: 6px; font-weight: 600; font-size: 16px;\">{}</a></div>",
            component.prop("url").unwrap_or("#"),
            component.prop("color").unwrap_or("#10b981"),
            text("text", "Get Started"),
        ),

        CustomComponentType::Testimonial => format!(
            "<div style=\"padding: 30px 40px; background: #f8f9fa; border-left: 4px solid #10b981; margin: 20px 0;\">\
             <p style=\"font-size: 18px; font-style: italic; color: #495057; margin: 0 0 10px;\">{}</p>\
             <p style=\"font-size: 14px; color: #6c757d; margin: 0;\">- {}</p></div>",
            text("quote", ""),
            text("author", ""),
        ),

        CustomComponentType::Features => {
            let mut out = String::from("<div style=\"padding: 30px 40px;\">");
            for n in 1..=4 {
                if let Some(title) = component.prop(&format!("feature{}Title", n)) {
                    let description = component
                        .prop(&format!("feature{}Description", n))
                        .unwrap_or("");
                    out.push_str(&format!(
                        "<div style=\"padding: 15px; background: #f8f9fa; border-radius: 8px; margin-bottom: 12px;\">\
                         <h4 style=\"margin: 0 0 8px; color: #10b981; font-size: 16px; font-weight: 600;\">{}</h4>\
                         <p style=\"margin: 0; font-size: 14px; color: #6c757d;\">{}</p></div>",
                        bindings.substitute(title),
                        bindings.substitute(description),
                    ));
                }
            }
            out.push_str("</div>");
            out
        }

        CustomComponentType::Stats => {
            let mut out = String::from(
                "<div style=\"padding: 40px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); text-align: center;\">",
            );
            for n in 1..=3 {
                if let Some(value) = component.prop(&format!("stat{}Value", n)) {
                    let label = component.prop(&format!("stat{}Label", n)).unwrap_or("");
                    out.push_str(&format!(
                        "<div style=\"display: inline-block; margin: 0 15px;\">\
                         <div style=\"font-size: 32px; font-weight: bold; color: white; margin-bottom: 8px;\">{}</div>\
                         <div style=\"font-size: 14px; color: rgba(255,255,255,0.9);\">{}</div></div>",
                        value, label,
                    ));
                }
            }
            out.push_str("</div>");
            out
        }

        CustomComponentType::Countdown => format!(
            "<div style=\"padding: 40px; background: #fff3cd; text-align: center; border-radius: 8px; margin: 20px 40px;\">\
             <h3 style=\"margin: 0 0 15px; color: #856404; font-size: 24px;\">{}</h3>\
             <p style=\"margin: 0; font-size: 16px; color: #856404;\">Ends {}</p></div>",
            text("eventName", "Special Event"),
            component.prop("eventDate").unwrap_or("soon"),
        ),

        CustomComponentType::Banner => format!(
            "<div style=\"padding: 60px 40px; background: {}; text-align: center;\">\
             <h1 style=\"margin: 0 0 15px; color: white; font-size: 36px; font-weight: bold;\">{}</h1>\
             <p style=\"margin: 0; color: rgba(255,255,255,0.95); font-size: 18px;\">{}</p></div>",
            component.prop("color").unwrap_or("#10b981"),
            text("title", "Welcome!"),
            text("subtitle", "Discover our amazing products"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bindings() -> PlaceholderBindings {
        PlaceholderBindings::new("Ana", "Acme", "James", "FruitCo")
    }

    fn component(component_type: &str, properties: serde_json::Value) -> CustomComponent {
        serde_json::from_value(json!({
            "id": format!("c-{}", component_type),
            "type": component_type,
            "properties": properties,
        }))
        .unwrap()
    }

    #[test]
    fn test_greeting_substitutes_placeholders() {
        let html = render_component(
            &component("greeting", json!({ "text": "Hello {name} at {company}!" })),
            &bindings(),
        );
        assert!(html.contains("Hello Ana at Acme!"));
    }

    #[test]
    fn test_banner_defaults() {
        let html = render_component(&component("banner", json!({})), &bindings());
        assert!(html.contains("Welcome!"));
        assert!(html.contains("#10b981"));
    }

    #[test]
    fn test_features_render_only_present_slots() {
        let html = render_component(
            &component(
                "features",
                json!({ "feature1Title": "Fast", "feature1Description": "Very", "feature3Title": "Safe" }),
            ),
            &bindings(),
        );
        assert!(html.contains("Fast"));
        assert!(html.contains("Safe"));
        assert_eq!(html.matches("<h4").count(), 2);
    }

    #[test]
    fn test_media_insertion_at_anchors() {
        let components = vec![
            component("banner", json!({ "title": "Hi" })),
            component("paragraph", json!({ "text": "One" })),
            component("paragraph", json!({ "text": "Two" })),
            component("cta", json!({ "text": "Go", "url": "https://x.example" })),
        ];
        let media: Vec<CustomMedia> = serde_json::from_value(json!([
            { "id": "m-start", "url": "https://cdn/start.png", "insertAfter": "start" },
            { "id": "m-p2", "url": "https://cdn/p2.png", "insertAfter": "paragraph-2" },
            { "id": "m-cta", "url": "https://cdn/cta.png", "insertAfter": "cta" },
            { "id": "m-end", "url": "https://cdn/end.png", "insertAfter": "end" }
        ]))
        .unwrap();

        let html = render_custom_template(&components, &media, &bindings());

        let pos = |needle: &str| html.find(needle).unwrap_or_else(|| panic!("missing {}", needle));
        assert!(pos("start.png") < pos("One"));
        assert!(pos("Two") < pos("p2.png"));
        assert!(pos("p2.png") < pos("Go"));
        assert!(pos("cta.png") > pos("Go"));
        assert!(pos("end.png") > pos("cta.png"));
    }
}
