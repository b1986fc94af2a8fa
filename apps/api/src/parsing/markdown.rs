use pulldown_cmark::{html, Options, Parser};

/// Renders a Markdown span to an HTML fragment.
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_and_bold() {
        let html = render_html("- **Docker** for deployments\n- Kubernetes");
        assert_eq!(
            html,
            "<ul>\n<li><strong>Docker</strong> for deployments</li>\n<li>Kubernetes</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(render_html("Tell a story."), "<p>Tell a story.</p>\n");
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(render_html(""), "");
    }
}
