//! Markdown rendering for post pages

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Renders post bodies to HTML, highlighting fenced code
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl MarkdownRenderer {
    /// Create a renderer with the default highlighting theme
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Create a renderer with a named syntect theme, falling back to the default
    pub fn with_theme(name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes
            .remove(name)
            .or_else(|| themes.remove(DEFAULT_THEME))
            .unwrap_or_default();

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Render a post body.
    ///
    /// MDX `import`/`export` lines are dropped; embedded JSX passes through as
    /// raw HTML.
    pub fn render(&self, markdown: &str) -> String {
        let source = strip_esm_lines(markdown);
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;

        let mut events: Vec<Event> = Vec::new();
        // (language, collected code) while inside a code block
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(&source, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        // Info strings like `rust title="main.rs"`
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let html = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                _ if code_block.is_some() => {}
                event => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let body = highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme)
            .unwrap_or_else(|_| format!("<pre><code>{}</code></pre>", escape_html(code)));

        format!(
            r#"<figure class="highlight {}">{}</figure>"#,
            escape_html(lang),
            body
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop top-level MDX module lines, leaving fenced code untouched
fn strip_esm_lines(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut fence: Option<(char, usize)> = None;

    for line in source.lines() {
        let trimmed = line.trim_start();
        if let Some((marker, len)) = parse_fence_marker(trimmed) {
            fence = match fence {
                None => Some((marker, len)),
                Some((open, open_len)) if open == marker && len >= open_len => None,
                open => open,
            };
        } else if fence.is_none()
            && (line.starts_with("import ") || line.starts_with("export "))
        {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}

/// `(char, count)` for a run of 3+ backticks or tildes
fn parse_fence_marker(line: &str) -> Option<(char, usize)> {
    let first = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let count = line.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Programme\n\nDeux jours de conférences.");
        assert!(html.contains("<h2>Programme</h2>"));
        assert!(html.contains("<p>Deux jours de conférences.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust title=\"main.rs\"\nfn main() {}\n```");
        assert!(html.contains(r#"<figure class="highlight rust">"#));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_code_language_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```x\"onclick=\"alert(1)\ncode\n```");
        assert!(html.contains(r#"<figure class="highlight x&quot;onclick=&quot;alert(1)">"#));
        assert!(!html.contains(r#"highlight x"onclick"#));
    }

    #[test]
    fn test_mdx_imports_are_dropped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(
            "import Banner from './banner'\n\nHello\n\n```js\nimport x from 'y'\n```\n",
        );
        assert!(!html.contains("Banner"));
        assert!(html.contains("<p>Hello</p>"));
        assert!(html.contains("import"));
    }

    #[test]
    fn test_parse_fence_marker() {
        assert_eq!(parse_fence_marker("```rust"), Some(('`', 3)));
        assert_eq!(parse_fence_marker("~~~~"), Some(('~', 4)));
        assert_eq!(parse_fence_marker("``"), None);
        assert_eq!(parse_fence_marker("text"), None);
    }
}
