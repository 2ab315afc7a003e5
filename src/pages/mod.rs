//! Page building shared by the static generator and the server

use anyhow::Result;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, PostDetail, PostSummary};
use crate::helpers::{full_url_for, locale_url, post_url, url_for};
use crate::i18n::I18n;
use crate::templates::{
    AlternateData, ConfigData, PostCardData, PostPageData, TemplateRenderer, UrlsData,
};
use crate::tickets::{on_sale, ticket_cards};
use crate::Site;

/// Renders every page of the site to HTML
pub struct Pages {
    config: SiteConfig,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    i18n: I18n,
}

impl Pages {
    /// Create the page builder for a site, loading its translation files
    pub fn new(site: &Site) -> Result<Self> {
        let mut i18n = I18n::new(&site.config.default_locale);
        i18n.load_languages(&site.i18n_dir)?;
        tracing::debug!("Translations available for {:?}", i18n.languages());

        Ok(Self {
            config: site.config.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
            i18n,
        })
    }

    /// Home page: tickets and the latest posts
    pub fn home(&self, locale: &str, posts: &[PostSummary]) -> Result<String> {
        let mut context = self.base_context(locale, "");
        let latest: Vec<_> = posts.iter().take(self.config.home_posts).collect();
        context.insert("posts", &self.cards(locale, latest));
        context.insert(
            "tickets",
            &ticket_cards(&self.config.tickets, &self.i18n, locale),
        );
        context.insert("tickets_on_sale", &on_sale(&self.config.tickets));
        self.renderer.render("home.html", &context)
    }

    /// Blog listing
    pub fn blog_index(&self, locale: &str, posts: &[PostSummary]) -> Result<String> {
        let mut context = self.base_context(locale, "blog");
        context.insert("posts", &self.cards(locale, posts.iter()));
        self.renderer.render("blog_index.html", &context)
    }

    /// A single post
    pub fn blog_post(&self, locale: &str, post: &PostDetail) -> Result<String> {
        let mut context = self.base_context(locale, &format!("blog/{}", post.slug));
        let page = PostPageData {
            title: post.title.clone(),
            key: post.key.clone(),
            image: post.image.clone(),
            date: post.date.clone(),
            slug: post.slug.clone(),
            html: self.markdown.render(&post.content),
            hide_title: post.hide_title,
        };
        context.insert("post", &page);
        self.renderer.render("blog_post.html", &context)
    }

    /// Page shown for unknown posts
    pub fn not_found(&self, locale: &str) -> Result<String> {
        let context = self.base_context(locale, "");
        self.renderer.render("not_found.html", &context)
    }

    /// Meta-refresh page pointing at `target`
    pub fn redirect(&self, target: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("target", target);
        self.renderer.render("redirect.html", &context)
    }

    fn cards<'a>(
        &self,
        locale: &str,
        posts: impl IntoIterator<Item = &'a PostSummary>,
    ) -> Vec<PostCardData> {
        posts
            .into_iter()
            .map(|post| PostCardData {
                url: post_url(&self.config, locale, &post.slug),
                post: post.clone(),
            })
            .collect()
    }

    /// Context every template needs; `path` is the page path inside the
    /// locale section, used for language switch links
    fn base_context(&self, locale: &str, path: &str) -> Context {
        let mut context = Context::new();

        context.insert(
            "config",
            &ConfigData {
                title: self.config.title.clone(),
                description: self.config.description.clone(),
                url: self.config.url.trim_end_matches('/').to_string(),
                root: self.config.root.clone(),
                date_format: self.config.date_format.clone(),
            },
        );
        context.insert("locale", locale);
        context.insert("t", &self.i18n.get_all_translations(locale));
        context.insert(
            "urls",
            &UrlsData {
                home: locale_url(&self.config, locale, ""),
                blog: locale_url(&self.config, locale, "blog"),
                assets: url_for(&self.config, ""),
            },
        );

        let alternates: Vec<_> = self
            .config
            .site_locales()
            .into_iter()
            .map(|alt| {
                let section = match path.trim_matches('/') {
                    "" => alt.clone(),
                    path => format!("{}/{}", alt, path),
                };
                AlternateData {
                    url: url_for(&self.config, &section),
                    full_url: full_url_for(&self.config, &section),
                    locale: alt,
                }
            })
            .collect();
        context.insert("alternates", &alternates);

        context
    }
}
