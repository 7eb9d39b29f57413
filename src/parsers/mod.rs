pub mod html;
pub mod text;


use crate::config::SelectorConfig;
use crate::data::{BasePageData, BrandFields, BrandItemFields, PageData, PageKind};
use crate::error::{CheckError, Result};
use scraper::{Html, Selector};
use url::Url;

/// Selectors compiled once per run
#[derive(Debug, Clone)]
struct CompiledSelectors {
    canonical: Selector,
    title: Selector,
    meta_description: Selector,
    breadcrumbs: Selector,
    breadcrumb_links: Selector,
    header1: Selector,
    description: Selector,
    specs: Selector,
    pricing: Selector,
    rating: Selector,
    identified: Selector,
    image: Selector,
    required_regions: CompiledRegions,
}

#[derive(Debug, Clone)]
struct CompiledRegions {
    base: Vec<(String, Selector)>,
    brand: Vec<(String, Selector)>,
    brand_item: Vec<(String, Selector)>,
}

impl CompiledRegions {
    fn for_kind(&self, kind: PageKind) -> &[(String, Selector)] {
        match kind {
            PageKind::Base => &self.base,
            PageKind::Brand => &self.brand,
            PageKind::BrandItem => &self.brand_item,
        }
    }
}

fn compile(field: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| CheckError::InvalidSelector {
        field: field.to_string(),
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn compile_regions(regions: &[String]) -> Result<Vec<(String, Selector)>> {
    regions
        .iter()
        .map(|region| Ok((region.clone(), compile("required_regions", region)?)))
        .collect()
}

/// Turns rendered page source into a [`PageData`] snapshot
#[derive(Debug, Clone)]
pub struct Extractor {
    selectors: CompiledSelectors,
    placeholder_image: String,
}

impl Extractor {
    /// Compile the selector table, failing on the first invalid selector
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        let regions = &config.required_regions;
        let required_regions = CompiledRegions {
            base: compile_regions(&regions.base)?,
            brand: compile_regions(&regions.brand)?,
            brand_item: compile_regions(&regions.brand_item)?,
        };

        let selectors = CompiledSelectors {
            canonical: compile("canonical", &config.canonical)?,
            title: compile("title", &config.title)?,
            meta_description: compile("meta_description", &config.meta_description)?,
            breadcrumbs: compile("breadcrumbs", &config.breadcrumbs)?,
            breadcrumb_links: compile("breadcrumb_links", &config.breadcrumb_links)?,
            header1: compile("header1", &config.header1)?,
            description: compile("description", &config.description)?,
            specs: compile("specs", &config.specs)?,
            pricing: compile("pricing", &config.pricing)?,
            rating: compile("rating", &config.rating)?,
            identified: compile("identified", &config.identified)?,
            image: compile("image", &config.image)?,
            required_regions,
        };

        Ok(Self {
            selectors,
            placeholder_image: config.placeholder_image.clone(),
        })
    }

    /// Extract a complete snapshot of `kind` from `source`.
    ///
    /// Either every field is populated or the call fails with
    /// `ExtractionFailed`; a partial record is never returned.
    pub fn extract(&self, source: &str, url: &str, kind: PageKind) -> Result<PageData> {
        let page_url =
            Url::parse(url).map_err(|e| CheckError::extraction(url, format!("invalid url: {}", e)))?;
        let doc = Html::parse_document(source);
        let s = &self.selectors;

        for (region, selector) in s.required_regions.for_kind(kind) {
            if !html::any_match(&doc, selector) {
                ::log::warn!("Required region '{}' missing on {} page {}", region, kind, url);
                return Err(CheckError::extraction(
                    url,
                    format!("required {} region '{}' is missing", kind, region),
                ));
            }
        }

        let base = BasePageData::new(
            url.to_string(),
            html::first_attr(&doc, &s.canonical, "href"),
            html::first_text(&doc, &s.title),
            html::first_attr(&doc, &s.meta_description, "content"),
            html::first_text(&doc, &s.breadcrumbs),
            html::links(&doc, &s.breadcrumb_links, &page_url),
        );

        let page = match kind {
            PageKind::Base => PageData::base(base),
            PageKind::Brand => PageData::brand(
                base,
                BrandFields {
                    header1: html::first_text(&doc, &s.header1),
                    description: html::first_text(&doc, &s.description),
                    identified: html::any_match(&doc, &s.identified),
                    na_gif: self.has_placeholder(&doc),
                },
            ),
            PageKind::BrandItem => PageData::brand_item(
                base,
                BrandItemFields {
                    header1: html::first_text(&doc, &s.header1),
                    description: html::first_text(&doc, &s.description),
                    specs: html::all_texts(&doc, &s.specs),
                    pricing: html::first_text(&doc, &s.pricing),
                    rating: html::first_text(&doc, &s.rating),
                    identified: html::any_match(&doc, &s.identified),
                    na_gif: self.has_placeholder(&doc),
                },
            ),
        };

        ::log::debug!("Extracted {} page: {}", kind, url);
        Ok(page)
    }

    fn has_placeholder(&self, doc: &Html) -> bool {
        html::has_placeholder_image(doc, &self.selectors.image, &self.placeholder_image)
    }
}
