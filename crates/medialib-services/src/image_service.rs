//! Image service interface
//!
//! File bytes and image transformations live in an external service; assets
//! are addressed by uuid. The trait mirrors the three URL shapes the CMS
//! needs: a CMS preview, the untouched original, and a sized rendition.

use uuid::Uuid;

/// Rendering hints carried in image URLs.
#[derive(Clone, Debug, Default)]
pub struct ImageRenderOpts {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageRenderOpts {
    pub fn height(height: u32) -> Self {
        ImageRenderOpts {
            width: None,
            height: Some(height),
        }
    }
}

pub trait ImageService: Send + Sync {
    fn get_cms_url(&self, uuid: Uuid, opts: &ImageRenderOpts) -> String;
    fn get_raw_url(&self, uuid: Uuid) -> String;
    fn get_url(&self, uuid: Uuid, opts: &ImageRenderOpts) -> String;
}

/// URL builder for a CDN-style image endpoint: `{base}/{uuid}?w=..&h=..`.
pub struct CdnImageService {
    base_url: String,
}

impl CdnImageService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn render_url(&self, uuid: Uuid, opts: &ImageRenderOpts) -> String {
        let mut url = format!("{}/{}", self.base_url, uuid);
        let mut separator = '?';
        if let Some(width) = opts.width {
            url.push(separator);
            url.push_str(&format!("w={}", width));
            separator = '&';
        }
        if let Some(height) = opts.height {
            url.push(separator);
            url.push_str(&format!("h={}", height));
        }
        url
    }
}

impl ImageService for CdnImageService {
    fn get_cms_url(&self, uuid: Uuid, opts: &ImageRenderOpts) -> String {
        self.render_url(uuid, opts)
    }

    fn get_raw_url(&self, uuid: Uuid) -> String {
        format!("{}/{}", self.base_url, uuid)
    }

    fn get_url(&self, uuid: Uuid, opts: &ImageRenderOpts) -> String {
        self.render_url(uuid, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_url() {
        let service = CdnImageService::new("https://img.example.com/");
        let uuid = Uuid::nil();
        assert_eq!(
            service.get_raw_url(uuid),
            format!("https://img.example.com/{}", uuid)
        );
    }

    #[test]
    fn test_sized_urls() {
        let service = CdnImageService::new("https://img.example.com");
        let uuid = Uuid::nil();
        assert_eq!(
            service.get_url(uuid, &ImageRenderOpts::height(430)),
            format!("https://img.example.com/{}?h=430", uuid)
        );
        let opts = ImageRenderOpts {
            width: Some(100),
            height: Some(200),
        };
        assert_eq!(
            service.get_cms_url(uuid, &opts),
            format!("https://img.example.com/{}?w=100&h=200", uuid)
        );
    }

    #[test]
    fn test_no_hints_no_query() {
        let service = CdnImageService::new("/img");
        let uuid = Uuid::nil();
        assert_eq!(
            service.get_url(uuid, &ImageRenderOpts::default()),
            format!("/img/{}", uuid)
        );
    }
}
