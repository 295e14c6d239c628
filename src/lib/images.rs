use crate::*;
use serde_derive::Deserialize;

/// Finds a representative photo for a place.
pub trait ImageLookup {
    fn find_photo(&self, query: &str) -> Result<Option<String>, LookupError>;
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: Option<PhotoUrls>,
}

#[derive(Debug, Deserialize)]
struct PhotoSearch {
    #[serde(default)]
    results: Vec<Photo>,
}

/// Image search backed by the Unsplash API.
pub struct UnsplashImages {
    endpoint: String,
    access_key: String,
    user_agent: String,
}

impl UnsplashImages {
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}?query={}&client_id={}&orientation=landscape&per_page=1",
            join_url(&self.endpoint, "search/photos"),
            urlencoding::encode(query),
            urlencoding::encode(&self.access_key)
        )
    }
}

impl ImageLookup for UnsplashImages {
    fn find_photo(&self, query: &str) -> Result<Option<String>, LookupError> {
        if self.access_key.is_empty() {
            log::debug!("No image access key configured, skipping lookup for '{}'.", query);
            return Ok(None);
        }
        let search: PhotoSearch = fetch_json(&self.search_url(query), &self.user_agent)?;
        Ok(search
            .results
            .into_iter()
            .next()
            .and_then(|p| p.urls)
            .and_then(|u| u.regular)
            .filter(|u| !u.is_empty()))
    }
}

/// The decorative image used when no photo could be found.
pub fn placeholder_image_url(name: &str) -> String {
    format!(
        "https://source.unsplash.com/featured/800x600/?{},travel,landmark",
        urlencoding::encode(name)
    )
}

/// Looks up a background photo for a destination. Failures are never surfaced.
pub fn background_image(images: &dyn ImageLookup, name: &str) -> String {
    match images.find_photo(&format!("{} travel destination", name)) {
        Ok(Some(url)) => url,
        Ok(None) => placeholder_image_url(name),
        Err(e) => {
            log::debug!("Image lookup for {} failed. Reason:\r\n{}", name, e);
            placeholder_image_url(name)
        }
    }
}

#[cfg(test)]
pub(crate) struct FixedImages(pub Option<&'static str>);

#[cfg(test)]
impl ImageLookup for FixedImages {
    fn find_photo(&self, _query: &str) -> Result<Option<String>, LookupError> {
        match self.0 {
            Some(url) => Ok(Some(url.to_string())),
            None => Err(LookupError::Status {
                url: "https://api.unsplash.com/search/photos".to_string(),
                status: 401,
            }),
        }
    }
}

#[test]
fn failed_lookups_fall_back_to_the_placeholder() {
    assert_eq!(
        background_image(&FixedImages(None), "New Zealand"),
        "https://source.unsplash.com/featured/800x600/?New%20Zealand,travel,landmark"
    );
    assert_eq!(
        background_image(&FixedImages(Some("https://img/1.jpg")), "Japan"),
        "https://img/1.jpg"
    );
}

#[test]
fn empty_access_key_skips_the_request() {
    let images = UnsplashImages::new("http://127.0.0.1:9", "", "TripMind-App");
    assert_eq!(images.find_photo("Japan").unwrap(), None);
}

#[test]
fn photo_search_payload_decodes() {
    let body = r#"{"total": 1, "results": [{"id": "x", "urls": {"regular": "https://img/r.jpg"}}]}"#;
    let search: PhotoSearch = serde_json::from_str(body).unwrap();
    let url = search.results.into_iter().next().and_then(|p| p.urls).and_then(|u| u.regular);
    assert_eq!(url.as_deref(), Some("https://img/r.jpg"));
}
