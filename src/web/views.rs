//! Server-rendered upload page.

use askama::Template;
use askama_web::WebTemplate;

use crate::constants::{MAX_VARIATIONS, MIN_VARIATIONS, POSTER_STYLES};

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub(crate) variation_options: Vec<usize>,
    pub(crate) styles: Vec<&'static str>,
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self {
            variation_options: (MIN_VARIATIONS..=MAX_VARIATIONS).collect(),
            styles: POSTER_STYLES.to_vec(),
        }
    }
}

/// handles the / GET
pub(crate) async fn index_handler() -> IndexTemplate {
    IndexTemplate::default()
}
