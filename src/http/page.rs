//! Identity confirmation page.

use maud::{html, DOCTYPE};
use url::Url;

use crate::edge::EdgeContext;
use crate::routing::router::FLAG_MARKER;

/// Base used only to percent-encode the flag link's path segment.
const LINK_BASE: &str = "http://localhost/secure/";

/// Render the page confirming who authenticated, when, and from where.
///
/// Interpolated values are HTML-escaped by maud.
pub fn render_identity_page(ctx: &EdgeContext) -> String {
    let timestamp = ctx.timestamp_iso();
    let href = flag_href(&ctx.country);

    html! {
        (DOCTYPE)
        html {
            head {
                title { "Identity Verified" }
                style { "body { font-family: sans-serif; padding: 2rem; }" }
            }
            body {
                h1 { "Identity Verified" }
                p {
                    strong { (ctx.identity) }
                    " authenticated at " (timestamp) " from "
                    a href=(href) { (ctx.country) }
                }
            }
        }
    }
    .into_string()
}

/// Path of the flag for `country`, with the code encoded as one path segment.
pub fn flag_href(country: &str) -> String {
    let Ok(mut url) = Url::parse(LINK_BASE) else {
        return FLAG_MARKER.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(country);
    }
    url.path().to_string()
}
