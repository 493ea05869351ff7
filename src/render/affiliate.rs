//! Outbound affiliate links.

use url::Url;

/// Default `utm_medium` for outbound links.
pub const DEFAULT_MEDIUM: &str = "affiliate";

/// Default `utm_campaign` for outbound links.
pub const DEFAULT_CAMPAIGN: &str = "ref";

/// Append UTM parameters to `link`, keeping any existing query and fragment.
///
/// An empty link becomes `#`. Links that do not parse as absolute URLs get the
/// parameters appended textually.
pub fn with_utm(link: &str, source: &str, medium: &str, campaign: &str) -> String {
    let link = link.trim();
    if link.is_empty() {
        return "#".to_string();
    }

    match Url::parse(link) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_pair("utm_source", source)
                .append_pair("utm_medium", medium)
                .append_pair("utm_campaign", campaign);
            url.to_string()
        }
        Err(_) => {
            let delimiter = if link.contains('?') { '&' } else { '?' };
            let params = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("utm_source", source)
                .append_pair("utm_medium", medium)
                .append_pair("utm_campaign", campaign)
                .finish();
            format!("{}{}{}", link, delimiter, params)
        }
    }
}
