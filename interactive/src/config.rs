use postwall_shared::config::ClientConfig;
use web_sys::window;

/// Reads overrides from `<meta name="postwall-..." content="...">` tags set
/// by the page template.
pub fn load() -> ClientConfig {
    ClientConfig::from_lookup(meta_content)
}

fn meta_content(name: &str) -> Option<String> {
    let document = window()?.document()?;
    document
        .query_selector(&format!("meta[name='{}']", name))
        .ok()
        .flatten()?
        .get_attribute("content")
}
