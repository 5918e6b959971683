use askama::Template;

/// One entry of the configuration menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub href: String,
    pub title: String,
    pub active: bool,
}

/// Page shell wrapping an already rendered body.
#[derive(Template)]
#[template(path = "config/base.html")]
pub struct ConfigBaseTemplate<'a> {
    pub lang: &'a str,
    pub title: String,
    pub nav: Vec<NavItem>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_inserted_raw_and_active_item_marked() {
        let page = ConfigBaseTemplate {
            lang: "cs",
            title: "WAN".into(),
            nav: vec![
                NavItem { href: "/config/wan".into(), title: "WAN".into(), active: true },
                NavItem { href: "/config/lan".into(), title: "LAN".into(), active: false },
            ],
            body: "<form id=\"main-form\"></form>".into(),
        };
        let html = page.render().unwrap();
        assert!(html.contains(r#"<html lang="cs">"#));
        assert!(html.contains(r#"<form id="main-form"></form>"#));
        assert!(html.contains(r#"<li class="active"><a href="/config/wan">WAN</a></li>"#));
        assert!(html.contains(r#"<li><a href="/config/lan">LAN</a></li>"#));
    }
}
