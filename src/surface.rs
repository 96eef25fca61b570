/// The element mutations the page behaviors perform.
///
/// Handles are cheap to clone and every clone refers to the same element, so
/// a behavior can move a clone into a timer or frame callback.
pub trait Surface: Clone + 'static {
    fn set_style(&self, property: &str, value: &str);
    fn style(&self, property: &str) -> String;
    fn set_attribute(&self, name: &str, value: &str);
    fn attribute(&self, name: &str) -> Option<String>;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

#[cfg(target_arch = "wasm32")]
impl Surface for web_sys::HtmlElement {
    fn set_style(&self, property: &str, value: &str) {
        let _ = web_sys::HtmlElement::style(self).set_property(property, value);
    }

    fn style(&self, property: &str) -> String {
        web_sys::HtmlElement::style(self)
            .get_property_value(property)
            .unwrap_or_default()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = web_sys::Element::set_attribute(self, name, value);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}
