//! HTML fragment writer.
//!
//! Uses `quick-xml`'s writer API, which escapes text and attribute values,
//! so stored record values can be emitted as-is.

use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

pub struct Markup {
  writer: Writer<Vec<u8>>,
}

impl Default for Markup {
  fn default() -> Self { Self::new() }
}

impl Markup {
  pub fn new() -> Self {
    Self {
      writer: Writer::new(Vec::new()),
    }
  }

  pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
    let mut el = BytesStart::new(tag);
    for (k, v) in attrs {
      el.push_attribute((*k, *v));
    }
    self.write(Event::Start(el))
  }

  pub fn close(&mut self, tag: &str) -> &mut Self {
    self.write(Event::End(BytesEnd::new(tag)))
  }

  pub fn text(&mut self, text: &str) -> &mut Self {
    self.write(Event::Text(BytesText::new(text)))
  }

  /// `<tag attrs>text</tag>`
  pub fn element(
    &mut self,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
  ) -> &mut Self {
    self.open(tag, attrs).text(text).close(tag)
  }

  /// A void element such as `<input>`.
  pub fn void(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
    let mut el = BytesStart::new(tag);
    for (k, v) in attrs {
      el.push_attribute((*k, *v));
    }
    self.write(Event::Empty(el))
  }

  pub fn finish(self) -> String {
    String::from_utf8_lossy(&self.writer.into_inner()).into_owned()
  }

  fn write(&mut self, event: Event<'_>) -> &mut Self {
    // Writing into a Vec<u8> cannot fail.
    let _ = self.writer.write_event(event);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_text_and_attributes() {
    let mut m = Markup::new();
    m.element("p", &[("title", "a\"b")], "<script>&");
    let html = m.finish();
    assert!(html.starts_with("<p title=\"a&quot;b\">"), "{html}");
    assert!(html.contains("&lt;script&gt;&amp;"), "{html}");
    assert!(html.ends_with("</p>"), "{html}");
  }

  #[test]
  fn nests_elements_in_order() {
    let mut m = Markup::new();
    m.open("div", &[("id", "x")])
      .void("input", &[("name", "code")])
      .close("div");
    assert_eq!(m.finish(), "<div id=\"x\"><input name=\"code\"/></div>");
  }
}
