//! Rendering of walkthrough document sections.

use crate::primitives::Description;

/// Code fence delimiter.
pub const FENCE: &str = "```";

/// One entry of the output document: a description followed by a fenced copy of the file.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSection<'a> {
    /// Operator description shown above the code block.
    pub description: &'a Description,
    /// Path label placed in the fence header.
    pub label: &'a str,
    /// Raw file text. Trailing whitespace is stripped when rendered.
    pub content: &'a str,
}

impl DocumentSection<'_> {
    /// Append the rendered section to `out`.
    ///
    /// ~~~text
    /// <description>
    ///
    /// ```<lang> file="<label>"
    /// <content>
    /// ```
    ///
    /// ~~~
    pub fn render_into(&self, out: &mut String, fence_language: &str) {
        out.push_str(self.description.as_str());
        out.push_str("\n\n");
        out.push_str(FENCE);
        out.push_str(fence_language);
        out.push_str(" file=\"");
        out.push_str(self.label);
        out.push_str("\"\n");
        out.push_str(self.content.trim_end());
        out.push('\n');
        out.push_str(FENCE);
        out.push_str("\n\n");
    }

    /// Render the section to a new string.
    #[must_use]
    pub fn render(&self, fence_language: &str) -> String {
        let mut out = String::with_capacity(
            self.description.as_str().len() + self.label.len() + self.content.len() + 32,
        );
        self.render_into(&mut out, fence_language);
        out
    }
}
